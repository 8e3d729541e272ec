use serde::{Deserialize, Serialize};

use crate::ldp::LdpStore;
use crate::rdf::PRED;

use super::graph::Node;
use super::{GraphAgent, GraphError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Center,
    Neighbour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Person,
    Image,
    Document,
    Passport,
    Unknown,
}

impl NodeType {
    fn of(node: &Node) -> Self {
        if node.connection.as_deref() == Some(PRED.passport) {
            NodeType::Passport
        } else if node.has_type(PRED.class_person) {
            NodeType::Person
        } else if node.has_type(PRED.class_image) {
            NodeType::Image
        } else if node.has_type(PRED.class_document) {
            NodeType::Document
        } else {
            NodeType::Unknown
        }
    }
}

/// A node as the graph renderer wants it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeModel {
    pub uri: String,
    pub rank: Rank,
    /// Position within the graph map
    pub index: usize,
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub node_type: NodeType,
    pub connection: Option<String>,
    pub unavailable: Option<u16>,
}

impl NodeModel {
    pub fn from_node(node: &Node, rank: Rank, index: usize) -> Self {
        let owned = |predicate: &str| node.value(predicate).map(str::to_string);
        let title = owned(PRED.title);
        let name = owned(PRED.name)
            .or_else(|| title.clone())
            .unwrap_or_else(|| node.uri.clone());

        Self {
            uri: node.uri.clone(),
            rank,
            index,
            name,
            title,
            description: owned(PRED.description),
            img: owned(PRED.image).filter(|img| !img.is_empty()),
            node_type: NodeType::of(node),
            connection: node.connection.clone(),
            unavailable: node.unavailable,
        }
    }
}

/// Project the nodes of a graph map; the first one is the center.
pub fn convert_to_nodes(nodes: &[Node]) -> Vec<NodeModel> {
    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let rank = if index == 0 {
                Rank::Center
            } else {
                Rank::Neighbour
            };
            NodeModel::from_node(node, rank, index)
        })
        .collect()
}

impl<S: LdpStore> GraphAgent<S> {
    /// Fetch `uri` and describe it as a center node.
    pub async fn get_file_model(&self, uri: &str) -> Result<NodeModel, GraphError> {
        let document = self.fetch_document(uri).await?;
        Ok(NodeModel::from_node(&Node::new(uri, document), Rank::Center, 0))
    }
}

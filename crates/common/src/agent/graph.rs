use std::collections::BTreeMap;

use futures::future::join_all;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::ldp::{Fetched, LdpStore};
use crate::rdf::{RdfDocument, Term, Triple, TriplePattern, PRED};

use super::{GraphAgent, GraphError};

/// A resource in a graph map, with the triples its document holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub uri: String,
    pub triples: Vec<Triple>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub prefixes: BTreeMap<String, String>,
    /// Predicate that linked this node from the center
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    /// Status the server answered with when the node could not be read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<u16>,
}

impl Node {
    pub fn new(uri: impl Into<String>, document: RdfDocument) -> Self {
        Self {
            uri: uri.into(),
            triples: document.triples,
            prefixes: document.prefixes,
            connection: None,
            unavailable: None,
        }
    }

    pub fn unavailable(uri: impl Into<String>, status: StatusCode) -> Self {
        Self {
            uri: uri.into(),
            unavailable: Some(status.as_u16()),
            ..Self::default()
        }
    }

    pub fn with_connection(mut self, predicate: &str) -> Self {
        self.connection = Some(predicate.to_string());
        self
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.unavailable
            .and_then(|code| StatusCode::from_u16(code).ok())
    }

    pub fn is_unavailable(&self) -> bool {
        self.unavailable.is_some()
    }

    /// Value of `predicate`, preferring statements about the node itself
    /// over statements about its containing document.
    pub fn value(&self, predicate: &str) -> Option<&str> {
        let mut about_other = None;
        for triple in self.triples.iter().filter(|t| t.predicate == predicate) {
            if triple.subject.as_iri() == Some(self.uri.as_str()) {
                return Some(triple.object.value());
            }
            about_other.get_or_insert(triple.object.value());
        }
        about_other
    }

    /// Whether the node declares `rdf:type <class>`
    pub fn has_type(&self, class: &str) -> bool {
        self.triples
            .iter()
            .any(|t| t.predicate == PRED.r#type && t.object.as_iri() == Some(class))
    }
}

/// The center node followed by its resolved neighbours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMap {
    pub nodes: Vec<Node>,
    /// URIs of neighbours that could not be read
    pub errors: Vec<String>,
}

impl GraphMap {
    pub fn center(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn neighbours(&self) -> &[Node] {
        self.nodes.get(1..).unwrap_or_default()
    }
}

/// Outcome of resolving the links of one node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbours {
    pub nodes: Vec<Node>,
    pub errors: Vec<String>,
}

/// What node creation needs to know about the node new nodes hang off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterNode {
    pub uri: String,
    /// Container new documents are created in
    pub storage: String,
}

impl<S: LdpStore> GraphAgent<S> {
    /// Fetch `uri` and its one-hop neighbourhood.
    pub async fn get_graph_map_at_uri(&self, uri: &str) -> Result<GraphMap, GraphError> {
        let document = self.fetch_document(uri).await?;
        let center = Node::new(uri, document);
        let neighbours = self.get_neighbours(uri, &center.triples).await;

        tracing::info!(
            "graph map at {}: {} neighbours, {} errors",
            uri,
            neighbours.nodes.len(),
            neighbours.errors.len()
        );

        let mut nodes = Vec::with_capacity(neighbours.nodes.len() + 1);
        nodes.push(center);
        nodes.extend(neighbours.nodes);
        Ok(GraphMap {
            nodes,
            errors: neighbours.errors,
        })
    }

    pub async fn get_graph_map_at_web_id(&self, web_id: &str) -> Result<GraphMap, GraphError> {
        self.get_graph_map_at_uri(web_id).await
    }

    /// Resolve the allow-listed links among `triples`.
    ///
    /// Never fails: neighbours that cannot be read are recorded in
    /// `errors`. Forbidden neighbours are left out of `nodes`; other
    /// unavailable ones are kept with their status so they can still be
    /// unlinked.
    pub async fn get_neighbours(&self, center: &str, triples: &[Triple]) -> Neighbours {
        let links = PRED.links();
        let targets: Vec<(&str, &str)> = triples
            .iter()
            .filter(|t| links.contains(&t.predicate.as_str()))
            .filter_map(|t| t.object.as_iri().map(|o| (o, t.predicate.as_str())))
            .collect();

        tracing::debug!("{}: resolving {} neighbours", center, targets.len());

        let results = join_all(
            targets
                .iter()
                .map(|(uri, _)| self.store().fetch_triples(uri)),
        )
        .await;

        let mut neighbours = Neighbours::default();
        for ((uri, predicate), result) in targets.into_iter().zip(results) {
            match result {
                Ok(Fetched::Document(document)) => {
                    neighbours
                        .nodes
                        .push(Node::new(uri, document).with_connection(predicate));
                }
                Ok(Fetched::Unavailable { status }) => {
                    neighbours.errors.push(uri.to_string());
                    if status == StatusCode::FORBIDDEN {
                        tracing::debug!("{}: neighbour {} is forbidden, dropping", center, uri);
                    } else {
                        neighbours
                            .nodes
                            .push(Node::unavailable(uri, status).with_connection(predicate));
                    }
                }
                Err(e) => {
                    tracing::warn!("{}: could not fetch neighbour {}: {}", center, uri, e);
                    neighbours.errors.push(uri.to_string());
                }
            }
        }
        neighbours
    }

    /// The `foaf:knows` statements of the profile at `uri`
    pub async fn find_friends(&self, uri: &str) -> Result<Vec<Triple>, GraphError> {
        let document = self.fetch_document(uri).await?;
        let pattern = TriplePattern::new(Some(Term::iri(uri)), Some(PRED.knows), None);
        Ok(document.find(&pattern).into_iter().cloned().collect())
    }

    pub async fn center_node(&self, uri: &str) -> Result<CenterNode, GraphError> {
        let document = self.fetch_document(uri).await?;
        let storage = document
            .objects(uri, PRED.storage)
            .find_map(Term::as_iri)
            .or_else(|| {
                document
                    .triples
                    .iter()
                    .filter(|t| t.predicate == PRED.storage)
                    .find_map(|t| t.object.as_iri())
            })
            .ok_or_else(|| GraphError::MissingStorage(uri.to_string()))?;

        Ok(CenterNode {
            uri: uri.to_string(),
            storage: storage.to_string(),
        })
    }

    /// Fetch a document that must exist
    pub(crate) async fn fetch_document(&self, uri: &str) -> Result<RdfDocument, GraphError> {
        match self.store().fetch_triples(uri).await? {
            Fetched::Document(document) => Ok(document),
            Fetched::Unavailable { status } => Err(GraphError::Unavailable {
                uri: uri.to_string(),
                status,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Literal;

    #[test]
    fn test_value_prefers_own_subject() {
        let uri = "https://alice.example/profile/card#me";
        let node = Node {
            uri: uri.to_string(),
            triples: vec![
                Triple::new(
                    "https://alice.example/profile/card",
                    PRED.title,
                    Literal::simple("Profile"),
                ),
                Triple::new(uri, PRED.title, Literal::simple("Alice")),
            ],
            ..Node::default()
        };

        assert_eq!(node.value(PRED.title), Some("Alice"));
        assert_eq!(node.value(PRED.description), None);
    }

    #[test]
    fn test_unavailable_node() {
        let node = Node::unavailable("https://bob.example/x", StatusCode::NOT_FOUND)
            .with_connection(PRED.knows);
        assert!(node.is_unavailable());
        assert_eq!(node.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(node.connection.as_deref(), Some(PRED.knows));
    }

    #[test]
    fn test_graph_map_accessors() {
        let map = GraphMap::default();
        assert!(map.center().is_none());
        assert!(map.neighbours().is_empty());
    }
}

use clap::Args;
use serde::Serialize;

use common::agent::{convert_to_nodes, GraphError, NodeModel, Rank};
use common::rdf::PRED;

#[derive(Args, Debug, Clone)]
pub struct Graph {
    /// Center of the map (defaults to the session WebID)
    pub uri: Option<String>,

    /// Print the map as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum GraphOpError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct GraphOutput<'a> {
    nodes: &'a [NodeModel],
    errors: &'a [String],
}

#[async_trait::async_trait]
impl crate::op::Op for Graph {
    type Error = GraphOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let uri = match self.uri.as_deref().or(ctx.web_id()) {
            Some(uri) => uri,
            None => return Err(GraphError::NoWebId.into()),
        };

        let map = ctx.agent.get_graph_map_at_uri(uri).await?;
        let mut models = convert_to_nodes(&map.nodes);
        ctx.agent.check_images(&mut models).await;

        if self.json {
            return Ok(serde_json::to_string_pretty(&GraphOutput {
                nodes: &models,
                errors: &map.errors,
            })?);
        }

        let mut lines = Vec::new();
        for model in &models {
            let mut line = match model.rank {
                Rank::Center => format!("{} ({:?})", model.name, model.node_type),
                Rank::Neighbour => format!(
                    "  -[{}]-> {} ({:?})",
                    model
                        .connection
                        .as_deref()
                        .map(|p| PRED.compact(p))
                        .unwrap_or_default(),
                    model.name,
                    model.node_type
                ),
            };
            if model.name != model.uri {
                line.push_str(&format!(" <{}>", model.uri));
            }
            if let Some(status) = model.unavailable {
                line.push_str(&format!(" [unavailable: {}]", status));
            }
            lines.push(line);
        }
        if !map.errors.is_empty() {
            lines.push(format!("{} neighbour(s) could not be read:", map.errors.len()));
            lines.extend(map.errors.iter().map(|uri| format!("  {}", uri)));
        }

        Ok(lines.join("\n"))
    }
}

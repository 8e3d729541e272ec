use clap::Args;

use common::agent::{GraphError, ImageCheck};

#[derive(Args, Debug, Clone)]
pub struct Show {
    pub uri: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ShowError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for Show {
    type Error = ShowError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut models = [ctx.agent.get_file_model(&self.uri).await?];
        let checks = ctx.agent.check_images(&mut models).await;
        let [model] = models;

        if self.json {
            return Ok(serde_json::to_string_pretty(&model)?);
        }

        let mut lines = vec![
            format!("uri:         {}", model.uri),
            format!("name:        {}", model.name),
            format!("type:        {:?}", model.node_type),
        ];
        if let Some(description) = &model.description {
            lines.push(format!("description: {}", description));
        }
        for check in checks {
            match check {
                ImageCheck::NoImage => {}
                ImageCheck::Available { uri } => lines.push(format!("image:       {}", uri)),
                ImageCheck::Cleared { uri, reason } => {
                    lines.push(format!("image:       {} (unreachable: {})", uri, reason))
                }
            }
        }

        Ok(lines.join("\n"))
    }
}

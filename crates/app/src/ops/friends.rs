use clap::Args;

use common::agent::GraphError;

#[derive(Args, Debug, Clone)]
pub struct Friends {
    /// Profile to list friends of (defaults to the session WebID)
    pub uri: Option<String>,
}

#[async_trait::async_trait]
impl crate::op::Op for Friends {
    type Error = GraphError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let uri = self
            .uri
            .as_deref()
            .or(ctx.web_id())
            .ok_or(GraphError::NoWebId)?;

        let friends = ctx.agent.find_friends(uri).await?;
        if friends.is_empty() {
            return Ok(format!("{} knows nobody yet", uri));
        }

        Ok(friends
            .iter()
            .map(|t| t.object.value())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

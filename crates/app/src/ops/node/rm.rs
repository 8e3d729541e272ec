use clap::Args;

use common::agent::GraphError;

#[derive(Args, Debug, Clone)]
pub struct Rm {
    /// Node or file to delete
    pub uri: String,
}

#[async_trait::async_trait]
impl crate::op::Op for Rm {
    type Error = GraphError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        ctx.agent.delete_file(&self.uri).await?;
        Ok(format!("Deleted {}", self.uri))
    }
}

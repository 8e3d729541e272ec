use clap::Args;

use common::agent::GraphError;

#[derive(Args, Debug, Clone)]
pub struct Acl {
    /// Resource the ACL governs
    pub uri: String,

    /// Owner WebID (defaults to the session WebID)
    #[arg(long)]
    pub owner: Option<String>,

    /// Do not grant public read access
    #[arg(long)]
    pub confidential: bool,
}

#[async_trait::async_trait]
impl crate::op::Op for Acl {
    type Error = GraphError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let owner = self
            .owner
            .as_deref()
            .or(ctx.web_id())
            .ok_or(GraphError::NoWebId)?;

        let acl_uri = ctx
            .agent
            .create_acl(&self.uri, owner, self.confidential)
            .await?;

        let access = if self.confidential {
            "owner only"
        } else {
            "public read"
        };
        Ok(format!("Wrote {} ({})", acl_uri, access))
    }
}

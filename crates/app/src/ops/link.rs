use clap::Args;

use common::agent::{GraphError, LinkType};

#[derive(Args, Debug, Clone)]
pub struct Link {
    /// Node the link starts from; the triple is written to its document
    pub start: String,

    /// generic, knows or passport
    pub link_type: LinkType,

    pub end: String,

    /// Ask the renderer to draw the new neighbour
    #[arg(long)]
    pub draw: bool,
}

#[async_trait::async_trait]
impl crate::op::Op for Link {
    type Error = GraphError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        match ctx
            .agent
            .link_nodes(&self.start, self.link_type, &self.end, self.draw)
            .await
        {
            Ok(()) => Ok(format!(
                "Linked {} -[{}]-> {}",
                self.start, self.link_type, self.end
            )),
            Err(e) if e.is_duplicate() => Ok(format!(
                "{} is already linked to {} ({})",
                self.start, self.end, self.link_type
            )),
            Err(e) => Err(e),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct Unlink {
    pub start: String,

    /// generic, knows or passport
    pub link_type: LinkType,

    pub end: String,
}

#[async_trait::async_trait]
impl crate::op::Op for Unlink {
    type Error = GraphError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        ctx.agent
            .unlink_nodes(&self.start, self.link_type, &self.end)
            .await?;
        Ok(format!(
            "Unlinked {} -[{}]-> {}",
            self.start, self.link_type, self.end
        ))
    }
}

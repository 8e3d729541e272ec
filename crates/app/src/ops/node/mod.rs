use clap::{Args, Subcommand};

pub mod create;
pub mod rm;
pub mod show;

use crate::op::Op;

crate::command_enum! {
    (Create, create::Create),
    (Show, show::Show),
    (Rm, rm::Rm),
}

pub type NodeCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Node {
    #[command(subcommand)]
    pub command: NodeCommand,
}

#[async_trait::async_trait]
impl Op for Node {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

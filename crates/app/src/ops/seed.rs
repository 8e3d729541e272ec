use std::path::PathBuf;

use clap::Args;

use common::seed::{Blueprint, SeedError, SeedWriter};

#[derive(Args, Debug, Clone)]
pub struct Seed {
    /// JSON blueprint describing servers and people
    #[arg(long)]
    pub blueprint: PathBuf,

    /// Write LDP containers under this directory
    #[arg(long, group = "target")]
    pub out: Option<PathBuf>,

    /// Don't create an ldpc-{server} directory per server
    #[arg(long, requires = "out")]
    pub flatten: bool,

    /// PUT the documents to their servers instead
    #[arg(long, group = "target")]
    pub publish: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedOpError {
    #[error("seed error: {0}")]
    Seed(#[from] SeedError),
    #[error("either --out or --publish must be provided")]
    NoTarget,
}

#[async_trait::async_trait]
impl crate::op::Op for Seed {
    type Error = SeedOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let writer = SeedWriter::new(Blueprint::load(&self.blueprint)?);

        if let Some(out) = &self.out {
            let written = writer.write_containers(out, self.flatten)?;
            Ok(format!("Wrote {} documents under {}", written, out.display()))
        } else if self.publish {
            let published = writer.publish(ctx.agent.store()).await?;
            Ok(format!("Published {} documents", published))
        } else {
            Err(SeedOpError::NoTarget)
        }
    }
}

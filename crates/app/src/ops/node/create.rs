use std::path::PathBuf;

use clap::Args;

use common::agent::{FileUpload, GraphError, ImageSource, NodeInfo, NodeKind};

#[derive(Args, Debug, Clone)]
pub struct Create {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// text, image or passport
    #[arg(long, default_value = "text")]
    pub kind: NodeKind,

    /// Image that already lives somewhere
    #[arg(long, conflicts_with = "image_file")]
    pub image_uri: Option<String>,

    /// Local image to upload next to the node
    #[arg(long)]
    pub image_file: Option<PathBuf>,

    /// Do not grant public read access
    #[arg(long)]
    pub confidential: bool,

    /// Node to create under (defaults to the session WebID)
    #[arg(long)]
    pub center: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("could not read {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

impl Create {
    async fn image(&self) -> Result<Option<ImageSource>, CreateError> {
        if let Some(uri) = &self.image_uri {
            return Ok(Some(ImageSource::Uri(uri.clone())));
        }
        let Some(path) = &self.image_file else {
            return Ok(None);
        };

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| CreateError::Read(path.clone(), e))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image");
        Ok(Some(ImageSource::File(FileUpload::new(name, bytes))))
    }
}

#[async_trait::async_trait]
impl crate::op::Op for Create {
    type Error = CreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let web_id = ctx.web_id().ok_or(GraphError::NoWebId)?;
        let center_uri = self.center.as_deref().unwrap_or(web_id);

        let center = ctx.agent.center_node(center_uri).await?;
        let info = NodeInfo {
            title: self.title.clone(),
            description: self.description.clone(),
            kind: self.kind,
            image: self.image().await?,
            confidential: self.confidential,
        };

        let uri = ctx.agent.create_node(web_id, &center, &info).await?;
        Ok(format!("Created {} under {}", uri, center.storage))
    }
}

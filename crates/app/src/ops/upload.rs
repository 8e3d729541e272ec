use std::path::PathBuf;

use clap::Args;

use common::agent::{FileUpload, GraphError};

#[derive(Args, Debug, Clone)]
pub struct Upload {
    /// Local file to upload
    pub file: PathBuf,

    /// Container the file goes under (stored at `{container}files/`)
    #[arg(long)]
    pub container: String,

    /// Exact target URI instead of a generated one
    #[arg(long)]
    pub to: Option<String>,

    /// Do not grant public read access
    #[arg(long)]
    pub confidential: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("could not read {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("not a file name: {0}")]
    InvalidName(PathBuf),
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

#[async_trait::async_trait]
impl crate::op::Op for Upload {
    type Error = UploadError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let name = self
            .file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| UploadError::InvalidName(self.file.clone()))?;
        let bytes = tokio::fs::read(&self.file)
            .await
            .map_err(|e| UploadError::Read(self.file.clone(), e))?;

        let upload = FileUpload::new(name, bytes);
        let uri = ctx
            .agent
            .store_file(
                self.to.as_deref(),
                &self.container,
                &upload,
                self.confidential,
            )
            .await?;

        Ok(format!(
            "Uploaded {} ({}, {} bytes) to {}",
            self.file.display(),
            upload.content_type(),
            upload.bytes.len(),
            uri
        ))
    }
}

use std::str::FromStr;

use bytes::Bytes;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::dispatch::GraphEvent;
use crate::ldp::{LdpStore, TURTLE};
use crate::rdf::{Literal, Term, Writer, PRED};
use crate::util::random_string;

use super::convert::NodeModel;
use super::graph::CenterNode;
use super::link::LinkType;
use super::{GraphAgent, GraphError};

/// Length of the random names given to new documents and files
const NAME_LEN: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Text,
    Image,
    Passport,
}

impl FromStr for NodeKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(NodeKind::Text),
            "image" => Ok(NodeKind::Image),
            "passport" => Ok(NodeKind::Passport),
            other => Err(GraphError::UnknownNodeType(other.to_string())),
        }
    }
}

/// File contents to be uploaded next to a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Explicit content type, or one guessed from the file name
    pub fn content_type(&self) -> String {
        self.content_type.clone().unwrap_or_else(|| {
            mime_guess::from_path(&self.name)
                .first_or_octet_stream()
                .to_string()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// An image that already lives somewhere
    Uri(String),
    /// Bytes to upload into the node's storage
    File(FileUpload),
}

/// What the user filled in when creating a node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: NodeKind,
    pub image: Option<ImageSource>,
    pub confidential: bool,
}

/// Result of checking one node's image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageCheck {
    NoImage,
    Available { uri: String },
    /// The image could not be reached and was removed from the node
    Cleared { uri: String, reason: String },
}

impl<S: LdpStore> GraphAgent<S> {
    /// Add the triples every node document starts with.
    pub fn base_node(
        &self,
        uri: &str,
        writer: &mut Writer,
        title: Option<&str>,
        description: Option<&str>,
        kind: NodeKind,
        center: &CenterNode,
    ) -> Result<(), GraphError> {
        if uri.is_empty() {
            return Err(GraphError::MissingArgument("base_node"));
        }

        let subject = Term::iri(uri);
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            writer.add_triple(subject.clone(), PRED.title, Literal::simple(title));
        }
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            writer.add_triple(subject.clone(), PRED.description, Literal::simple(description));
        }
        writer
            .add_triple(subject.clone(), PRED.storage, Term::iri(&center.storage))
            .add_triple(subject.clone(), PRED.maker, Term::iri(&center.uri));

        let class = match kind {
            NodeKind::Image => PRED.class_image,
            NodeKind::Text | NodeKind::Passport => PRED.class_document,
        };
        writer.add_triple(subject, PRED.r#type, class);
        Ok(())
    }

    /// Attach an image to the node at `uri`.
    ///
    /// File images are uploaded to `{dst_container}files/`; the URI they
    /// were stored at is returned.
    pub async fn add_image(
        &self,
        uri: &str,
        dst_container: &str,
        writer: &mut Writer,
        image: &ImageSource,
        confidential: bool,
    ) -> Result<Option<String>, GraphError> {
        if uri.is_empty() || dst_container.is_empty() {
            return Err(GraphError::MissingArgument("add_image"));
        }

        match image {
            ImageSource::Uri(image_uri) => {
                writer.add_triple(Term::iri(uri), PRED.image, Literal::simple(image_uri));
                Ok(None)
            }
            ImageSource::File(file) => {
                let image_uri = format!("{}files/{}", dst_container, random_string(NAME_LEN));
                writer.add_triple(Term::iri(uri), PRED.image, Literal::simple(&image_uri));
                let stored = self
                    .store_file(Some(&image_uri), dst_container, file, confidential)
                    .await?;
                Ok(Some(stored))
            }
        }
    }

    /// Create a node document in the center's storage and link it from the
    /// center. Returns the new node's URI.
    ///
    /// Stages run in order and the first failure aborts the rest; what was
    /// already written stays written.
    pub async fn create_node(
        &self,
        current_user: &str,
        center: &CenterNode,
        info: &NodeInfo,
    ) -> Result<String, GraphError> {
        let uri = format!("{}{}", center.storage, random_string(NAME_LEN));
        tracing::info!("creating {:?} node {}", info.kind, uri);

        self.create_acl(&uri, current_user, info.confidential)
            .await?;

        let mut writer = Writer::new();
        self.base_node(
            &uri,
            &mut writer,
            info.title.as_deref(),
            info.description.as_deref(),
            info.kind,
            center,
        )?;

        if let Some(image) = &info.image {
            self.add_image(&uri, &center.storage, &mut writer, image, info.confidential)
                .await?;
        }

        self.store()
            .put(&uri, Bytes::from(writer.end()?), TURTLE)
            .await?;

        let link = match info.kind {
            NodeKind::Passport => LinkType::Passport,
            NodeKind::Text | NodeKind::Image => LinkType::Generic,
        };
        self.link_nodes(&center.uri, link, &uri, false).await?;

        self.dispatcher()
            .dispatch(GraphEvent::NodeCreated { uri: uri.clone() });
        Ok(uri)
    }

    /// Upload a file on behalf of the signed-in user.
    pub async fn store_file(
        &self,
        final_uri: Option<&str>,
        dst_container: &str,
        file: &FileUpload,
        confidential: bool,
    ) -> Result<String, GraphError> {
        let web_id = self.session().web_id().ok_or(GraphError::NoWebId)?;
        let uri = match final_uri {
            Some(uri) => uri.to_string(),
            None => format!(
                "{}files/{}-{}",
                dst_container,
                random_string(NAME_LEN),
                file.name
            ),
        };

        self.create_acl(&uri, web_id, confidential).await?;

        let content_type = file.content_type();
        self.store()
            .put(&uri, file.bytes.clone(), &content_type)
            .await
            .map_err(|e| GraphError::Upload(uri.clone(), e))?;

        tracing::info!("stored {} ({}, {} bytes)", uri, content_type, file.bytes.len());
        Ok(uri)
    }

    /// Delete a resource. Its ACL is left in place since it may govern
    /// other resources as well.
    pub async fn delete_file(&self, uri: &str) -> Result<(), GraphError> {
        self.store().delete(uri).await?;
        tracing::info!("deleted {}", uri);
        self.dispatcher()
            .dispatch(GraphEvent::NodeDeleted { uri: uri.to_string() });
        Ok(())
    }

    /// HEAD every node image; unreachable images are removed from their node.
    pub async fn check_images(&self, nodes: &mut [NodeModel]) -> Vec<ImageCheck> {
        let results = join_all(nodes.iter().map(|node| async move {
            match node.img.as_deref() {
                Some(img) => Some(self.store().head(img).await),
                None => None,
            }
        }))
        .await;

        nodes
            .iter_mut()
            .zip(results)
            .map(|(node, result)| match (node.img.take(), result) {
                (Some(uri), Some(Ok(()))) => {
                    node.img = Some(uri.clone());
                    ImageCheck::Available { uri }
                }
                (Some(uri), Some(Err(e))) => {
                    tracing::warn!("image {} of {} is unreachable: {}", uri, node.uri, e);
                    ImageCheck::Cleared {
                        uri,
                        reason: e.to_string(),
                    }
                }
                _ => ImageCheck::NoImage,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_parse() {
        assert_eq!("image".parse::<NodeKind>().unwrap(), NodeKind::Image);
        assert_eq!("passport".parse::<NodeKind>().unwrap(), NodeKind::Passport);
        assert!(matches!(
            "video".parse::<NodeKind>(),
            Err(GraphError::UnknownNodeType(_))
        ));
    }

    #[test]
    fn test_upload_content_type() {
        let png = FileUpload::new("beach.png", Bytes::from_static(b"\x89PNG"));
        assert_eq!(png.content_type(), "image/png");

        let unknown = FileUpload::new("notes", Bytes::new());
        assert_eq!(unknown.content_type(), "application/octet-stream");

        let explicit = FileUpload {
            content_type: Some("image/jpeg".to_string()),
            ..unknown
        };
        assert_eq!(explicit.content_type(), "image/jpeg");
    }
}

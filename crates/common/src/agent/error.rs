use reqwest::StatusCode;

use crate::ldp::LdpError;
use crate::rdf::{RdfError, Triple};

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("{0}: not enough arguments")]
    MissingArgument(&'static str),
    #[error("resource {uri} unavailable ({status})")]
    Unavailable { uri: String, status: StatusCode },
    /// The triple being written already exists
    #[error("DUPLICATE")]
    Duplicate(Triple),
    #[error("no webId detected")]
    NoWebId,
    #[error("no storage advertised by {0}")]
    MissingStorage(String),
    #[error("could not upload {0}: {1}")]
    Upload(String, #[source] LdpError),
    #[error("unknown link type: {0}")]
    UnknownLinkType(String),
    #[error("unknown node type: {0}")]
    UnknownNodeType(String),
    #[error("ldp error: {0}")]
    Ldp(#[from] LdpError),
    #[error("rdf error: {0}")]
    Rdf(#[from] RdfError),
}

impl GraphError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, GraphError::Duplicate(_))
    }
}

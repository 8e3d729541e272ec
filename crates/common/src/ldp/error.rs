use reqwest::StatusCode;

use crate::rdf::RdfError;

use super::patch::PatchError;

#[derive(Debug, thiserror::Error)]
pub enum LdpError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("HTTP status {0} for {1}")]
    HttpStatus(StatusCode, String),
    #[error("resource unreachable: {0}")]
    Unreachable(String),
    #[error("rdf error: {0}")]
    Rdf(#[from] RdfError),
    #[error("patch error: {0}")]
    Patch(#[from] PatchError),
}

impl LdpError {
    /// The HTTP status the server answered with, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            LdpError::HttpStatus(status, _) => Some(*status),
            LdpError::Reqwest(e) => e.status(),
            _ => None,
        }
    }
}

//! Linked Data Platform client layer
//!
//! Everything the agents know about the outside world goes through the
//! [`LdpStore`] capability:
//!
//! - **[`HttpLdpClient`]**: talks to real Solid servers, optionally through a [`Proxy`]
//! - **[`MemoryLdpStore`]**: in-process store used by tests and the dev server
//!
//! Writes to existing documents are expressed as a [`SparqlPatch`], which
//! both implementations understand.

mod client;
mod error;
pub mod memory;
pub mod patch;
mod proxy;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;

use crate::rdf::{document_uri, RdfDocument, Triple, TriplePattern};

pub use client::{HttpLdpClient, HttpLdpClientConfig};
pub use error::LdpError;
pub use memory::{MemoryLdpStore, Resource, ResourceStore};
pub use patch::{PatchError, SparqlPatch};
pub use proxy::Proxy;

pub const TURTLE: &str = "text/turtle";
pub const SPARQL_UPDATE: &str = "application/sparql-update";

/// Outcome of fetching an RDF resource.
///
/// A non-2xx answer is not an error at this level: the graph assembler
/// needs the status to decide how to present the resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Document(RdfDocument),
    Unavailable { status: StatusCode },
}

impl Fetched {
    pub fn document(self) -> Option<RdfDocument> {
        match self {
            Fetched::Document(doc) => Some(doc),
            Fetched::Unavailable { .. } => None,
        }
    }
}

#[async_trait]
pub trait LdpStore: Send + Sync + std::fmt::Debug {
    /// GET a Turtle resource and parse it.
    ///
    /// # Returns
    /// * `Ok(Fetched::Document)` - the parsed triples and prefixes
    /// * `Ok(Fetched::Unavailable)` - the server answered with a non-2xx status
    /// * `Err(LdpError)` - the resource could not be reached or parsed
    async fn fetch_triples(&self, uri: &str) -> Result<Fetched, LdpError>;

    /// HEAD a resource; any non-2xx status is an error.
    async fn head(&self, uri: &str) -> Result<(), LdpError>;

    /// Create or replace a resource.
    async fn put(&self, uri: &str, body: Bytes, content_type: &str) -> Result<(), LdpError>;

    /// Apply a patch to an RDF resource.
    async fn patch(&self, uri: &str, patch: &SparqlPatch) -> Result<(), LdpError>;

    async fn delete(&self, uri: &str) -> Result<(), LdpError>;

    /// Fetch the document at `uri` and return the triples matching `pattern`.
    ///
    /// A document that cannot be fetched with a non-2xx status matches
    /// nothing; transport failures are still errors.
    async fn find_triples(
        &self,
        uri: &str,
        pattern: &TriplePattern,
    ) -> Result<Vec<Triple>, LdpError> {
        match self.fetch_triples(document_uri(uri)).await? {
            Fetched::Document(doc) => Ok(doc.find(pattern).into_iter().cloned().collect()),
            Fetched::Unavailable { status } => {
                tracing::debug!("find_triples: {} unavailable ({})", uri, status);
                Ok(Vec::new())
            }
        }
    }
}

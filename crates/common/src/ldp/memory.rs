use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::{Mutex, RwLock};
use reqwest::{Method, StatusCode};

use crate::rdf::{document_uri, turtle, RdfDocument, RdfError, Triple};

use super::patch::{PatchError, SparqlPatch};
use super::{Fetched, LdpError, LdpStore, TURTLE};

/// A stored resource: raw bytes plus the content type they were PUT with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub content_type: String,
    pub body: Bytes,
}

impl Resource {
    pub fn turtle(body: impl Into<Bytes>) -> Self {
        Self {
            content_type: TURTLE.to_string(),
            body: body.into(),
        }
    }

    pub fn is_turtle(&self) -> bool {
        self.content_type.starts_with(TURTLE)
    }
}

/// Resources keyed by document URI (fragments are ignored).
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    inner: Arc<RwLock<BTreeMap<String, Resource>>>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, uri: &str) -> Option<Resource> {
        self.inner.read().get(document_uri(uri)).cloned()
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.inner.read().contains_key(document_uri(uri))
    }

    /// Store a resource, returning `true` if it did not exist before
    pub fn put(&self, uri: &str, resource: Resource) -> bool {
        self.inner
            .write()
            .insert(document_uri(uri).to_string(), resource)
            .is_none()
    }

    pub fn delete(&self, uri: &str) -> Option<Resource> {
        self.inner.write().remove(document_uri(uri))
    }

    /// Parsed triples of a Turtle resource; `None` if it does not exist
    pub fn triples(&self, uri: &str) -> Result<Option<Vec<Triple>>, RdfError> {
        let uri = document_uri(uri);
        match self.get(uri) {
            Some(resource) => {
                let text = String::from_utf8(resource.body.to_vec())?;
                Ok(Some(turtle::parse(&text, uri)?))
            }
            None => Ok(None),
        }
    }

    /// Apply a patch, creating the document if it does not exist yet.
    pub fn patch(&self, uri: &str, patch: &SparqlPatch) -> Result<(), PatchError> {
        let uri = document_uri(uri);
        // hold the write lock across read-modify-write
        let mut inner = self.inner.write();
        let mut triples = match inner.get(uri) {
            Some(resource) => {
                let text = String::from_utf8(resource.body.to_vec()).map_err(RdfError::from)?;
                turtle::parse(&text, uri)?
            }
            None => Vec::new(),
        };
        patch.apply(&mut triples)?;
        let body = turtle::to_turtle(&triples)?;
        inner.insert(uri.to_string(), Resource::turtle(body));
        Ok(())
    }

    pub fn uris(&self) -> Vec<String> {
        self.inner.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fault {
    Status(StatusCode),
    Unreachable,
}

/// A request seen by [`MemoryLdpStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub uri: String,
}

/// In-memory [`LdpStore`] with fault injection and a request log.
#[derive(Debug, Clone, Default)]
pub struct MemoryLdpStore {
    resources: ResourceStore,
    faults: Arc<RwLock<HashMap<String, Fault>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl MemoryLdpStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resources(resources: ResourceStore) -> Self {
        Self {
            resources,
            ..Self::default()
        }
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    /// Seed a Turtle document
    pub fn insert_turtle(&self, uri: &str, body: &str) {
        self.resources
            .put(uri, Resource::turtle(body.as_bytes().to_vec()));
    }

    /// Every request against `uri` answers with `status`
    pub fn set_status(&self, uri: &str, status: StatusCode) {
        self.faults
            .write()
            .insert(document_uri(uri).to_string(), Fault::Status(status));
    }

    /// Every request against `uri` fails before reaching the server
    pub fn set_unreachable(&self, uri: &str) {
        self.faults
            .write()
            .insert(document_uri(uri).to_string(), Fault::Unreachable);
    }

    pub fn clear_fault(&self, uri: &str) {
        self.faults.write().remove(document_uri(uri));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// Number of requests made with `method`
    pub fn count(&self, method: &Method) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| &r.method == method)
            .count()
    }

    /// Parsed document at `uri`, for assertions
    pub fn document(&self, uri: &str) -> Option<RdfDocument> {
        self.resources
            .triples(uri)
            .ok()
            .flatten()
            .map(|triples| RdfDocument {
                triples,
                ..RdfDocument::default()
            })
    }

    fn record(&self, method: Method, uri: &str) -> Result<(), LdpError> {
        self.requests.lock().push(Request {
            method,
            uri: uri.to_string(),
        });
        match self.faults.read().get(document_uri(uri)) {
            Some(Fault::Status(status)) => Err(LdpError::HttpStatus(*status, uri.to_string())),
            Some(Fault::Unreachable) => Err(LdpError::Unreachable(uri.to_string())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LdpStore for MemoryLdpStore {
    async fn fetch_triples(&self, uri: &str) -> Result<Fetched, LdpError> {
        match self.record(Method::GET, uri) {
            Err(LdpError::HttpStatus(status, _)) => return Ok(Fetched::Unavailable { status }),
            Err(e) => return Err(e),
            Ok(()) => {}
        }
        let doc_uri = document_uri(uri);
        match self.resources.get(doc_uri) {
            Some(resource) => {
                let text = String::from_utf8(resource.body.to_vec()).map_err(RdfError::from)?;
                Ok(Fetched::Document(RdfDocument::parse(&text, doc_uri)?))
            }
            None => Ok(Fetched::Unavailable {
                status: StatusCode::NOT_FOUND,
            }),
        }
    }

    async fn head(&self, uri: &str) -> Result<(), LdpError> {
        self.record(Method::HEAD, uri)?;
        if self.resources.contains(uri) {
            Ok(())
        } else {
            Err(LdpError::HttpStatus(StatusCode::NOT_FOUND, uri.to_string()))
        }
    }

    async fn put(&self, uri: &str, body: Bytes, content_type: &str) -> Result<(), LdpError> {
        self.record(Method::PUT, uri)?;
        self.resources.put(
            uri,
            Resource {
                content_type: content_type.to_string(),
                body,
            },
        );
        Ok(())
    }

    async fn patch(&self, uri: &str, patch: &SparqlPatch) -> Result<(), LdpError> {
        self.record(Method::PATCH, uri)?;
        match self.resources.patch(uri, patch) {
            Ok(()) => Ok(()),
            Err(PatchError::MissingTriple(_)) => {
                Err(LdpError::HttpStatus(StatusCode::CONFLICT, uri.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, uri: &str) -> Result<(), LdpError> {
        self.record(Method::DELETE, uri)?;
        match self.resources.delete(uri) {
            Some(_) => Ok(()),
            None => Err(LdpError::HttpStatus(StatusCode::NOT_FOUND, uri.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{Literal, TriplePattern, PRED};

    const DOC: &str = "https://alice.example/storage/abcde";

    #[tokio::test]
    async fn test_fetch_missing_is_unavailable() {
        let store = MemoryLdpStore::new();
        let fetched = store.fetch_triples(DOC).await.unwrap();
        assert_eq!(
            fetched,
            Fetched::Unavailable {
                status: StatusCode::NOT_FOUND
            }
        );
    }

    #[tokio::test]
    async fn test_faults() {
        let store = MemoryLdpStore::new();
        store.insert_turtle(DOC, "<> <http://purl.org/dc/terms/title> \"x\" .");

        store.set_status(DOC, StatusCode::FORBIDDEN);
        assert_eq!(
            store.fetch_triples(DOC).await.unwrap(),
            Fetched::Unavailable {
                status: StatusCode::FORBIDDEN
            }
        );
        assert!(matches!(
            store.head(DOC).await,
            Err(LdpError::HttpStatus(StatusCode::FORBIDDEN, _))
        ));

        store.set_unreachable(DOC);
        assert!(matches!(
            store.fetch_triples(DOC).await,
            Err(LdpError::Unreachable(_))
        ));

        store.clear_fault(DOC);
        assert!(store.head(DOC).await.is_ok());
        assert_eq!(store.count(&Method::HEAD), 2);
    }

    #[tokio::test]
    async fn test_patch_creates_and_extends() {
        let store = MemoryLdpStore::new();
        let title = Triple::new(DOC, PRED.title, Literal::simple("Trip"));

        store
            .patch(DOC, &SparqlPatch::insert(vec![title.clone()]))
            .await
            .unwrap();
        let found = store
            .find_triples(&format!("{DOC}#it"), &TriplePattern::exact(&title))
            .await
            .unwrap();
        assert_eq!(found, vec![title.clone()]);

        let missing = Triple::new(DOC, PRED.title, Literal::simple("Other"));
        assert!(matches!(
            store.patch(DOC, &SparqlPatch::delete(vec![missing])).await,
            Err(LdpError::HttpStatus(StatusCode::CONFLICT, _))
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryLdpStore::new();
        store
            .put(DOC, Bytes::from_static(b"binary"), "image/png")
            .await
            .unwrap();
        assert!(store.resources().get(DOC).is_some_and(|r| !r.is_turtle()));

        store.delete(DOC).await.unwrap();
        assert!(store.resources().is_empty());
        assert!(store.delete(DOC).await.is_err());
    }
}

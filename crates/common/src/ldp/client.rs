use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use url::Url;

use crate::rdf::{document_uri, RdfDocument};

use super::patch::SparqlPatch;
use super::proxy::Proxy;
use super::{Fetched, LdpError, LdpStore, SPARQL_UPDATE, TURTLE};

#[derive(Debug, Clone, Default)]
pub struct HttpLdpClientConfig {
    /// where to route requests; direct when unset
    pub proxy: Proxy,
    /// per-request timeout; requests may hang forever when unset
    pub timeout: Option<Duration>,
}

/// [`LdpStore`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpLdpClient {
    client: Client,
    proxy: Proxy,
}

impl HttpLdpClient {
    pub fn new(config: HttpLdpClientConfig) -> Result<Self, LdpError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            proxy: config.proxy,
        })
    }

    pub fn proxy(&self) -> &Proxy {
        &self.proxy
    }

    /// Get the underlying HTTP client for custom requests
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    fn url(&self, uri: &str) -> Result<Url, LdpError> {
        Ok(self.proxy.resolve(document_uri(uri))?)
    }

    fn check(response: Response, uri: &str) -> Result<Response, LdpError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(LdpError::HttpStatus(response.status(), uri.to_string()))
        }
    }
}

#[async_trait]
impl LdpStore for HttpLdpClient {
    async fn fetch_triples(&self, uri: &str) -> Result<Fetched, LdpError> {
        let doc_uri = document_uri(uri);
        let response = self
            .client
            .get(self.url(doc_uri)?)
            .header(ACCEPT, TURTLE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("GET {} answered {}", doc_uri, status);
            return Ok(Fetched::Unavailable { status });
        }

        let text = response.text().await?;
        Ok(Fetched::Document(RdfDocument::parse(&text, doc_uri)?))
    }

    async fn head(&self, uri: &str) -> Result<(), LdpError> {
        let response = self.client.head(self.url(uri)?).send().await?;
        Self::check(response, uri)?;
        Ok(())
    }

    async fn put(&self, uri: &str, body: Bytes, content_type: &str) -> Result<(), LdpError> {
        tracing::debug!("PUT {} ({}, {} bytes)", uri, content_type, body.len());
        let response = self
            .client
            .put(self.url(uri)?)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;
        Self::check(response, uri)?;
        Ok(())
    }

    async fn patch(&self, uri: &str, patch: &SparqlPatch) -> Result<(), LdpError> {
        let body = patch.to_sparql()?;
        tracing::debug!(
            "PATCH {} (-{} +{})",
            uri,
            patch.delete.len(),
            patch.insert.len()
        );
        let response = self
            .client
            .patch(self.url(uri)?)
            .header(CONTENT_TYPE, SPARQL_UPDATE)
            .body(body)
            .send()
            .await?;
        Self::check(response, uri)?;
        Ok(())
    }

    async fn delete(&self, uri: &str) -> Result<(), LdpError> {
        let response = self.client.delete(self.url(uri)?).send().await?;
        Self::check(response, uri)?;
        Ok(())
    }
}

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use url::Url;

use common::ldp::{PatchError, Resource, SparqlPatch, SPARQL_UPDATE};
use common::rdf::document_uri;

use super::handlers::not_found_handler;
use super::LocalState;

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    pub url: String,
}

/// `/proxy?url={uri}`: act on an absolute URI.
pub async fn proxy_handler(
    State(state): State<LocalState>,
    method: Method,
    Query(query): Query<ProxyQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match Url::parse(&query.url) {
        Ok(target) => handle(&state, method, target, headers, body).await,
        Err(e) => (StatusCode::BAD_REQUEST, format!("invalid url: {}", e)).into_response(),
    }
}

/// Any other path: act on the path resolved against the server's base URL.
pub async fn direct_handler(
    State(state): State<LocalState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match state.base_url.join(uri.path().trim_start_matches('/')) {
        Ok(target) => handle(&state, method, target, headers, body).await,
        Err(e) => (StatusCode::BAD_REQUEST, format!("invalid path: {}", e)).into_response(),
    }
}

async fn handle(
    state: &LocalState,
    method: Method,
    target: Url,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let uri = document_uri(target.as_str());
    let store = &state.store;

    match method {
        Method::GET | Method::HEAD => match store.get(uri) {
            Some(resource) => {
                let content_type = [(CONTENT_TYPE, resource.content_type)];
                if method == Method::HEAD {
                    (StatusCode::OK, content_type).into_response()
                } else {
                    (StatusCode::OK, content_type, resource.body).into_response()
                }
            }
            None => not_found_handler(headers).await,
        },
        Method::PUT => {
            let content_type = headers
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or(OCTET_STREAM)
                .to_string();
            let created = store.put(
                uri,
                Resource {
                    content_type,
                    body,
                },
            );
            tracing::info!("PUT {} (created: {})", uri, created);
            if created {
                StatusCode::CREATED.into_response()
            } else {
                StatusCode::NO_CONTENT.into_response()
            }
        }
        Method::PATCH => patch(state, uri, &headers, &body),
        Method::DELETE => match store.delete(uri) {
            Some(_) => {
                tracing::info!("DELETE {}", uri);
                StatusCode::NO_CONTENT.into_response()
            }
            None => not_found_handler(headers).await,
        },
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

fn patch(state: &LocalState, uri: &str, headers: &HeaderMap, body: &[u8]) -> Response {
    let is_sparql = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with(SPARQL_UPDATE));
    if !is_sparql {
        return (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            format!("expected {}", SPARQL_UPDATE),
        )
            .into_response();
    }

    let Ok(text) = std::str::from_utf8(body) else {
        return (StatusCode::BAD_REQUEST, "body is not utf-8").into_response();
    };
    let patch = match SparqlPatch::parse(text, uri) {
        Ok(patch) => patch,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    match state.store.patch(uri, &patch) {
        Ok(()) => {
            tracing::info!(
                "PATCH {} (-{} +{})",
                uri,
                patch.delete.len(),
                patch.insert.len()
            );
            StatusCode::OK.into_response()
        }
        Err(e @ PatchError::MissingTriple(_)) => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::warn!("PATCH {} failed: {}", uri, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;

use common::build_info;

use super::LocalState;

pub fn router() -> Router<LocalState> {
    Router::new()
        .route("/livez", get(livez))
        .route("/version", get(version))
}

#[tracing::instrument]
async fn livez() -> Response {
    let msg = serde_json::json!({"status": "ok"});
    (StatusCode::OK, Json(msg)).into_response()
}

#[tracing::instrument]
async fn version() -> Response {
    (StatusCode::OK, Json(build_info!())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handlers_direct() {
        assert_eq!(livez().await.status(), StatusCode::OK);
        assert_eq!(version().await.status(), StatusCode::OK);
    }
}

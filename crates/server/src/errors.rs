use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use service::envelope::{ActionError, ActionResult, Classify, ErrorKind};
use service::errors::ServiceError;

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Auth => StatusCode::UNAUTHORIZED,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// An [`ActionResult`] sent as JSON, with the status mirroring its kind.
#[derive(Debug)]
pub struct Envelope<T>(pub ActionResult<T>);

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = self.0.error().map(|e| status_for(e.kind)).unwrap_or(StatusCode::OK);
        (status, Json(self.0)).into_response()
    }
}

/// Failure of a page load. Pages do not use the envelope.
#[derive(Debug)]
pub struct ApiError(pub ActionError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        if e.kind() == ErrorKind::Internal {
            error!(error = %e, "page load failed");
        }
        Self(e.to_action_error())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind);
        (status, Json(serde_json::json!({"error": self.0}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::envelope::{handle_error, success};

    #[test]
    fn status_follows_kind() {
        assert_eq!(Envelope(success(1)).into_response().status(), StatusCode::OK);
        let res = Envelope(handle_error::<(), _>(ActionError::not_found("servicio not found"))).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let res = ApiError::from(ServiceError::Db("boom".into())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! Uniform outcome type for every state-changing operation.
//!
//! Mutations never let an error escape to the caller: they return
//! [`ActionResult::Ok`] through [`success`] or turn whatever went wrong
//! into [`ActionResult::Err`] through [`handle_error`], which classifies
//! the failure into the closed [`ErrorKind`] set.

use std::fmt;

use models::errors::ModelError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::auth::errors::AuthError;
use crate::errors::ServiceError;

/// Message returned for anything classified as [`ErrorKind::Internal`].
pub const INTERNAL_MESSAGE: &str = "unexpected error";

/// Closed set of failure categories a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    #[serde(rename = "ValidationError")]
    Validation,
    #[serde(rename = "AuthError")]
    Auth,
    #[serde(rename = "NotFoundError")]
    NotFound,
    #[serde(rename = "InternalError")]
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Auth => "AuthError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Internal => "InternalError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error that already carries its kind. Code that wants a specific
/// classification raises one of these; [`handle_error`] passes it through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{kind}: {message}")]
pub struct ActionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ActionError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self { Self::new(ErrorKind::Validation, message) }
    pub fn auth(message: impl Into<String>) -> Self { Self::new(ErrorKind::Auth, message) }
    pub fn not_found(message: impl Into<String>) -> Self { Self::new(ErrorKind::NotFound, message) }
    pub fn internal() -> Self { Self::new(ErrorKind::Internal, INTERNAL_MESSAGE) }
}

/// Errors that know which [`ErrorKind`] they belong to and what a caller may see.
pub trait Classify {
    fn kind(&self) -> ErrorKind;

    /// Caller-facing text. Internal failures never expose their details.
    fn public_message(&self) -> String;

    fn to_action_error(&self) -> ActionError {
        match self.kind() {
            ErrorKind::Internal => ActionError::internal(),
            kind => ActionError::new(kind, self.public_message()),
        }
    }
}

impl Classify for ActionError {
    fn kind(&self) -> ErrorKind { self.kind }
    fn public_message(&self) -> String { self.message.clone() }
    fn to_action_error(&self) -> ActionError { self.clone() }
}

impl Classify for ModelError {
    fn kind(&self) -> ErrorKind {
        match self {
            ModelError::Validation(_) | ModelError::Conflict(_) => ErrorKind::Validation,
            ModelError::NotFound(_) => ErrorKind::NotFound,
            ModelError::Db(_) => ErrorKind::Internal,
        }
    }

    fn public_message(&self) -> String {
        match self {
            ModelError::Validation(m) | ModelError::NotFound(m) => m.clone(),
            ModelError::Conflict(_) => "already exists".to_string(),
            ModelError::Db(_) => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl Classify for ServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Db(_) => ErrorKind::Internal,
            ServiceError::Model(inner) => inner.kind(),
        }
    }

    fn public_message(&self) -> String {
        match self {
            ServiceError::Validation(m) | ServiceError::NotFound(m) => m.clone(),
            ServiceError::Db(_) => INTERNAL_MESSAGE.to_string(),
            ServiceError::Model(inner) => inner.public_message(),
        }
    }
}

impl Classify for sea_orm::DbErr {
    fn kind(&self) -> ErrorKind {
        match self {
            sea_orm::DbErr::RecordNotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Internal,
        }
    }

    fn public_message(&self) -> String {
        match self {
            sea_orm::DbErr::RecordNotFound(_) => "record not found".to_string(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }
}

/// Tagged outcome of a mutation. Exactly one of `data` / `error` exists.
///
/// Serialized as `{"status":"ok","data":…}` or
/// `{"status":"error","error":{"kind":…,"message":…}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ActionResult<T> {
    #[serde(rename = "ok")]
    Ok { data: T },
    #[serde(rename = "error")]
    Err { error: ActionError },
}

impl<T> ActionResult<T> {
    pub fn is_ok(&self) -> bool { matches!(self, ActionResult::Ok { .. }) }

    pub fn is_err(&self) -> bool { !self.is_ok() }

    pub fn data(&self) -> Option<&T> {
        match self {
            ActionResult::Ok { data } => Some(data),
            ActionResult::Err { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ActionError> {
        match self {
            ActionResult::Ok { .. } => None,
            ActionResult::Err { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, ActionError> {
        match self {
            ActionResult::Ok { data } => Ok(data),
            ActionResult::Err { error } => Err(error),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ActionResult<U> {
        match self {
            ActionResult::Ok { data } => ActionResult::Ok { data: f(data) },
            ActionResult::Err { error } => ActionResult::Err { error },
        }
    }
}

impl<T, E> From<Result<T, E>> for ActionResult<T>
where
    E: Into<anyhow::Error>,
{
    fn from(res: Result<T, E>) -> Self {
        match res {
            Ok(data) => success(data),
            Err(e) => handle_error(e),
        }
    }
}

/// Wrap a value in the success variant.
///
/// ```
/// use service::envelope::success;
/// let res = success(7);
/// assert_eq!(res.data(), Some(&7));
/// assert!(res.error().is_none());
/// ```
pub fn success<T>(value: T) -> ActionResult<T> {
    ActionResult::Ok { data: value }
}

/// Convert any failure into the error variant. Never panics.
///
/// ```
/// use service::envelope::{handle_error, ActionResult, ErrorKind};
/// use service::errors::ServiceError;
/// let res: ActionResult<()> = handle_error(ServiceError::Validation("name required".into()));
/// let err = res.error().unwrap();
/// assert_eq!(err.kind, ErrorKind::Validation);
/// assert_eq!(err.message, "name required");
/// ```
pub fn handle_error<T, E>(error: E) -> ActionResult<T>
where
    E: Into<anyhow::Error>,
{
    let error: anyhow::Error = error.into();
    let classified = classify(&error);
    match classified.kind {
        ErrorKind::Internal => error!(error = %format!("{error:#}"), "action failed"),
        kind => warn!(%kind, message = %classified.message, "action rejected"),
    }
    ActionResult::Err { error: classified }
}

/// Walk the source chain and classify by the first recognized error type.
pub fn classify(error: &anyhow::Error) -> ActionError {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<ActionError>() {
            return e.to_action_error();
        }
        if let Some(e) = cause.downcast_ref::<ServiceError>() {
            return e.to_action_error();
        }
        if let Some(e) = cause.downcast_ref::<AuthError>() {
            return e.to_action_error();
        }
        if let Some(e) = cause.downcast_ref::<ModelError>() {
            return e.to_action_error();
        }
        if let Some(e) = cause.downcast_ref::<sea_orm::DbErr>() {
            return e.to_action_error();
        }
    }
    ActionError::internal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use serde_json::json;

    #[test]
    fn success_holds_exactly_the_value() {
        let res = success(vec![1, 2, 3]);
        assert!(res.is_ok());
        assert_eq!(res.data(), Some(&vec![1, 2, 3]));
        assert!(res.error().is_none());
        assert_eq!(res.into_result().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn tagged_action_error_keeps_its_kind() {
        let res: ActionResult<()> = handle_error(ActionError::not_found("servicio not found"));
        assert!(res.data().is_none());
        assert_eq!(res.error(), Some(&ActionError::not_found("servicio not found")));
    }

    #[test]
    fn service_errors_map_to_kinds() {
        let cases: Vec<(ServiceError, ErrorKind, &str)> = vec![
            (ServiceError::Validation("name required".into()), ErrorKind::Validation, "name required"),
            (ServiceError::not_found("profile"), ErrorKind::NotFound, "profile not found"),
            (ServiceError::Db("connection reset".into()), ErrorKind::Internal, INTERNAL_MESSAGE),
            (ModelError::Validation("price must be >= 0".into()).into(), ErrorKind::Validation, "price must be >= 0"),
        ];
        for (err, kind, message) in cases {
            let res: ActionResult<()> = handle_error(err);
            let got = res.error().unwrap();
            assert_eq!(got.kind, kind);
            assert_eq!(got.message, message);
        }
    }

    #[test]
    fn auth_errors_map_to_auth_kind() {
        let res: ActionResult<()> = handle_error(AuthError::MissingSession);
        assert_eq!(res.error().unwrap().kind, ErrorKind::Auth);
        let res: ActionResult<()> = handle_error(AuthError::InvalidSession("bad signature".into()));
        let err = res.error().unwrap();
        assert_eq!(err.kind, ErrorKind::Auth);
        assert!(!err.message.contains("signature"));
    }

    #[test]
    fn untyped_errors_fall_back_to_internal() {
        let res: ActionResult<()> = handle_error(anyhow::anyhow!("socket closed"));
        assert_eq!(res.error(), Some(&ActionError::internal()));
        let res: ActionResult<()> = handle_error(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(res.error().unwrap().kind, ErrorKind::Internal);
    }

    #[test]
    fn context_wrapping_still_finds_the_kind() {
        let wrapped = Err::<(), _>(ServiceError::not_found("servicio"))
            .context("deleting servicio")
            .unwrap_err();
        let res: ActionResult<()> = handle_error(wrapped);
        assert_eq!(res.error().unwrap().kind, ErrorKind::NotFound);
    }

    #[test]
    fn db_record_not_found_is_not_found() {
        let res: ActionResult<()> = handle_error(sea_orm::DbErr::RecordNotFound("profile".into()));
        assert_eq!(res.error().unwrap().kind, ErrorKind::NotFound);
        let res: ActionResult<()> = handle_error(sea_orm::DbErr::Custom("boom".into()));
        assert_eq!(res.error().unwrap().message, INTERNAL_MESSAGE);
    }

    #[test]
    fn constructors_are_idempotent() {
        assert_eq!(success("a"), success("a"));
        let a: ActionResult<u8> = handle_error(ServiceError::Validation("x".into()));
        let b: ActionResult<u8> = handle_error(ServiceError::Validation("x".into()));
        assert_eq!(a, b);
    }

    #[test]
    fn from_result_routes_through_the_constructors() {
        let ok: ActionResult<u8> = Ok::<u8, ServiceError>(3).into();
        assert_eq!(ok, success(3));
        let err: ActionResult<u8> = Err::<u8, _>(ServiceError::not_found("x")).into();
        assert_eq!(err.error().unwrap().kind, ErrorKind::NotFound);
    }

    #[test]
    fn wire_shape() {
        assert_eq!(serde_json::to_value(success(json!({"id": 1}))).unwrap(), json!({"status": "ok", "data": {"id": 1}}));
        let err: ActionResult<()> = handle_error(ServiceError::Validation("name required".into()));
        assert_eq!(
            serde_json::to_value(err).unwrap(),
            json!({"status": "error", "error": {"kind": "ValidationError", "message": "name required"}})
        );
        let back: ActionResult<u32> = serde_json::from_value(json!({"status": "ok", "data": 5})).unwrap();
        assert_eq!(back, success(5));
    }
}

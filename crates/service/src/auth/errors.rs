use thiserror::Error;

use crate::envelope::{Classify, ErrorKind, INTERNAL_MESSAGE};

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("account already exists")]
    Conflict,
    #[error("account not found")]
    NotFound,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("no active session")]
    MissingSession,
    #[error("invalid session: {0}")]
    InvalidSession(String),
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::NotFound => 1003,
            AuthError::Unauthorized => 1004,
            AuthError::MissingSession => 1005,
            AuthError::InvalidSession(_) => 1006,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<models::errors::ModelError> for AuthError {
    fn from(e: models::errors::ModelError) -> Self {
        use models::errors::ModelError;
        match e {
            ModelError::Validation(m) => AuthError::Validation(m),
            ModelError::NotFound(_) => AuthError::NotFound,
            ModelError::Conflict(_) => AuthError::Conflict,
            ModelError::Db(m) => AuthError::Repository(m),
        }
    }
}

impl Classify for AuthError {
    fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::Conflict => ErrorKind::Validation,
            AuthError::NotFound => ErrorKind::NotFound,
            AuthError::Unauthorized | AuthError::MissingSession | AuthError::InvalidSession(_) => ErrorKind::Auth,
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => ErrorKind::Internal,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AuthError::Validation(m) => m.clone(),
            // signature/expiry details stay in the logs
            AuthError::InvalidSession(_) => "invalid or expired session".to_string(),
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let all = [
            AuthError::Validation(String::new()),
            AuthError::Conflict,
            AuthError::NotFound,
            AuthError::Unauthorized,
            AuthError::MissingSession,
            AuthError::InvalidSession(String::new()),
            AuthError::HashError(String::new()),
            AuthError::TokenError(String::new()),
            AuthError::Repository(String::new()),
        ];
        let mut codes: Vec<u16> = all.iter().map(AuthError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn conflict_reads_as_validation() {
        let e = AuthError::Conflict.to_action_error();
        assert_eq!(e.kind, ErrorKind::Validation);
        assert_eq!(e.message, "account already exists");
    }

    #[test]
    fn unique_violation_on_provision_reads_as_conflict() {
        use crate::envelope::{handle_error, ActionError, ActionResult};
        use models::errors::ModelError;

        let e: AuthError = ModelError::Conflict("account_email_key".into()).into();
        assert!(matches!(e, AuthError::Conflict));
        let res: ActionResult<()> = handle_error(e);
        assert_eq!(res.error(), Some(&ActionError::validation("account already exists")));
    }
}

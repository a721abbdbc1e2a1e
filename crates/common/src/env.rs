//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the server binds.

use tracing::warn;

/// Ensure the JWT secret is not the development default outside of debug builds.
pub fn check_jwt_secret(secret: &str, dev_default: &str) -> anyhow::Result<()> {
    if secret.trim().is_empty() {
        return Err(anyhow::anyhow!("jwt secret must not be empty"));
    }
    if secret == dev_default {
        if cfg!(debug_assertions) {
            warn!("using development jwt secret; set JWT_SECRET before deploying");
        } else {
            return Err(anyhow::anyhow!("refusing to start a release build with the development jwt secret"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_rejected() {
        assert!(check_jwt_secret("  ", "dev").is_err());
    }

    #[test]
    fn custom_secret_accepted() {
        assert!(check_jwt_secret("a-real-secret", "dev").is_ok());
    }
}

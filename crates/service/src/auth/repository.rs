use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;

    /// Create the account, its credentials and its profile as one unit.
    async fn provision(&self, email: &str, name: &str, password_hash: String, password_algorithm: String) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, account_id: Uuid) -> Result<Option<Credentials>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use serde_json::{json, Map};
    use tokio::sync::RwLock;

    use crate::envelope::Classify;
    use crate::profile::repository::{mock::MockProfileRepository, ProfileRepository};

    #[derive(Default)]
    pub struct MockAuthRepository {
        accounts: RwLock<HashMap<String, AuthUser>>, // key: normalized email
        creds: RwLock<HashMap<Uuid, Credentials>>,   // key: account_id
        profiles: Option<Arc<MockProfileRepository>>,
    }

    impl MockAuthRepository {
        /// Seed a profile in `profiles` for every provisioned account.
        pub fn with_profiles(profiles: Arc<MockProfileRepository>) -> Self {
            Self { profiles: Some(profiles), ..Default::default() }
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_account_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let accounts = self.accounts.read().await;
            Ok(accounts.get(&models::account::normalize_email(email)).cloned())
        }

        async fn provision(&self, email: &str, name: &str, password_hash: String, password_algorithm: String) -> Result<AuthUser, AuthError> {
            models::validation::validate_email(email)?;
            let key = models::account::normalize_email(email);
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&key) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser { id: Uuid::new_v4(), email: key.clone() };
            if let Some(profiles) = &self.profiles {
                let fields: Map<_, _> = json!({ "name": name }).as_object().cloned().unwrap_or_default();
                profiles
                    .create(user.id, fields)
                    .await
                    .map_err(|e| AuthError::Validation(e.public_message()))?;
            }
            accounts.insert(key, user.clone());
            self.creds.write().await.insert(user.id, Credentials { account_id: user.id, password_hash, password_algorithm });
            Ok(user)
        }

        async fn get_credentials(&self, account_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.read().await;
            Ok(creds.get(&account_id).cloned())
        }
    }
}

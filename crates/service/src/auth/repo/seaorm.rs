use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::account::find_by_email(&self.db, email).await?;
        Ok(res.map(|a| AuthUser { id: a.id, email: a.email }))
    }

    async fn provision(&self, email: &str, name: &str, password_hash: String, password_algorithm: String) -> Result<AuthUser, AuthError> {
        let txn = self.db.begin().await.map_err(|e| AuthError::Repository(e.to_string()))?;
        let account = models::account::create(&txn, email).await?;
        models::account_credentials::upsert_password(&txn, account.id, password_hash, &password_algorithm).await?;
        let mut fields = Map::new();
        fields.insert("name".into(), Value::String(name.to_string()));
        models::profile::create(&txn, account.id, fields).await?;
        txn.commit().await.map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(AuthUser { id: account.id, email: account.email })
    }

    async fn get_credentials(&self, account_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::account_credentials::find_by_account(&self.db, account_id).await?;
        Ok(res.map(|c| Credentials { account_id: c.account_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }))
    }
}

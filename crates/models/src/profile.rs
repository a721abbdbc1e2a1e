//! User profile rows: the owner's account id plus a JSON object of
//! user-editable display fields.

use sea_orm::{entity::prelude::*, ConnectionTrait, QuerySelect, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use chrono::Utc;

use crate::account;
use crate::errors::ModelError;

pub type Fields = Map<String, Value>;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub fields: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Account }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Account => Entity::belongs_to(account::Entity)
                .from(Column::Id)
                .to(account::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Stored fields as a map; a non-object column reads as empty.
    pub fn field_map(&self) -> Fields {
        match &self.fields {
            Value::Object(map) => map.clone(),
            _ => Fields::new(),
        }
    }
}

/// Merge `patch` into `fields` in place.
///
/// `null` removes a key. `id` can never be patched, and the merged
/// profile must still carry a non-blank `name`.
pub fn apply_patch(fields: &mut Fields, patch: &Fields) -> Result<(), ModelError> {
    if patch.contains_key("id") {
        return Err(ModelError::Validation("id is immutable".into()));
    }
    if let Some(name) = patch.get("name") {
        if !(name.is_string() || name.is_null()) {
            return Err(ModelError::Validation("name must be a string".into()));
        }
    }
    for (key, value) in patch {
        if value.is_null() {
            fields.remove(key);
        } else {
            fields.insert(key.clone(), value.clone());
        }
    }
    let has_name = fields
        .get("name")
        .and_then(Value::as_str)
        .map(|n| !n.trim().is_empty())
        .unwrap_or(false);
    if !has_name {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, id: Uuid, fields: Fields) -> Result<Model, ModelError> {
    let mut seeded = Fields::new();
    apply_patch(&mut seeded, &fields)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(id),
        fields: Set(Value::Object(seeded)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(ModelError::db)
}

/// Merge `patch` into the stored fields. The row is locked for the
/// read-modify-write so concurrent patches cannot drop each other's keys.
pub async fn update_fields<C>(db: &C, id: Uuid, patch: &Fields) -> Result<Model, ModelError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await.map_err(ModelError::db)?;
    let found = Entity::find_by_id(id)
        .lock_exclusive()
        .one(&txn)
        .await
        .map_err(ModelError::db)?
        .ok_or_else(|| ModelError::NotFound("profile not found".into()))?;
    let mut fields = found.field_map();
    apply_patch(&mut fields, patch)?;
    let mut am: ActiveModel = found.into();
    am.fields = Set(Value::Object(fields));
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(&txn).await.map_err(ModelError::db)?;
    txn.commit().await.map_err(ModelError::db)?;
    Ok(updated)
}

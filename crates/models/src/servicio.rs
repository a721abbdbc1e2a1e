use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::{validate_name, validate_price};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "servicio")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub price_cents: i64,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::subservicio::Entity")]
    Subservicio,
}

impl Related<crate::subservicio::Entity> for Entity {
    fn to() -> RelationDef { Relation::Subservicio.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Optional-field update; `None` leaves the column untouched.
#[derive(Clone, Debug, Default)]
pub struct Changes {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price_cents: Option<i64>,
    pub active: Option<bool>,
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Entity::find().order_by_asc(Column::Name).all(db).await.map_err(ModelError::db)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    description: Option<String>,
    price_cents: i64,
    active: bool,
) -> Result<Model, ModelError> {
    validate_name(name)?;
    validate_price(price_cents)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        description: Set(description),
        price_cents: Set(price_cents),
        active: Set(active),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(ModelError::db)
}

pub async fn update<C: ConnectionTrait>(db: &C, id: Uuid, changes: Changes) -> Result<Model, ModelError> {
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(ModelError::db)?
        .ok_or_else(|| ModelError::NotFound("servicio not found".into()))?
        .into();
    if let Some(name) = changes.name {
        validate_name(&name)?;
        am.name = Set(name.trim().to_string());
    }
    if let Some(description) = changes.description {
        am.description = Set(description);
    }
    if let Some(price) = changes.price_cents {
        validate_price(price)?;
        am.price_cents = Set(price);
    }
    if let Some(active) = changes.active {
        am.active = Set(active);
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(ModelError::db)
}

/// Returns whether a row was removed. Subservicios go with it (FK cascade).
pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(ModelError::db)?;
    Ok(res.rows_affected > 0)
}

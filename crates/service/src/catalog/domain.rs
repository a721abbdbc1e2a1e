use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Servicio {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subservicio {
    pub id: Uuid,
    pub servicio_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::servicio::Model> for Servicio {
    fn from(m: models::servicio::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            price_cents: m.price_cents,
            active: m.active,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<models::subservicio::Model> for Subservicio {
    fn from(m: models::subservicio::Model) -> Self {
        Self {
            id: m.id,
            servicio_id: m.servicio_id,
            name: m.name,
            description: m.description,
            price_cents: m.price_cents,
            active: m.active,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

fn default_active() -> bool { true }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewServicio {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubservicio {
    pub servicio_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Partial update shared by both entities.
///
/// `description` distinguishes "absent" (untouched) from `null` (cleared).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl CatalogChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price_cents.is_none() && self.active.is_none()
    }
}

fn present<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(d).map(Some)
}

impl From<CatalogChanges> for models::servicio::Changes {
    fn from(c: CatalogChanges) -> Self {
        Self { name: c.name, description: c.description, price_cents: c.price_cents, active: c.active }
    }
}

impl From<CatalogChanges> for models::subservicio::Changes {
    fn from(c: CatalogChanges) -> Self {
        Self { name: c.name, description: c.description, price_cents: c.price_cents, active: c.active }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn description_null_clears_and_absent_keeps() {
        let cleared: CatalogChanges = serde_json::from_value(json!({"description": null})).unwrap();
        assert_eq!(cleared.description, Some(None));
        let kept: CatalogChanges = serde_json::from_value(json!({"name": "x"})).unwrap();
        assert_eq!(kept.description, None);
        assert!(!kept.is_empty());
        assert!(CatalogChanges::default().is_empty());
    }

    #[test]
    fn new_servicio_defaults() {
        let s: NewServicio = serde_json::from_value(json!({"name": "Corte"})).unwrap();
        assert!(s.active);
        assert_eq!(s.price_cents, 0);
    }
}

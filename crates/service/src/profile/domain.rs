use models::profile::Fields;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile as callers see it: `{"id": …, "name": …, <other fields>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: Fields,
}

impl From<models::profile::Model> for Profile {
    fn from(m: models::profile::Model) -> Self {
        let fields = m.field_map();
        Self { id: m.id, fields }
    }
}

/// Partial update of display fields; a `null` value removes the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfilePatch(pub Fields);

impl ProfilePatch {
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn fields(&self) -> &Fields { &self.0 }
}

impl From<Fields> for ProfilePatch {
    fn from(fields: Fields) -> Self { Self(fields) }
}

use serde::{Deserialize, Serialize};

use super::domain::{Servicio, Subservicio};

/// Search box state from the dashboard (`?query=`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFilter {
    #[serde(default)]
    pub query: Option<String>,
}

impl CatalogFilter {
    pub fn new(query: impl Into<String>) -> Self { Self { query: Some(query.into()) } }

    /// Lowercased, trimmed query; `None` when blank.
    pub fn needle(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// Servicios whose name matches, and subservicios whose own name or
    /// parent matches. Order is preserved.
    pub fn apply(&self, servicios: &[Servicio], subservicios: &[Subservicio]) -> (Vec<Servicio>, Vec<Subservicio>) {
        let Some(needle) = self.needle() else {
            return (servicios.to_vec(), subservicios.to_vec());
        };
        let hit = |name: &str| name.to_lowercase().contains(&needle);
        let matched: Vec<Servicio> = servicios.iter().filter(|s| hit(&s.name)).cloned().collect();
        let subs = subservicios
            .iter()
            .filter(|sub| hit(&sub.name) || matched.iter().any(|s| s.id == sub.servicio_id))
            .cloned()
            .collect();
        (matched, subs)
    }
}

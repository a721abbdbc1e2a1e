//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_account;
mod m20240301_000002_create_account_credentials;
mod m20240301_000003_create_profile;
mod m20240301_000004_create_servicio;
mod m20240301_000005_create_subservicio;
mod m20240301_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_account::Migration),
            Box::new(m20240301_000002_create_account_credentials::Migration),
            Box::new(m20240301_000003_create_profile::Migration),
            Box::new(m20240301_000004_create_servicio::Migration),
            Box::new(m20240301_000005_create_subservicio::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000006_add_indexes::Migration),
        ]
    }
}

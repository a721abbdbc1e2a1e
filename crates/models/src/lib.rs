//! SeaORM entities for accounts, profiles and the services catalog,
//! plus the model-level validation every writer goes through.

pub mod errors;
pub mod db;
pub mod validation;
pub mod account;
pub mod account_credentials;
pub mod profile;
pub mod servicio;
pub mod subservicio;

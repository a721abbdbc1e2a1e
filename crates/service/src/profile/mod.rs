//! User profiles: an account id plus free-form display fields.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{Profile, ProfilePatch};
pub use service::ProfileService;

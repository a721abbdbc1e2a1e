//! Auth module: three-layer architecture (domain, repository, service),
//! plus the session provider every mutation and page load goes through.

pub mod domain;
pub mod errors;
pub mod provider;
pub mod repository;
pub mod service;
pub mod repo;

pub use provider::{AuthProvider, JwtAuthProvider};
pub use service::AuthService;

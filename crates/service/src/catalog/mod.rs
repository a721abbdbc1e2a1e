//! Services catalog: servicios and their subservicios.

pub mod domain;
pub mod filter;
pub mod repository;
pub mod service;

pub use domain::{Servicio, Subservicio};
pub use filter::CatalogFilter;
pub use service::CatalogService;

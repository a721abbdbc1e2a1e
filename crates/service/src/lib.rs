//! Service layer for the dashboard.
//! - `envelope`: `ActionResult<T>` plus `success` / `handle_error`.
//! - `mutation` and `actions`: authenticated mutations that invalidate views.
//! - `pages`: session-guarded page loaders backed by the view cache.
//! - `auth`, `profile`, `catalog`: repository/service pairs over `models`.

pub mod errors;
pub mod envelope;
pub mod auth;
pub mod profile;
pub mod catalog;
pub mod cache;
pub mod mutation;
pub mod actions;
pub mod pages;

pub use envelope::{handle_error, success, ActionError, ActionResult, ErrorKind};
pub use mutation::MutationContext;

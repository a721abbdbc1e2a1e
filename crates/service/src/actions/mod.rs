//! Mutation endpoints. Each one authenticates through
//! [`MutationContext`](crate::mutation::MutationContext), calls a service,
//! and returns an [`ActionResult`](crate::envelope::ActionResult).

pub mod catalog;
pub mod profile;

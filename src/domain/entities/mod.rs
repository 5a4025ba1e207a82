//! Core domain entities.
//!
//! The service has a single entity, [`Link`], plus [`NewLink`] as the
//! insert payload.

pub mod link;

pub use link::{Link, NewLink};

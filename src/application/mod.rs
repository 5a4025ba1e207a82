//! Application layer services implementing business logic.
//!
//! Services consume repository traits, enforce validation and business
//! rules, and give HTTP handlers a narrow API.
//!
//! - [`services::link_service::LinkService`] - Link creation, lookup, deletion and redirects

pub mod services;

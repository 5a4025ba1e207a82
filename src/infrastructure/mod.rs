//! Infrastructure layer implementing the domain storage contract.
//!
//! - [`persistence`] - PostgreSQL and in-memory link repositories

pub mod persistence;

//! Shared types for the product configurator
//!
//! Domain models (attribute catalog, rules) and error types used by
//! the rule evaluator and pricing resolver.

pub mod error;
pub mod models;

// Re-exports
pub use error::{CatalogError, CatalogResult};
pub use serde::{Deserialize, Serialize};

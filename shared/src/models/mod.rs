//! Data models
//!
//! Shared between the rule evaluator, the pricing resolver and the
//! admin API. Attribute ids are `String` (admin-assigned, stable).

pub mod attribute;
pub mod catalog;
pub mod rule;

// Re-exports
pub use attribute::*;
pub use catalog::*;
pub use rule::*;

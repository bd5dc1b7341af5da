//! Rule Evaluator Module
//!
//! Resolves the effective state of every catalog attribute for one
//! configuration session: visibility, allowed value subset, default
//! value and quantity constraints, driven by the declarative rule set.

mod engine;
mod resolved;

pub use engine::*;
pub use resolved::*;

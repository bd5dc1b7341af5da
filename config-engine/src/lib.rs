//! Product configuration engine
//!
//! Pure, stateless core for one configuration session:
//! - [`evaluator`]: resolves attribute visibility, allowed values,
//!   defaults and quantity constraints from the declarative rule set,
//!   and reconciles the caller's selection against the result.
//! - [`pricing`]: computes the incremental price contribution of a
//!   resolved selection for an order quantity.
//!
//! Both are synchronous pure functions over a read-only catalog
//! snapshot; every call is a fresh resolve-from-scratch. Callers may
//! invoke them concurrently with no coordination.

pub mod evaluator;
pub mod pricing;
pub mod selection;

// Re-exports
pub use evaluator::{Evaluation, ResolvedAttribute, evaluate};
pub use pricing::{PriceBreakdown, PricingError, price_delta};
pub use selection::SelectionState;

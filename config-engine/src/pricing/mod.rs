//! Pricing Resolver Module
//!
//! Computes the incremental price contribution of a resolved
//! attribute selection for an order quantity: per-1000-unit option
//! impacts and attribute effects, plus flat step/range table
//! overrides. Uses rust_decimal internally, stores f64.

mod calculator;

pub use calculator::*;

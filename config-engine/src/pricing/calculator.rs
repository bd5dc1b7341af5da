//! Price delta calculation
//!
//! Sums every applicable contribution for the resolved selection:
//! per-1000-unit option impacts, per-1000-unit attribute effects and
//! flat step/range table prices. Quantities that violate a pricing
//! table or a pinned constraint are reported to the caller, never
//! silently clamped.

use crate::evaluator::{QuantityConstraints, ResolvedAttribute};
use crate::selection::SelectionState;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::models::{AttributeCatalog, AttributeType};
use thiserror::Error;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Quantity validation failure
///
/// The caller surfaces these to the end user rather than guessing a
/// price.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Quantity matches no step table entry exactly
    #[error("attribute '{attribute}': quantity {quantity} is not an offered step")]
    QuantityNotInSteps { attribute: String, quantity: u32 },

    /// Quantity falls in no range table entry
    #[error("attribute '{attribute}': quantity {quantity} is outside every offered range")]
    QuantityOutOfRange { attribute: String, quantity: u32 },

    /// Quantity is not a multiple of a pinned step constraint
    #[error("attribute '{attribute}': quantity {quantity} is not a multiple of {step}")]
    StepViolation {
        attribute: String,
        quantity: u32,
        step: u32,
    },

    /// Quantity is under a pinned minimum
    #[error("attribute '{attribute}': quantity {quantity} is below the minimum of {min}")]
    QuantityBelowMinimum {
        attribute: String,
        quantity: u32,
        min: u32,
    },

    /// Quantity is over a pinned maximum
    #[error("attribute '{attribute}': quantity {quantity} is above the maximum of {max}")]
    QuantityAboveMaximum {
        attribute: String,
        quantity: u32,
        max: u32,
    },
}

/// Result type for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Where a price line came from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceSource {
    /// Selected option with the price usage facet (per 1000 units)
    OptionImpact { option: String },
    /// Attribute-level price effect (per 1000 units)
    AttributeEffect,
    /// Flat step table price
    StepTable,
    /// Flat range table price
    RangeTable,
}

/// One contribution to the price delta
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceLine {
    pub attribute_id: String,
    pub source: PriceSource,
    pub amount: f64,
}

/// Itemized price delta for one resolved selection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceBreakdown {
    /// Total incremental price; callers add it to the base price
    pub total: f64,
    pub lines: Vec<PriceLine>,
}

/// Compute the incremental price for a resolved selection
///
/// Hidden attributes contribute nothing. All applicable contributions
/// on one attribute sum: a step or range table does not suppress a
/// per-1000 impact configured alongside it.
pub fn price_delta(
    catalog: &AttributeCatalog,
    resolved: &[ResolvedAttribute],
    selection: &SelectionState,
    quantity: u32,
) -> PricingResult<PriceBreakdown> {
    let qty = Decimal::from(quantity);
    let mut total = Decimal::ZERO;
    let mut lines = Vec::new();

    for entry in resolved {
        if !entry.is_visible {
            continue;
        }
        let Some(attribute) = catalog.get(&entry.attribute_id) else {
            tracing::warn!(
                attribute = %entry.attribute_id,
                "resolved attribute not in catalog, skipping pricing"
            );
            continue;
        };

        check_pinned_constraints(attribute, entry.quantity.as_ref(), quantity)?;

        // Per-option price impact, scaled per 1000 units
        if let Some(value) = selection.get(&entry.attribute_id)
            && let Some(option) = attribute.option(value)
            && option.effective_usage().price
            && let Some(impact) = option.price_impact
        {
            let amount = to_decimal(impact) * qty / Decimal::ONE_THOUSAND;
            total += amount;
            lines.push(PriceLine {
                attribute_id: entry.attribute_id.clone(),
                source: PriceSource::OptionImpact {
                    option: value.to_string(),
                },
                amount: to_f64(amount),
            });
        }

        // Attribute-level effect, scaled per 1000 units
        if attribute.is_price_effect
            && let Some(effect) = attribute.price_effect_amount
        {
            let amount = to_decimal(effect) * qty / Decimal::ONE_THOUSAND;
            total += amount;
            lines.push(PriceLine {
                attribute_id: entry.attribute_id.clone(),
                source: PriceSource::AttributeEffect,
                amount: to_f64(amount),
            });
        }

        // Flat step table override
        if attribute.is_step_quantity
            && let Some(price) = step_price(attribute, quantity)?
        {
            total += price;
            lines.push(PriceLine {
                attribute_id: entry.attribute_id.clone(),
                source: PriceSource::StepTable,
                amount: to_f64(price),
            });
        }

        // Flat range table override
        if attribute.is_range_quantity
            && let Some(price) = range_price(attribute, quantity)?
        {
            total += price;
            lines.push(PriceLine {
                attribute_id: entry.attribute_id.clone(),
                source: PriceSource::RangeTable,
                amount: to_f64(price),
            });
        }
    }

    Ok(PriceBreakdown {
        total: to_f64(total),
        lines,
    })
}

/// Validate the constraints a Quantity action pinned on the attribute
fn check_pinned_constraints(
    attribute: &AttributeType,
    constraints: Option<&QuantityConstraints>,
    quantity: u32,
) -> PricingResult<()> {
    let Some(constraints) = constraints else {
        return Ok(());
    };

    if let Some(min) = constraints.min
        && quantity < min
    {
        return Err(PricingError::QuantityBelowMinimum {
            attribute: attribute.id.clone(),
            quantity,
            min,
        });
    }
    if let Some(max) = constraints.max
        && quantity > max
    {
        return Err(PricingError::QuantityAboveMaximum {
            attribute: attribute.id.clone(),
            quantity,
            max,
        });
    }
    if let Some(step) = constraints.step
        && step > 0
        && quantity % step != 0
    {
        return Err(PricingError::StepViolation {
            attribute: attribute.id.clone(),
            quantity,
            step,
        });
    }
    Ok(())
}

/// Exact-match step table lookup
fn step_price(attribute: &AttributeType, quantity: u32) -> PricingResult<Option<Decimal>> {
    if attribute.step_quantities.is_empty() {
        tracing::warn!(attribute = %attribute.id, "step pricing flagged but table is empty");
        return Ok(None);
    }
    attribute
        .step_quantities
        .iter()
        .find(|step| step.quantity == quantity)
        .map(|step| Some(to_decimal(step.price)))
        .ok_or(PricingError::QuantityNotInSteps {
            attribute: attribute.id.clone(),
            quantity,
        })
}

/// First-match range table lookup (ranges assumed non-overlapping)
fn range_price(attribute: &AttributeType, quantity: u32) -> PricingResult<Option<Decimal>> {
    if attribute.range_quantities.is_empty() {
        tracing::warn!(attribute = %attribute.id, "range pricing flagged but table is empty");
        return Ok(None);
    }
    attribute
        .range_quantities
        .iter()
        .find(|range| range.min <= quantity && quantity <= range.max)
        .map(|range| Some(to_decimal(range.price)))
        .ok_or(PricingError::QuantityOutOfRange {
            attribute: attribute.id.clone(),
            quantity,
        })
}

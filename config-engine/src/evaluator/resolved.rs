//! Resolved attribute output types

use serde::{Deserialize, Serialize};

/// Quantity constraints pinned by a `Quantity` action
///
/// Replaced wholesale when a rule fires; absent fields stay absent
/// rather than inheriting the previous constraint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuantityConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,
}

/// Per-attribute evaluation output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedAttribute {
    pub attribute_id: String,
    pub is_visible: bool,
    /// Allowed value subset (full catalog universe unless pinned)
    pub allowed_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<QuantityConstraints>,
    /// A rule explicitly set visibility; downstream logic must not
    /// override it with the catalog's static default
    pub visibility_pinned: bool,
    /// A rule explicitly narrowed the allowed values
    pub values_pinned: bool,
}

/// Why a rule or action was skipped
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticReason {
    /// The rule's `when.attribute` is not in the catalog
    UnknownConditionAttribute,
    /// An action targets an attribute not in the catalog
    UnknownTargetAttribute,
}

/// Non-fatal evaluation diagnostic
///
/// Malformed rule data degrades the evaluation instead of failing it;
/// each skip is recorded here and logged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvalDiagnostic {
    /// Name of the rule that was degraded
    pub rule: String,
    /// Attribute id that failed to resolve
    pub target: String,
    pub reason: DiagnosticReason,
}

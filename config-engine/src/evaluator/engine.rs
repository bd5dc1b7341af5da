//! Rule evaluation
//!
//! Pure function over (catalog, rule set, selection): builds a fresh
//! working set per call, fires matching rules in priority order,
//! applies their actions sequentially, then reconciles the selection
//! against the final constraints. Identical inputs always yield
//! identical outputs; neither input is mutated.

use crate::evaluator::resolved::{
    DiagnosticReason, EvalDiagnostic, QuantityConstraints, ResolvedAttribute,
};
use crate::selection::SelectionState;
use serde::{Deserialize, Serialize};
use shared::models::{Action, AttributeCatalog, AttributeType, Rule, RuleSet};
use std::collections::HashMap;

/// Complete evaluation result for one session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    /// One entry per catalog attribute, in catalog order
    pub attributes: Vec<ResolvedAttribute>,
    /// Reconciled copy of the caller's selection
    pub selection: SelectionState,
    /// Skipped rules/actions (never fatal)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<EvalDiagnostic>,
}

impl Evaluation {
    /// Look up a resolved attribute by id
    pub fn get(&self, attribute_id: &str) -> Option<&ResolvedAttribute> {
        self.attributes.iter().find(|a| a.attribute_id == attribute_id)
    }
}

/// Evaluate the rule set against one selection state
///
/// Always returns a complete [`ResolvedAttribute`] per catalog
/// attribute: a half-resolved configuration form is worse than a
/// degraded one, so malformed rule data is skipped with a diagnostic
/// instead of failing the call.
pub fn evaluate(
    catalog: &AttributeCatalog,
    rule_set: &RuleSet,
    selection: &SelectionState,
) -> Evaluation {
    let attributes: Vec<&AttributeType> = catalog.iter().collect();
    let mut working: Vec<ResolvedAttribute> = catalog
        .iter()
        .map(|attribute| initialize(attribute, selection))
        .collect();

    let index: HashMap<&str, usize> = attributes
        .iter()
        .enumerate()
        .map(|(pos, attribute)| (attribute.id.as_str(), pos))
        .collect();

    let mut diagnostics = Vec::new();

    for rule in rule_set.in_application_order() {
        if !index.contains_key(rule.when.attribute.as_str()) {
            skip(&mut diagnostics, rule, &rule.when.attribute, DiagnosticReason::UnknownConditionAttribute);
            continue;
        }

        // Single-value equality only: no selection, or a different
        // value, means the rule does not fire.
        if selection.get(&rule.when.attribute) != Some(rule.when.value.as_str()) {
            continue;
        }

        for action in &rule.then {
            let Some(&pos) = index.get(action.target()) else {
                skip(&mut diagnostics, rule, action.target(), DiagnosticReason::UnknownTargetAttribute);
                continue;
            };
            apply_action(action, &mut working[pos], attributes[pos]);
        }
    }

    let selection = reconcile(catalog, &mut working, selection);

    Evaluation {
        attributes: working,
        selection,
        diagnostics,
    }
}

/// Initial resolved state: visible, full value universe, catalog
/// default, no quantity constraints, nothing pinned - then static
/// parent gating.
fn initialize(attribute: &AttributeType, selection: &SelectionState) -> ResolvedAttribute {
    ResolvedAttribute {
        attribute_id: attribute.id.clone(),
        is_visible: statically_visible(attribute, selection),
        allowed_values: attribute.option_values(),
        default_value: attribute.default_value.clone(),
        quantity: None,
        visibility_pinned: false,
        values_pinned: false,
    }
}

/// Parent-value gating, applied before any rule
///
/// Does not pin visibility: an explicit Show/Hide rule overrides it.
fn statically_visible(attribute: &AttributeType, selection: &SelectionState) -> bool {
    let Some(parent) = &attribute.parent_attribute else {
        return true;
    };
    let parent_value = selection.get(parent);

    if !attribute.show_when_parent_value.is_empty() {
        // The show-list names the only parent states in which this
        // attribute is meaningful; an unselected parent hides it.
        return matches!(
            parent_value,
            Some(value) if attribute.show_when_parent_value.iter().any(|v| v == value)
        );
    }

    if let Some(value) = parent_value
        && attribute.hide_when_parent_value.iter().any(|v| v == value)
    {
        return false;
    }

    true
}

fn apply_action(action: &Action, resolved: &mut ResolvedAttribute, attribute: &AttributeType) {
    match action {
        Action::Show { .. } => {
            resolved.is_visible = true;
            resolved.visibility_pinned = true;
        }
        Action::Hide { .. } => {
            resolved.is_visible = false;
            resolved.visibility_pinned = true;
        }
        Action::ShowOnly { allowed_values, .. } => {
            // Intersect against the original catalog universe, never
            // against a previously narrowed set: a later ShowOnly
            // replaces the earlier one rather than stacking.
            resolved.allowed_values = attribute
                .option_values()
                .into_iter()
                .filter(|value| allowed_values.contains(value))
                .collect();
            resolved.values_pinned = true;
        }
        Action::SetDefault { value, .. } => {
            // Only accepted inside the current allowed set; with no
            // restriction known yet (empty set) anything goes.
            if resolved.allowed_values.is_empty() || resolved.allowed_values.contains(value) {
                resolved.default_value = Some(value.clone());
            }
        }
        Action::Quantity { min, max, step, .. } => {
            resolved.quantity = Some(QuantityConstraints {
                min: *min,
                max: *max,
                step: *step,
            });
        }
    }
}

/// Post-pass reconciliation, run once after all rules have fired
fn reconcile(
    catalog: &AttributeCatalog,
    working: &mut [ResolvedAttribute],
    selection: &SelectionState,
) -> SelectionState {
    let mut reconciled = selection.clone();

    for resolved in working.iter_mut() {
        // 1. A hidden attribute cannot retain a stale selection.
        if !resolved.is_visible {
            reconciled.deselect(&resolved.attribute_id);
        }

        // 2. A pinned value set evicts selections outside it.
        let stale = resolved.values_pinned
            && reconciled
                .get(&resolved.attribute_id)
                .is_some_and(|value| !resolved.allowed_values.iter().any(|v| v == value));
        if stale {
            reconciled.deselect(&resolved.attribute_id);
        }

        // 3. Unpinned attributes go back to the full universe.
        if !resolved.values_pinned {
            resolved.allowed_values = catalog.option_values(&resolved.attribute_id);
        }
    }

    reconciled
}

fn skip(diagnostics: &mut Vec<EvalDiagnostic>, rule: &Rule, target: &str, reason: DiagnosticReason) {
    tracing::warn!(rule = %rule.name, target = %target, ?reason, "skipping unresolvable rule target");
    diagnostics.push(EvalDiagnostic {
        rule: rule.name.clone(),
        target: target.to_string(),
        reason,
    });
}

//! Rule Model
//!
//! Declarative when/then rules layered on top of the attribute
//! catalog. A rule fires when one attribute's selected value equals
//! the condition value; its actions then adjust the resolved state of
//! target attributes.

use serde::{Deserialize, Serialize};

/// Single equality condition - no compound conditions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleCondition {
    /// Attribute id the condition reads
    pub attribute: String,
    /// Option value the selection must equal
    pub value: String,
}

/// Rule action - closed tagged union
///
/// Exhaustive matching in the evaluator; there is no runtime
/// default arm for an unknown kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Make the target visible
    Show { target: String },
    /// Hide the target
    Hide { target: String },
    /// Restrict the target to a subset of its catalog values
    ShowOnly {
        target: String,
        allowed_values: Vec<String>,
    },
    /// Override the target's default value
    SetDefault { target: String, value: String },
    /// Replace the target's quantity constraints wholesale
    Quantity {
        target: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<u32>,
    },
}

impl Action {
    /// The attribute id this action applies to
    pub fn target(&self) -> &str {
        match self {
            Self::Show { target }
            | Self::Hide { target }
            | Self::ShowOnly { target, .. }
            | Self::SetDefault { target, .. }
            | Self::Quantity { target, .. } => target,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Rule entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub when: RuleCondition,
    /// Actions applied in list order when the rule fires
    pub then: Vec<Action>,
    /// Higher evaluates first; ties keep rule-set order
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Ordered rule collection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Active rules in application order: ascending priority, stable
    /// on ties
    ///
    /// Actions overwrite sequentially, so the highest-priority rule is
    /// applied last and its effects take precedence. Ties keep
    /// rule-set order: at equal priority a later rule in the list
    /// overrides an earlier one.
    pub fn in_application_order(&self) -> Vec<&Rule> {
        let mut sorted: Vec<&Rule> = self.rules.iter().filter(|r| r.is_active).collect();
        sorted.sort_by_key(|r| r.priority);
        sorted
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self::new(rules)
    }
}

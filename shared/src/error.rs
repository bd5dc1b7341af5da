//! Catalog error types
//!
//! Errors raised at the catalog write boundary. The evaluator itself
//! never returns these: it assumes a validated catalog and degrades
//! gracefully when an invariant is nonetheless violated.

use thiserror::Error;

/// Errors rejected when writing attribute definitions
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Clearing the last true usage facet is rejected, not stored
    #[error("option '{option}': at least one usage facet must remain enabled")]
    LastUsageFacet { option: String },

    /// `image_file_names` must have exactly `number_of_images_required` slots
    #[error("option '{option}': {slots} image slots but {required} required")]
    ImageCountMismatch {
        option: String,
        required: usize,
        slots: usize,
    },

    /// System names are unique across the catalog
    #[error("duplicate system name '{system_name}'")]
    DuplicateSystemName { system_name: String },

    /// Option names are unique within an attribute
    #[error("attribute '{attribute}': duplicate option '{option}'")]
    DuplicateOptionName { attribute: String, option: String },

    /// Selection input styles need at least one option
    #[error("attribute '{attribute}': selection style requires options")]
    EmptyOptions { attribute: String },

    /// Monetary amounts are non-negative
    #[error("attribute '{attribute}': negative amount in field '{field}'")]
    NegativeAmount { attribute: String, field: String },

    /// Step/range quantity table shape violation
    #[error("attribute '{attribute}': {message}")]
    InvalidQuantityTable { attribute: String, message: String },

    /// Generic validation failure
    #[error("{0}")]
    Validation(String),
}

impl CatalogError {
    /// Create a generic validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_table(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidQuantityTable {
            attribute: attribute.into(),
            message: message.into(),
        }
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

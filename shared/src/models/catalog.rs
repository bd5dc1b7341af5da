//! Attribute Catalog
//!
//! Read-only snapshot of every attribute type for one product
//! category. Mutated only by administrative writes outside this core;
//! each evaluation call treats its snapshot as immutable.

use crate::error::{CatalogError, CatalogResult};
use crate::models::attribute::AttributeType;
use serde::{Deserialize, Serialize};

/// Immutable attribute snapshot, in admin display order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AttributeCatalog {
    attributes: Vec<AttributeType>,
}

impl AttributeCatalog {
    /// Build a catalog, sorting by `display_order`
    ///
    /// The sort is stable: equal display orders keep insertion order.
    pub fn new(mut attributes: Vec<AttributeType>) -> Self {
        attributes.sort_by_key(|a| a.display_order);
        Self { attributes }
    }

    /// Look up an attribute by id
    pub fn get(&self, id: &str) -> Option<&AttributeType> {
        self.attributes.iter().find(|a| a.id == id)
    }

    /// Iterate attributes in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &AttributeType> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// The canonical value universe of an attribute (empty if unknown)
    pub fn option_values(&self, id: &str) -> Vec<String> {
        self.get(id).map(|a| a.option_values()).unwrap_or_default()
    }

    /// Write-boundary validation of the whole snapshot
    ///
    /// Per-attribute checks plus cross-attribute system-name
    /// uniqueness.
    pub fn validate(&self) -> CatalogResult<()> {
        for (idx, attribute) in self.attributes.iter().enumerate() {
            attribute.validate()?;

            if let Some(system_name) = &attribute.system_name
                && self.attributes[..idx]
                    .iter()
                    .any(|a| a.system_name.as_deref() == Some(system_name))
            {
                return Err(CatalogError::DuplicateSystemName {
                    system_name: system_name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<AttributeType>> for AttributeCatalog {
    fn from(attributes: Vec<AttributeType>) -> Self {
        Self::new(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attribute::{AttributeOption, InputStyle};

    fn make_attribute(id: &str, display_order: i32) -> AttributeType {
        AttributeType {
            id: id.to_string(),
            name: id.to_string(),
            system_name: None,
            input_style: InputStyle::Dropdown,
            options: vec![AttributeOption::new("A"), AttributeOption::new("B")],
            is_price_effect: false,
            price_effect_amount: None,
            is_step_quantity: false,
            step_quantities: vec![],
            is_range_quantity: false,
            range_quantities: vec![],
            parent_attribute: None,
            show_when_parent_value: vec![],
            hide_when_parent_value: vec![],
            default_value: None,
            is_required: false,
            display_order,
        }
    }

    #[test]
    fn test_catalog_sorted_by_display_order_stable() {
        let catalog = AttributeCatalog::new(vec![
            make_attribute("c", 2),
            make_attribute("a", 1),
            make_attribute("b", 1),
        ]);
        let ids: Vec<&str> = catalog.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_option_values_unknown_attribute_is_empty() {
        let catalog = AttributeCatalog::new(vec![make_attribute("a", 0)]);
        assert_eq!(catalog.option_values("a"), vec!["A", "B"]);
        assert!(catalog.option_values("missing").is_empty());
    }

    #[test]
    fn test_duplicate_system_name_rejected() {
        let mut first = make_attribute("a", 0);
        first.system_name = Some("paper".to_string());
        let mut second = make_attribute("b", 1);
        second.system_name = Some("paper".to_string());

        let catalog = AttributeCatalog::new(vec![first, second]);
        let err = catalog.validate().unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateSystemName {
                system_name: "paper".to_string()
            }
        );
    }
}

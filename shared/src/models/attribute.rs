//! Attribute Model
//!
//! An attribute is one configurable product dimension (paper type,
//! finish, add-ons). Options are embedded: the `options` sequence is
//! the one canonical universe of values for the attribute everywhere.

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};

/// Input style of an attribute
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputStyle {
    /// Single-select dropdown
    Dropdown,
    /// Popup select
    Popup,
    Radio,
    Checkbox,
    FreeText,
    Numeric,
    FileUpload,
}

impl InputStyle {
    /// Selection styles carry an option list; free-form styles do not
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            Self::Dropdown | Self::Popup | Self::Radio | Self::Checkbox
        )
    }
}

/// One usage facet of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageFacet {
    Price,
    Image,
    Listing,
}

/// Option usage record - three independent facets
///
/// Invariant: at least one facet is true whenever the record exists.
/// Enforced at the write boundary via [`AttributeOption::clear_usage_facet`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionUsage {
    #[serde(default)]
    pub price: bool,
    #[serde(default)]
    pub image: bool,
    #[serde(default)]
    pub listing: bool,
}

impl OptionUsage {
    /// Whether any facet is enabled
    pub fn any(&self) -> bool {
        self.price || self.image || self.listing
    }

    fn get(&self, facet: UsageFacet) -> bool {
        match facet {
            UsageFacet::Price => self.price,
            UsageFacet::Image => self.image,
            UsageFacet::Listing => self.listing,
        }
    }

    fn set(&mut self, facet: UsageFacet, value: bool) {
        match facet {
            UsageFacet::Price => self.price = value,
            UsageFacet::Image => self.image = value,
            UsageFacet::Listing => self.listing = value,
        }
    }
}

/// Attribute option (embedded in AttributeType)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeOption {
    pub name: String,
    /// Usage record; absent = no facets enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<OptionUsage>,
    /// Price impact in currency per 1000 units (only when usage.price)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_impact: Option<f64>,
    /// Number of customer uploads needed (only when usage.image)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_images_required: Option<usize>,
    /// One slot per required image; empty string = not yet uploaded
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_file_names: Vec<String>,
    /// Listing filter text (only when usage.listing)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_filters: Option<String>,
    /// Opaque asset reference, resolved by the upload service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl AttributeOption {
    /// Create a bare option with no usage facets
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usage: None,
            price_impact: None,
            number_of_images_required: None,
            image_file_names: vec![],
            listing_filters: None,
            image: None,
        }
    }

    /// Usage record with a missing record treated as all facets false
    pub fn effective_usage(&self) -> OptionUsage {
        self.usage.unwrap_or_default()
    }

    /// Enable a usage facet
    pub fn enable_usage_facet(&mut self, facet: UsageFacet) {
        let mut usage = self.usage.unwrap_or_default();
        usage.set(facet, true);
        self.usage = Some(usage);
    }

    /// Disable a usage facet
    ///
    /// Rejected when it would clear the last true facet: the record
    /// must never be stored with all facets false.
    pub fn clear_usage_facet(&mut self, facet: UsageFacet) -> CatalogResult<()> {
        let Some(mut usage) = self.usage else {
            return Ok(());
        };
        if !usage.get(facet) {
            return Ok(());
        }
        usage.set(facet, false);
        if !usage.any() {
            return Err(CatalogError::LastUsageFacet {
                option: self.name.clone(),
            });
        }
        self.usage = Some(usage);
        Ok(())
    }

    /// Resize the image slot list to `count`
    ///
    /// Pads with empty slots or truncates so `image_file_names` never
    /// disagrees with `number_of_images_required`.
    pub fn set_image_count(&mut self, count: usize) {
        self.number_of_images_required = Some(count);
        self.image_file_names.resize(count, String::new());
    }

    /// Write-boundary validation
    pub fn validate(&self, attribute: &str) -> CatalogResult<()> {
        let usage = self.effective_usage();
        if self.usage.is_some() && !usage.any() {
            return Err(CatalogError::LastUsageFacet {
                option: self.name.clone(),
            });
        }
        if usage.price
            && let Some(impact) = self.price_impact
            && impact < 0.0
        {
            return Err(CatalogError::NegativeAmount {
                attribute: attribute.to_string(),
                field: format!("options.{}.price_impact", self.name),
            });
        }
        if usage.image {
            let required = self.number_of_images_required.unwrap_or(0);
            if self.image_file_names.len() != required {
                return Err(CatalogError::ImageCountMismatch {
                    option: self.name.clone(),
                    required,
                    slots: self.image_file_names.len(),
                });
            }
        }
        Ok(())
    }
}

/// Step quantity pricing entry - order quantity must match exactly
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepQuantity {
    pub quantity: u32,
    /// Flat price for this step (not scaled by quantity)
    pub price: f64,
}

/// Range quantity pricing entry - first matching range wins
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeQuantity {
    pub min: u32,
    pub max: u32,
    /// Flat price for this range (not scaled by quantity)
    pub price: f64,
}

/// Attribute type entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeType {
    pub id: String,
    /// Customer-facing name
    pub name: String,
    /// Internal key, unique across the catalog when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,
    pub input_style: InputStyle,
    /// Embedded options (the canonical value universe)
    #[serde(default)]
    pub options: Vec<AttributeOption>,

    // Attribute-level price effect
    #[serde(default)]
    pub is_price_effect: bool,
    /// Currency per 1000 units (required when is_price_effect)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_effect_amount: Option<f64>,

    // Quantity shape - both tables may be present, the engine handles it
    #[serde(default)]
    pub is_step_quantity: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub step_quantities: Vec<StepQuantity>,
    #[serde(default)]
    pub is_range_quantity: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub range_quantities: Vec<RangeQuantity>,

    // Static parent gating, applied before any rule set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub show_when_parent_value: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hide_when_parent_value: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    /// Sort key; ties broken by insertion order
    #[serde(default)]
    pub display_order: i32,
}

impl AttributeType {
    /// The canonical universe of this attribute's option values
    pub fn option_values(&self) -> Vec<String> {
        self.options.iter().map(|o| o.name.clone()).collect()
    }

    /// Whether `value` is one of this attribute's options
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.name == value)
    }

    /// Look up an option by value
    pub fn option(&self, value: &str) -> Option<&AttributeOption> {
        self.options.iter().find(|o| o.name == value)
    }

    /// Write-boundary validation
    pub fn validate(&self) -> CatalogResult<()> {
        if self.input_style.is_selection() && self.options.is_empty() {
            return Err(CatalogError::EmptyOptions {
                attribute: self.name.clone(),
            });
        }

        for (idx, option) in self.options.iter().enumerate() {
            if self.options[..idx].iter().any(|o| o.name == option.name) {
                return Err(CatalogError::DuplicateOptionName {
                    attribute: self.name.clone(),
                    option: option.name.clone(),
                });
            }
            option.validate(&self.name)?;
        }

        if self.is_price_effect {
            match self.price_effect_amount {
                Some(amount) if amount >= 0.0 => {}
                Some(_) => {
                    return Err(CatalogError::NegativeAmount {
                        attribute: self.name.clone(),
                        field: "price_effect_amount".to_string(),
                    });
                }
                None => {
                    return Err(CatalogError::validation(format!(
                        "attribute '{}': is_price_effect requires price_effect_amount",
                        self.name
                    )));
                }
            }
        }

        for step in &self.step_quantities {
            if step.quantity == 0 {
                return Err(CatalogError::invalid_table(&self.name, "step quantity must be > 0"));
            }
            if step.price < 0.0 {
                return Err(CatalogError::invalid_table(&self.name, "step price must be >= 0"));
            }
        }
        for range in &self.range_quantities {
            if range.min > range.max {
                return Err(CatalogError::invalid_table(
                    &self.name,
                    format!("range {}..{} has min > max", range.min, range.max),
                ));
            }
            if range.price < 0.0 {
                return Err(CatalogError::invalid_table(&self.name, "range price must be >= 0"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_attribute(id: &str, options: &[&str]) -> AttributeType {
        AttributeType {
            id: id.to_string(),
            name: id.to_string(),
            system_name: None,
            input_style: InputStyle::Dropdown,
            options: options.iter().map(|o| AttributeOption::new(*o)).collect(),
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
            display_order: 0,
        }
    }

    #[test]
    fn test_clear_last_usage_facet_rejected() {
        let mut option = AttributeOption::new("Premium");
        option.enable_usage_facet(UsageFacet::Price);

        let err = option.clear_usage_facet(UsageFacet::Price).unwrap_err();
        assert_eq!(
            err,
            CatalogError::LastUsageFacet {
                option: "Premium".to_string()
            }
        );
        // Rejected, not silently stored
        assert!(option.effective_usage().price);
    }

    #[test]
    fn test_clear_facet_with_another_enabled() {
        let mut option = AttributeOption::new("Premium");
        option.enable_usage_facet(UsageFacet::Price);
        option.enable_usage_facet(UsageFacet::Listing);

        option.clear_usage_facet(UsageFacet::Price).unwrap();
        assert!(!option.effective_usage().price);
        assert!(option.effective_usage().listing);
    }

    #[test]
    fn test_missing_usage_record_means_no_facets() {
        let option = AttributeOption::new("Plain");
        assert!(!option.effective_usage().any());
        // Clearing a facet on a missing record is a no-op
        let mut option = option;
        option.clear_usage_facet(UsageFacet::Image).unwrap();
        assert!(option.usage.is_none());
    }

    #[test]
    fn test_set_image_count_pads_and_truncates() {
        let mut option = AttributeOption::new("Duplex");
        option.enable_usage_facet(UsageFacet::Image);
        option.image_file_names = vec!["front.png".to_string()];

        option.set_image_count(3);
        assert_eq!(
            option.image_file_names,
            vec!["front.png".to_string(), String::new(), String::new()]
        );
        option.validate("Print").unwrap();

        option.set_image_count(1);
        assert_eq!(option.image_file_names, vec!["front.png".to_string()]);
        option.validate("Print").unwrap();
    }

    #[test]
    fn test_image_count_mismatch_rejected() {
        let mut option = AttributeOption::new("Duplex");
        option.enable_usage_facet(UsageFacet::Image);
        option.number_of_images_required = Some(2);
        option.image_file_names = vec!["front.png".to_string()];

        let err = option.validate("Print").unwrap_err();
        assert!(matches!(err, CatalogError::ImageCountMismatch { required: 2, slots: 1, .. }));
    }

    #[test]
    fn test_selection_style_requires_options() {
        let attr = make_attribute("finish", &[]);
        assert!(matches!(attr.validate(), Err(CatalogError::EmptyOptions { .. })));

        let mut free_text = make_attribute("note", &[]);
        free_text.input_style = InputStyle::FreeText;
        free_text.validate().unwrap();
    }

    #[test]
    fn test_duplicate_option_name_rejected() {
        let attr = make_attribute("finish", &["Matte", "Glossy", "Matte"]);
        let err = attr.validate().unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateOptionName { .. }));
    }

    #[test]
    fn test_price_effect_requires_amount() {
        let mut attr = make_attribute("rush", &["Yes", "No"]);
        attr.is_price_effect = true;
        assert!(attr.validate().is_err());

        attr.price_effect_amount = Some(120.0);
        attr.validate().unwrap();

        attr.price_effect_amount = Some(-1.0);
        assert!(matches!(attr.validate(), Err(CatalogError::NegativeAmount { .. })));
    }

    #[test]
    fn test_range_min_max_validated() {
        let mut attr = make_attribute("qty", &["std"]);
        attr.is_range_quantity = true;
        attr.range_quantities = vec![RangeQuantity { min: 500, max: 100, price: 10.0 }];
        assert!(matches!(attr.validate(), Err(CatalogError::InvalidQuantityTable { .. })));
    }

    #[test]
    fn test_option_serde_defaults() {
        let json = r#"{"name": "Matte"}"#;
        let option: AttributeOption = serde_json::from_str(json).unwrap();
        assert_eq!(option.name, "Matte");
        assert!(option.usage.is_none());
        assert!(option.image_file_names.is_empty());
    }

    #[test]
    fn test_input_style_serde() {
        let style: InputStyle = serde_json::from_str(r#""FREE_TEXT""#).unwrap();
        assert_eq!(style, InputStyle::FreeText);
        assert!(!style.is_selection());
        assert!(InputStyle::Popup.is_selection());
    }
}

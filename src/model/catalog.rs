use crate::model::{split_id_list, Id, Price};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

fn default_true() -> bool {
    true
}

/// A product offered in the shop. Custom products are configured part by
/// part; the order of `parts` is the wizard step order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Id,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub base_price: Price,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Product {
    pub fn new(id: impl Into<Id>, name: impl Into<String>, category: impl Into<String>, base_price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category: category.into(),
            base_price,
            is_custom: false,
            is_available: true,
            stock_quantity: 0,
            parts: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_stock(mut self, is_available: bool, stock_quantity: i64) -> Self {
        self.is_available = is_available;
        self.stock_quantity = stock_quantity;
        self
    }

    /// Mark the product as customisable and attach its parts in step order
    pub fn with_parts(mut self, parts: Vec<Part>) -> Self {
        self.is_custom = true;
        self.parts = parts;
        self
    }
}

/// One configuration step of a product (Frame, Wheels, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub product_id: Id,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Part {
    pub fn new(id: impl Into<Id>, product_id: impl Into<Id>, name: impl Into<String>, variants: Vec<Variant>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            product_id: product_id.into(),
            variants,
        }
    }
}

/// A selectable option within a part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: Id,
    #[serde(default)]
    pub part_id: Id,
    pub name: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub stock_quantity: i64,
    /// Surcharges where this variant is the trigger
    #[serde(default)]
    pub custom_prices: Vec<CustomPrice>,
    #[serde(default)]
    pub dependencies: Vec<VariantDependency>,
}

impl Variant {
    pub fn new(id: impl Into<Id>, part_id: impl Into<Id>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            part_id: part_id.into(),
            name: name.into(),
            price,
            is_available: true,
            stock_quantity: 0,
            custom_prices: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_stock(mut self, is_available: bool, stock_quantity: i64) -> Self {
        self.is_available = is_available;
        self.stock_quantity = stock_quantity;
        self
    }

    /// Add `custom_price` on top of this variant's price whenever
    /// `dependent_variant_id` is selected as well
    pub fn with_custom_price(mut self, dependent_variant_id: impl Into<Id>, custom_price: Price) -> Self {
        self.custom_prices.push(CustomPrice {
            variant_id: self.id.clone(),
            dependent_variant_id: dependent_variant_id.into(),
            custom_price,
        });
        self
    }

    /// Declare this variant incompatible with each of `restrictions`
    pub fn with_restrictions<I, S>(mut self, restrictions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Id>,
    {
        self.dependencies.push(VariantDependency {
            variant_id: self.id.clone(),
            restrictions: restrictions.into_iter().map(Into::into).collect(),
        });
        self
    }
}

/// Conditional surcharge: `custom_price` is added to the trigger
/// (`variant_id`) when `dependent_variant_id` is also selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPrice {
    pub variant_id: Id,
    pub dependent_variant_id: Id,
    pub custom_price: Price,
}

/// Incompatibility record. The relation is symmetric once indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantDependency {
    pub variant_id: Id,
    #[serde(default, deserialize_with = "deserialize_restrictions")]
    pub restrictions: BTreeSet<Id>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRestrictions {
    List(Vec<Id>),
    // Legacy format: "id1,id2"
    Delimited(String),
}

fn deserialize_restrictions<'de, D>(deserializer: D) -> Result<BTreeSet<Id>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawRestrictions>::deserialize(deserializer)?;
    Ok(match raw {
        None => BTreeSet::new(),
        Some(RawRestrictions::List(ids)) => ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect(),
        Some(RawRestrictions::Delimited(raw)) => parse_restrictions(&raw),
    })
}

/// Parse a comma-delimited restriction list into a set of variant ids
pub fn parse_restrictions(raw: &str) -> BTreeSet<Id> {
    split_id_list(raw).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_restrictions_accept_list_and_delimited_formats() {
        let list: VariantDependency =
            serde_json::from_str(r#"{"variant_id": "a", "restrictions": ["b", "c"]}"#).unwrap();
        let delimited: VariantDependency =
            serde_json::from_str(r#"{"variant_id": "a", "restrictions": "b, c,"}"#).unwrap();
        let null: VariantDependency =
            serde_json::from_str(r#"{"variant_id": "a", "restrictions": null}"#).unwrap();
        let missing: VariantDependency = serde_json::from_str(r#"{"variant_id": "a"}"#).unwrap();

        let expected: BTreeSet<Id> = ["b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(list.restrictions, expected);
        assert_eq!(delimited.restrictions, expected);
        assert!(null.restrictions.is_empty());
        assert!(missing.restrictions.is_empty());
    }

    #[test]
    fn test_variant_defaults_for_sparse_input() {
        let variant: Variant = serde_json::from_str(r#"{"id": "v1", "name": "Plain"}"#).unwrap();
        assert_eq!(variant.price, dec!(0));
        assert!(variant.is_available);
        assert_eq!(variant.stock_quantity, 0);
        assert!(variant.custom_prices.is_empty());
        assert!(variant.dependencies.is_empty());
    }

    #[test]
    fn test_product_prices_parse_exactly() {
        let json = r#"{
            "id": "1",
            "name": "Test Bike",
            "category": "Bikes",
            "base_price": 499.99,
            "is_custom": true,
            "parts": [{
                "id": "1",
                "name": "Frame",
                "product_id": "1",
                "variants": [{"id": "1-1", "part_id": "1", "name": "Aluminum Frame", "price": 300}]
            }]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.base_price, dec!(499.99));
        assert_eq!(product.parts[0].variants[0].price, dec!(300));
    }

    #[test]
    fn test_builders_record_trigger_and_owner() {
        let variant = Variant::new("wheel-racing", "wheels", "Racing Wheels", dec!(250))
            .with_custom_price("frame-aluminum", dec!(90))
            .with_restrictions(["frame-carbon"]);

        assert_eq!(variant.custom_prices[0].variant_id, "wheel-racing");
        assert_eq!(variant.custom_prices[0].dependent_variant_id, "frame-aluminum");
        assert_eq!(variant.dependencies[0].variant_id, "wheel-racing");
        assert!(variant.dependencies[0].restrictions.contains("frame-carbon"));
    }
}

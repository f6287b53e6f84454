use crate::model::{generate_id, split_id_list, Id, Price};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A shopping cart. Its total is always the sum of its items' totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: Id,
    pub purchased: bool,
    pub total_price: Price,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A configured product placed in a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Id,
    pub cart_id: Id,
    pub product_id: Id,
    /// Chosen variant ids, comma separated
    #[serde(default)]
    pub selected_parts: Option<String>,
    pub total_price: Price,
}

/// Cart input model for creation (without ID and timestamps)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCart {
    #[serde(default)]
    pub purchased: bool,
    #[serde(default)]
    pub items: Vec<NewCartItem>,
}

/// Cart item input model, as produced by a finalized configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCartItem {
    pub product_id: Id,
    #[serde(default)]
    pub selected_parts: Option<String>,
    pub total_price: Price,
}

impl NewCartItem {
    pub fn selected_variant_ids(&self) -> Vec<&str> {
        self.selected_parts
            .as_deref()
            .map(|parts| split_id_list(parts).collect())
            .unwrap_or_default()
    }
}

impl CartItem {
    pub fn selected_variant_ids(&self) -> Vec<&str> {
        self.selected_parts
            .as_deref()
            .map(|parts| split_id_list(parts).collect())
            .unwrap_or_default()
    }
}

impl Cart {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            purchased: false,
            total_price: Decimal::ZERO,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_new(new_cart: NewCart) -> Self {
        let mut cart = Self::new();
        cart.purchased = new_cart.purchased;
        for item in new_cart.items {
            cart.add_item(item);
        }
        cart
    }

    /// Append an item and recompute the cart total.
    /// Identical configurations are kept as separate items.
    pub fn add_item(&mut self, item: NewCartItem) -> &CartItem {
        self.items.push(CartItem {
            id: generate_id(),
            cart_id: self.id.clone(),
            product_id: item.product_id,
            selected_parts: item.selected_parts,
            total_price: item.total_price,
        });
        self.recalculate_total();
        self.updated_at = Utc::now();
        &self.items[self.items.len() - 1]
    }

    fn recalculate_total(&mut self) {
        self.total_price = self.items.iter().map(|item| item.total_price).sum();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

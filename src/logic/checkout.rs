use crate::error::{ConfiguratorError, EntityKind, Result};
use crate::logic::{CatalogIndex, ConfiguratorSession, PriceResolver};
use crate::model::{generate_configuration_fingerprint, Id, NewCartItem, Price, SelectedChoice};
use itertools::Itertools;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Final outcome of a configuration session, handed to the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationResult {
    pub product_id: Id,
    /// Choices in the order the buyer made them
    pub choices: Vec<SelectedChoice>,
    pub total_price: Price,
    /// Every part has a choice
    pub complete: bool,
    /// Chosen variants that are unavailable or out of stock
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unorderable: Vec<Id>,
    pub fingerprint: String,
}

impl ConfigurationResult {
    pub fn selected_variant_ids(&self) -> Vec<&str> {
        self.choices
            .iter()
            .map(|choice| choice.variant_id.as_str())
            .collect()
    }

    /// Cart line for this configuration; variant ids are comma separated
    pub fn to_cart_item(&self) -> NewCartItem {
        let selected_parts = if self.choices.is_empty() {
            None
        } else {
            Some(self.choices.iter().map(|choice| &choice.variant_id).join(","))
        };

        NewCartItem {
            product_id: self.product_id.clone(),
            selected_parts,
            total_price: self.total_price,
        }
    }
}

impl<'a> ConfiguratorSession<'a> {
    /// Snapshot the session for checkout. Stock is reported, not enforced.
    pub fn finalize(&self) -> ConfigurationResult {
        let index = self.index();
        let choices: Vec<SelectedChoice> = self.selection().iter().cloned().collect();

        let unorderable: Vec<Id> = choices
            .iter()
            .filter(|choice| !index.is_orderable(&choice.variant_id).unwrap_or(false))
            .map(|choice| choice.variant_id.clone())
            .collect();
        if !unorderable.is_empty() {
            warn!("Configuration includes unorderable variants: {:?}", unorderable);
        }

        let fingerprint = generate_configuration_fingerprint(
            index.product_id(),
            choices
                .iter()
                .map(|choice| (choice.part_id.as_str(), choice.variant_id.as_str())),
        );

        let result = ConfigurationResult {
            product_id: index.product_id().clone(),
            choices,
            total_price: self.total_price(),
            complete: self.is_complete(),
            unorderable,
            fingerprint,
        };

        info!(
            "Finalized configuration {} for product '{}': {} choice(s), total {}",
            &result.fingerprint[..12],
            result.product_id,
            result.choices.len(),
            result.total_price
        );
        result
    }
}

/// Recompute the price of a cart line from its variant ids
pub fn quote_cart_item(index: &CatalogIndex, item: &NewCartItem) -> Result<Price> {
    if item.product_id != *index.product_id() {
        return Err(ConfiguratorError::not_found(
            EntityKind::Product,
            item.product_id.clone(),
        ));
    }
    PriceResolver::quote(index, &item.selected_variant_ids())
}

/// Whether a cart line's total matches what the catalog says it costs
pub fn verify_cart_item(index: &CatalogIndex, item: &NewCartItem) -> Result<bool> {
    let expected = quote_cart_item(index, item)?;
    if expected != item.total_price {
        warn!(
            "Cart item for '{}' claims {} but the catalog prices it at {}",
            item.product_id, item.total_price, expected
        );
        return Ok(false);
    }
    Ok(true)
}

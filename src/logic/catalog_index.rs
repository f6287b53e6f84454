use crate::error::{ConfiguratorError, EntityKind, Result};
use crate::model::{CustomPrice, Id, Part, Price, Product, Variant};
use log::warn;
use std::collections::{BTreeSet, HashMap};

static NO_RESTRICTIONS: BTreeSet<Id> = BTreeSet::new();

/// Lookup tables precomputed from one catalog snapshot.
///
/// Construction never fails: malformed rules are skipped (with a warning)
/// so the wizard stays usable. A fresh snapshot needs a fresh index.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    product_id: Id,
    base_price: Price,
    parts: Vec<Part>,
    part_positions: HashMap<Id, usize>,
    /// variant id -> (part position, variant position)
    variant_locations: HashMap<Id, (usize, usize)>,
    incompatibilities: HashMap<Id, BTreeSet<Id>>,
    custom_prices: HashMap<Id, Vec<CustomPrice>>,
}

impl CatalogIndex {
    pub fn new(product: &Product) -> Self {
        let parts = product.parts.clone();

        let mut part_positions = HashMap::new();
        let mut variant_locations = HashMap::new();
        for (part_pos, part) in parts.iter().enumerate() {
            if part_positions.insert(part.id.clone(), part_pos).is_some() {
                warn!("Duplicate part id '{}' in product '{}'", part.id, product.id);
            }
            for (variant_pos, variant) in part.variants.iter().enumerate() {
                if variant_locations
                    .insert(variant.id.clone(), (part_pos, variant_pos))
                    .is_some()
                {
                    warn!("Duplicate variant id '{}' in product '{}'", variant.id, product.id);
                }
            }
        }

        let mut incompatibilities: HashMap<Id, BTreeSet<Id>> = HashMap::new();
        let mut custom_prices: HashMap<Id, Vec<CustomPrice>> = HashMap::new();

        for variant in parts.iter().flat_map(|part| part.variants.iter()) {
            for dependency in &variant.dependencies {
                if !variant_locations.contains_key(&dependency.variant_id) {
                    warn!(
                        "Skipping restrictions of unknown variant '{}'",
                        dependency.variant_id
                    );
                    continue;
                }
                for restricted in &dependency.restrictions {
                    if !variant_locations.contains_key(restricted) {
                        warn!(
                            "Variant '{}' restricts unknown variant '{}', ignoring",
                            dependency.variant_id, restricted
                        );
                        continue;
                    }
                    if *restricted == dependency.variant_id {
                        warn!("Variant '{}' restricts itself, ignoring", restricted);
                        continue;
                    }
                    incompatibilities
                        .entry(dependency.variant_id.clone())
                        .or_default()
                        .insert(restricted.clone());
                    incompatibilities
                        .entry(restricted.clone())
                        .or_default()
                        .insert(dependency.variant_id.clone());
                }
            }

            for custom_price in &variant.custom_prices {
                let records = custom_prices
                    .entry(custom_price.variant_id.clone())
                    .or_default();
                match records
                    .iter_mut()
                    .find(|record| record.dependent_variant_id == custom_price.dependent_variant_id)
                {
                    Some(existing) => {
                        warn!(
                            "Duplicate custom price for ({}, {}), keeping the last one",
                            custom_price.variant_id, custom_price.dependent_variant_id
                        );
                        *existing = custom_price.clone();
                    }
                    None => records.push(custom_price.clone()),
                }
            }
        }

        Self {
            product_id: product.id.clone(),
            base_price: product.base_price,
            parts,
            part_positions,
            variant_locations,
            incompatibilities,
            custom_prices,
        }
    }

    pub fn product_id(&self) -> &Id {
        &self.product_id
    }

    pub fn base_price(&self) -> Price {
        self.base_price
    }

    /// Parts in wizard step order
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Part configured at a 1-indexed wizard step
    pub fn part_at_step(&self, step: usize) -> Option<&Part> {
        step.checked_sub(1).and_then(|pos| self.parts.get(pos))
    }

    pub fn contains_variant(&self, variant_id: &str) -> bool {
        self.variant_locations.contains_key(variant_id)
    }

    pub fn part(&self, part_id: &str) -> Result<&Part> {
        self.part_positions
            .get(part_id)
            .map(|&pos| &self.parts[pos])
            .ok_or_else(|| ConfiguratorError::not_found(EntityKind::Part, part_id))
    }

    pub fn variant(&self, variant_id: &str) -> Result<&Variant> {
        let &(part_pos, variant_pos) = self.location(variant_id)?;
        Ok(&self.parts[part_pos].variants[variant_pos])
    }

    /// Part that owns a variant
    pub fn part_of(&self, variant_id: &str) -> Result<&Part> {
        let &(part_pos, _) = self.location(variant_id)?;
        Ok(&self.parts[part_pos])
    }

    pub fn variants_of(&self, part_id: &str) -> Result<&[Variant]> {
        Ok(&self.part(part_id)?.variants)
    }

    /// Variants that can never be selected together with `variant_id`
    pub fn incompatible_with(&self, variant_id: &str) -> Result<&BTreeSet<Id>> {
        self.location(variant_id)?;
        Ok(self
            .incompatibilities
            .get(variant_id)
            .unwrap_or(&NO_RESTRICTIONS))
    }

    pub fn are_compatible(&self, a: &str, b: &str) -> Result<bool> {
        self.location(b)?;
        Ok(!self.incompatible_with(a)?.contains(b))
    }

    /// Surcharge records where `variant_id` is the trigger
    pub fn custom_prices_for(&self, variant_id: &str) -> Result<&[CustomPrice]> {
        self.location(variant_id)?;
        Ok(self
            .custom_prices
            .get(variant_id)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Available and in stock. Informational only, selection does not
    /// check it.
    pub fn is_orderable(&self, variant_id: &str) -> Result<bool> {
        let variant = self.variant(variant_id)?;
        Ok(variant.is_available && variant.stock_quantity > 0)
    }

    fn location(&self, variant_id: &str) -> Result<&(usize, usize)> {
        self.variant_locations
            .get(variant_id)
            .ok_or_else(|| ConfiguratorError::not_found(EntityKind::Variant, variant_id))
    }
}

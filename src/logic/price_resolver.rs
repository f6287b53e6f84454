use crate::error::{ConfiguratorError, Result};
use crate::logic::find_conflicts;
use crate::logic::CatalogIndex;
use crate::model::{Price, SelectedChoice, Selection};

/// Deterministic pricing of a selection against a catalog index
pub struct PriceResolver;

impl PriceResolver {
    /// Base price + every chosen variant's price + applicable surcharges
    pub fn total(index: &CatalogIndex, selection: &Selection) -> Price {
        selection.iter().fold(index.base_price(), |total, choice| {
            total + choice.price + Self::surcharge(index, selection, &choice.variant_id)
        })
    }

    /// Sum of the surcharges triggered by `variant_id` whose dependent
    /// variant is selected in a part other than the trigger's own part.
    ///
    /// Unknown triggers carry no surcharge records.
    pub fn surcharge(index: &CatalogIndex, selection: &Selection, variant_id: &str) -> Price {
        let own_part = index.part_of(variant_id).ok().map(|part| part.id.as_str());

        index
            .custom_prices_for(variant_id)
            .unwrap_or_default()
            .iter()
            .filter(|record| {
                selection.iter().any(|choice| {
                    choice.variant_id == record.dependent_variant_id
                        && Some(choice.part_id.as_str()) != own_part
                })
            })
            .map(|record| record.custom_price)
            .sum()
    }

    /// Effective price of a variant under the current selection, before it
    /// is chosen: `base` plus its applicable surcharges
    pub fn adjusted_price(
        index: &CatalogIndex,
        selection: &Selection,
        variant_id: &str,
        base: Price,
    ) -> Result<Price> {
        if !index.contains_variant(variant_id) {
            return Err(ConfiguratorError::unknown_variant(variant_id));
        }
        Ok(base + Self::surcharge(index, selection, variant_id))
    }

    /// Price a list of chosen variant ids without a session, the way a
    /// cart total is checked after the fact. Stock is not enforced.
    pub fn quote<S: AsRef<str>>(index: &CatalogIndex, variant_ids: &[S]) -> Result<Price> {
        let mut selection = Selection::new();

        for variant_id in variant_ids {
            let variant_id = variant_id.as_ref();
            let variant = index
                .variant(variant_id)
                .map_err(|_| ConfiguratorError::unknown_variant(variant_id))?;
            let part = index.part_of(variant_id)?;

            if selection.get(&part.id).is_some() {
                return Err(ConfiguratorError::DuplicatePart {
                    part_id: part.id.clone(),
                });
            }

            let conflicts = find_conflicts(index, &selection, &part.id, variant_id);
            if !conflicts.is_empty() {
                return Err(ConfiguratorError::IncompatibleSelection {
                    variant_id: variant_id.to_string(),
                    conflicts,
                });
            }

            selection.insert(SelectedChoice::new(part.id.clone(), variant));
        }

        Ok(Self::total(index, &selection))
    }
}

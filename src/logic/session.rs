use crate::error::{ConfiguratorError, Result};
use crate::logic::{CatalogIndex, PriceResolver};
use crate::model::{HistoryEntry, Id, Part, Price, SelectedChoice, Selection, Variant};
use log::debug;

/// Variants already selected in parts other than `part_id` that cannot be
/// combined with `variant_id`
pub(crate) fn find_conflicts(
    index: &CatalogIndex,
    selection: &Selection,
    part_id: &str,
    variant_id: &str,
) -> Vec<Id> {
    let Ok(incompatible) = index.incompatible_with(variant_id) else {
        return Vec::new();
    };

    selection
        .iter()
        .filter(|choice| choice.part_id != part_id && incompatible.contains(&choice.variant_id))
        .map(|choice| choice.variant_id.clone())
        .collect()
}

/// One configuration session: the buyer's choices, the wizard step and the
/// undo history, priced against a borrowed catalog index.
///
/// The step is always (number of configured parts + 1), capped at
/// (part count + 1) which means every part is configured. Reaching the last
/// step does not lock the session; undo and re-selection stay available.
///
/// # Example
///
/// ```
/// use custom_builder::{seed, CatalogIndex, ConfiguratorSession};
///
/// let catalog = seed::seed_catalog();
/// let index = CatalogIndex::new(&catalog[0]);
/// let mut session = ConfiguratorSession::new(&index);
/// assert_eq!(session.current_step(), 1);
///
/// session.select_variant("road-bike-frame", "frame-standard").unwrap();
/// assert_eq!(session.current_step(), 2);
///
/// assert!(session.undo());
/// assert_eq!(session.total_price(), index.base_price());
/// ```
#[derive(Debug, Clone)]
pub struct ConfiguratorSession<'a> {
    index: &'a CatalogIndex,
    selection: Selection,
    history: Vec<HistoryEntry>,
    current_step: usize,
    total_price: Price,
}

impl<'a> ConfiguratorSession<'a> {
    pub fn new(index: &'a CatalogIndex) -> Self {
        Self {
            index,
            selection: Selection::new(),
            history: Vec::new(),
            current_step: 1,
            total_price: index.base_price(),
        }
    }

    pub fn index(&self) -> &'a CatalogIndex {
        self.index
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_price(&self) -> Price {
        self.total_price
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.current_step == self.index.part_count() + 1
    }

    /// First part, in step order, that has no choice yet
    pub fn current_part(&self) -> Option<&'a Part> {
        self.index
            .parts()
            .iter()
            .find(|part| self.selection.get(&part.id).is_none())
    }

    /// Choose `variant_id` for `part_id`, replacing any earlier choice for
    /// that part. Returns the new total.
    ///
    /// # Errors
    ///
    /// - `UnknownVariant` if the variant is not in the catalog or does not
    ///   belong to `part_id`
    /// - `IncompatibleSelection` if it conflicts with a variant chosen in
    ///   another part
    ///
    /// The session is unchanged when an error is returned.
    pub fn select_variant(&mut self, part_id: &str, variant_id: &str) -> Result<Price> {
        let variant = self.resolve_variant(part_id, variant_id)?;

        let conflicts = find_conflicts(self.index, &self.selection, part_id, variant_id);
        if !conflicts.is_empty() {
            debug!(
                "Rejected '{}' for part '{}': conflicts with {:?}",
                variant_id, part_id, conflicts
            );
            return Err(ConfiguratorError::IncompatibleSelection {
                variant_id: variant_id.to_string(),
                conflicts,
            });
        }

        let previous = self.selection.clone();
        if let Some(replaced) = self.selection.insert(SelectedChoice::new(part_id, variant)) {
            debug!("Part '{}': '{}' replaced by '{}'", part_id, replaced.variant_id, variant_id);
        }
        self.history.push(HistoryEntry {
            previous,
            part_id: part_id.to_string(),
            variant_id: variant_id.to_string(),
        });
        self.refresh();

        debug!(
            "Selected '{}' for part '{}': step {}, total {}",
            variant_id, part_id, self.current_step, self.total_price
        );
        Ok(self.total_price)
    }

    /// Revert the most recent accepted choice. Returns `false` (and does
    /// nothing) when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.pop() else {
            return false;
        };

        self.selection = entry.previous;
        self.refresh();
        debug!(
            "Undid '{}' for part '{}': step {}, total {}",
            entry.variant_id, entry.part_id, self.current_step, self.total_price
        );
        true
    }

    pub fn reset(&mut self) {
        self.selection.clear();
        self.history.clear();
        self.refresh();
        debug!("Session reset to base price {}", self.total_price);
    }

    /// `base` plus the surcharges `variant_id` would trigger against the
    /// current selection. Read-only.
    pub fn adjusted_price(&self, variant_id: &str, base: Price) -> Result<Price> {
        PriceResolver::adjusted_price(self.index, &self.selection, variant_id, base)
    }

    /// Variants of a part that `select_variant` would currently accept
    pub fn selectable_variants(&self, part_id: &str) -> Result<Vec<&'a Variant>> {
        Ok(self
            .index
            .variants_of(part_id)?
            .iter()
            .filter(|variant| {
                find_conflicts(self.index, &self.selection, part_id, &variant.id).is_empty()
            })
            .collect())
    }

    /// Rebuild a selection from empty by replaying the recorded choices
    pub fn replay_history(&self) -> Selection {
        let mut selection = Selection::new();
        for entry in &self.history {
            if let Ok(variant) = self.index.variant(&entry.variant_id) {
                selection.insert(SelectedChoice::new(entry.part_id.clone(), variant));
            }
        }
        selection
    }

    fn resolve_variant(&self, part_id: &str, variant_id: &str) -> Result<&'a Variant> {
        let index = self.index;
        let variant = index
            .variant(variant_id)
            .map_err(|_| ConfiguratorError::unknown_variant(variant_id))?;
        let owner = index
            .part_of(variant_id)
            .map_err(|_| ConfiguratorError::unknown_variant(variant_id))?;

        if owner.id != part_id {
            debug!(
                "Variant '{}' belongs to part '{}', not '{}'",
                variant_id, owner.id, part_id
            );
            return Err(ConfiguratorError::unknown_variant(variant_id));
        }
        Ok(variant)
    }

    fn refresh(&mut self) {
        self.current_step = (self.selection.len() + 1).min(self.index.part_count() + 1);
        self.total_price = PriceResolver::total(self.index, &self.selection);
    }
}

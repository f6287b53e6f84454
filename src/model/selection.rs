use crate::model::{Id, Price, Variant};
use serde::{Deserialize, Serialize};

/// The variant chosen for one part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedChoice {
    pub part_id: Id,
    pub variant_id: Id,
    pub name: String,
    pub price: Price,
}

impl SelectedChoice {
    pub fn new(part_id: impl Into<Id>, variant: &Variant) -> Self {
        Self {
            part_id: part_id.into(),
            variant_id: variant.id.clone(),
            name: variant.name.clone(),
            price: variant.price,
        }
    }
}

/// Current per-part choices, at most one per part.
///
/// Iteration follows the order in which parts were first chosen; replacing
/// a part's choice keeps that part's position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    choices: Vec<SelectedChoice>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn get(&self, part_id: &str) -> Option<&SelectedChoice> {
        self.choices.iter().find(|choice| choice.part_id == part_id)
    }

    pub fn contains_variant(&self, variant_id: &str) -> bool {
        self.choices.iter().any(|choice| choice.variant_id == variant_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectedChoice> {
        self.choices.iter()
    }

    pub fn choices(&self) -> &[SelectedChoice] {
        &self.choices
    }

    pub fn variant_ids(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|choice| choice.variant_id.as_str())
    }

    /// Record a choice, returning the one it replaced for the same part
    pub fn insert(&mut self, choice: SelectedChoice) -> Option<SelectedChoice> {
        match self
            .choices
            .iter_mut()
            .find(|existing| existing.part_id == choice.part_id)
        {
            Some(existing) => Some(std::mem::replace(existing, choice)),
            None => {
                self.choices.push(choice);
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.choices.clear();
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a SelectedChoice;
    type IntoIter = std::slice::Iter<'a, SelectedChoice>;

    fn into_iter(self) -> Self::IntoIter {
        self.choices.iter()
    }
}

/// One accepted choice together with the selection it replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub previous: Selection,
    pub part_id: Id,
    pub variant_id: Id,
}

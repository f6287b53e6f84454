use crate::model::Id;
use std::fmt;
use thiserror::Error;

/// Kind of catalog entity a failed lookup referred to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Product,
    Part,
    Variant,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Product => "product",
            EntityKind::Part => "part",
            EntityKind::Variant => "variant",
        };
        f.write_str(name)
    }
}

/// Errors raised by the configurator engine and its collaborators.
///
/// Every engine operation that returns one of these leaves the session
/// state exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfiguratorError {
    /// Index lookup of an id the catalog does not contain
    #[error("{kind} '{id}' not found in catalog")]
    NotFound { kind: EntityKind, id: Id },

    /// A selection or price projection referenced an absent variant
    #[error("Unknown variant '{variant_id}'")]
    UnknownVariant { variant_id: Id },

    /// The proposed variant conflicts with variants chosen in other parts
    #[error("Variant '{variant_id}' is incompatible with selected variant(s): {}", conflicts.join(", "))]
    IncompatibleSelection { variant_id: Id, conflicts: Vec<Id> },

    /// A quote listed two variants of the same part
    #[error("More than one variant selected for part '{part_id}'")]
    DuplicatePart { part_id: Id },

    #[error("Cart '{cart_id}' not found")]
    CartNotFound { cart_id: Id },

    /// Catalog input could not be decoded
    #[error("Invalid catalog: {0}")]
    Catalog(String),
}

impl ConfiguratorError {
    pub fn not_found(kind: EntityKind, id: impl Into<Id>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn unknown_variant(variant_id: impl Into<Id>) -> Self {
        Self::UnknownVariant {
            variant_id: variant_id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfiguratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incompatible_message_lists_conflicts() {
        let error = ConfiguratorError::IncompatibleSelection {
            variant_id: "wheel-thin".to_string(),
            conflicts: vec!["frame-standard".to_string(), "finish-matte".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Variant 'wheel-thin' is incompatible with selected variant(s): frame-standard, finish-matte"
        );
    }

    #[test]
    fn test_not_found_message_names_entity_kind() {
        let error = ConfiguratorError::not_found(EntityKind::Part, "saddle");
        assert_eq!(error.to_string(), "part 'saddle' not found in catalog");
    }
}

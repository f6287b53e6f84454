use itertools::Itertools;
use rust_decimal::Decimal;
use uuid::Uuid;

pub type Id = String;

/// Money amount. Decimal so repeated undo/redo never drifts.
pub type Price = Decimal;

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

/// Generate a deterministic fingerprint for a configured product.
///
/// The (part, variant) pairs are sorted first, so two sessions that end up
/// with the same choices get the same fingerprint whatever order the buyer
/// picked them in.
pub fn generate_configuration_fingerprint<'a, I>(product_id: &str, choices: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(format!("product:{}\n", product_id));
    for (part_id, variant_id) in choices.into_iter().sorted() {
        hasher.update(format!("choice:{}={}\n", part_id, variant_id));
    }

    hex::encode(hasher.finalize())
}

/// Split a comma-delimited id list, trimming whitespace and dropping empty
/// segments.
pub fn split_id_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|id| !id.is_empty())
}

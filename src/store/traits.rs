use crate::model::{Cart, Id, NewCart, NewCartItem, Product};
use anyhow::Result;

/// Supplies catalog snapshots. Called before a session is built, never
/// while one is being mutated.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn get_product(&self, id: &Id) -> Result<Option<Product>>;
}

/// Receives finalized configurations
#[async_trait::async_trait]
pub trait CartStore: Send + Sync {
    /// Create a cart; its total is computed from the items
    async fn create_cart(&self, cart: NewCart) -> Result<Cart>;
    async fn get_cart(&self, id: &Id) -> Result<Option<Cart>>;
    /// Append an item to an existing cart and return the updated cart
    async fn add_item(&self, cart_id: &Id, item: NewCartItem) -> Result<Cart>;
}

pub trait Store: CatalogSource + CartStore + Send + Sync {}
impl<T: CatalogSource + CartStore> Store for T {}

use crate::error::ConfiguratorError;
use crate::model::{Cart, Id, NewCart, NewCartItem, Product};
use crate::seed;
use crate::store::traits::{CartStore, CatalogSource};
use anyhow::{Context, Result};
use log::info;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;

/// Process-local catalog and cart storage. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    products: RwLock<Vec<Product>>,
    carts: RwLock<HashMap<Id, Cart>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
            carts: RwLock::new(HashMap::new()),
        }
    }

    /// Store preloaded with the demonstration bike shop
    pub fn seeded() -> Self {
        Self::with_products(seed::seed_catalog())
    }

    /// Load a catalog given as a JSON list of products
    pub fn from_json_str(json: &str) -> crate::error::Result<Self> {
        let products: Vec<Product> =
            serde_json::from_str(json).map_err(|e| ConfiguratorError::Catalog(e.to_string()))?;
        Ok(Self::with_products(products))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let store = Self::from_json_str(&json)
            .with_context(|| format!("Failed to load catalog file {}", path.display()))?;
        info!(
            "Loaded {} product(s) from {}",
            store.products.read().len(),
            path.display()
        );
        Ok(store)
    }

    pub fn cart_count(&self) -> usize {
        self.carts.read().len()
    }
}

#[async_trait::async_trait]
impl CatalogSource for InMemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().clone())
    }

    async fn get_product(&self, id: &Id) -> Result<Option<Product>> {
        Ok(self
            .products
            .read()
            .iter()
            .find(|product| product.id == *id)
            .cloned())
    }
}

#[async_trait::async_trait]
impl CartStore for InMemoryStore {
    async fn create_cart(&self, cart: NewCart) -> Result<Cart> {
        let cart = Cart::from_new(cart);
        info!(
            "Created cart {} with {} item(s), total {}",
            cart.id,
            cart.items.len(),
            cart.total_price
        );
        self.carts.write().insert(cart.id.clone(), cart.clone());
        Ok(cart)
    }

    async fn get_cart(&self, id: &Id) -> Result<Option<Cart>> {
        Ok(self.carts.read().get(id).cloned())
    }

    async fn add_item(&self, cart_id: &Id, item: NewCartItem) -> Result<Cart> {
        let mut carts = self.carts.write();
        let cart = carts
            .get_mut(cart_id)
            .ok_or_else(|| ConfiguratorError::CartNotFound {
                cart_id: cart_id.clone(),
            })?;
        cart.add_item(item);
        info!("Cart {} now totals {}", cart.id, cart.total_price);
        Ok(cart.clone())
    }
}

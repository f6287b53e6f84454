pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

pub use error::{ConfiguratorError, EntityKind, Result};

// Export engine types
pub use logic::{
    quote_cart_item, verify_cart_item, CatalogIndex, ConfigurationResult, ConfiguratorSession,
    PriceResolver,
};

// Export all model types
pub use model::*;

// Export store types
pub use store::{CartStore, CatalogSource, InMemoryStore, Store};

#[cfg(test)]
mod tests {
    use crate::model::Product;
    use crate::{CatalogIndex, ConfiguratorSession};
    use rust_decimal_macros::dec;

    #[test]
    fn test_catalog_from_frontend_json_shape() {
        // Catalog as the storefront receives it: legacy delimited restrictions,
        // custom prices nested under their trigger variant
        let json = r#"{
            "id": "1",
            "name": "Test Bike",
            "description": "This is a test bike description.",
            "category": "Bikes",
            "base_price": 499.99,
            "is_custom": true,
            "is_available": true,
            "stock_quantity": 4,
            "parts": [
                {
                    "id": "1", "name": "Frame", "product_id": "1",
                    "variants": [
                        {"id": "1-1", "part_id": "1", "name": "Aluminum Frame", "price": 300,
                         "is_available": true, "stock_quantity": 4, "custom_prices": [], "dependencies": []},
                        {"id": "1-2", "part_id": "1", "name": "Carbon Fiber Frame", "price": 500,
                         "is_available": true, "stock_quantity": 4, "custom_prices": [],
                         "dependencies": [{"variant_id": "1-2", "restrictions": "2-1"}]}
                    ]
                },
                {
                    "id": "2", "name": "Wheels", "product_id": "1",
                    "variants": [
                        {"id": "2-1", "part_id": "2", "name": "Standard Wheels", "price": 150,
                         "is_available": true, "stock_quantity": 4, "custom_prices": [], "dependencies": []},
                        {"id": "2-2", "part_id": "2", "name": "Racing Wheels", "price": 250,
                         "is_available": true, "stock_quantity": 4,
                         "custom_prices": [{"variant_id": "2-2", "dependent_variant_id": "1-1", "custom_price": 90}],
                         "dependencies": []}
                    ]
                }
            ]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        let index = CatalogIndex::new(&product);
        let mut session = ConfiguratorSession::new(&index);

        session.select_variant("1", "1-1").unwrap();
        assert_eq!(session.current_step(), 2);
        session.select_variant("2", "2-2").unwrap();
        assert_eq!(session.total_price(), dec!(1139.99));

        // Restriction recorded on the frame blocks the standard wheels from either side
        session.reset();
        session.select_variant("2", "2-1").unwrap();
        assert!(session.select_variant("1", "1-2").is_err());
        println!("✓ Frontend catalog shape indexes and prices correctly");
    }
}

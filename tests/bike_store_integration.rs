use custom_builder::{
    quote_cart_item, verify_cart_item, CartStore, CatalogIndex, CatalogSource,
    ConfiguratorError, ConfiguratorSession, InMemoryStore, NewCart,
};
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_bike_store_complete_workflow() {
    println!("🚀 Starting Bike Store Integration Test");
    let store = InMemoryStore::seeded();

    println!("1. Loading the road bike from the catalog");
    let product = store
        .get_product(&"road-bike".to_string())
        .await
        .expect("Failed to query catalog")
        .expect("Road bike missing from seed catalog");
    let index = CatalogIndex::new(&product);
    let mut session = ConfiguratorSession::new(&index);
    assert_eq!(session.total_price(), dec!(200));
    assert_eq!(session.current_step(), 1);

    println!("2. Choosing the standard frame");
    let total = session
        .select_variant("road-bike-frame", "frame-standard")
        .expect("Standard frame should be selectable");
    assert_eq!(total, dec!(300));

    println!("3. Thin wheels are rejected next to the standard frame");
    let err = session
        .select_variant("road-bike-wheels", "wheel-thin")
        .unwrap_err();
    assert_eq!(
        err,
        ConfiguratorError::IncompatibleSelection {
            variant_id: "wheel-thin".to_string(),
            conflicts: vec!["frame-standard".to_string()],
        }
    );
    assert_eq!(session.total_price(), dec!(300));
    assert_eq!(session.history_depth(), 1);

    println!("4. Switching to the diamond frame unlocks the thin wheels");
    session
        .select_variant("road-bike-frame", "frame-diamond")
        .unwrap();
    session.select_variant("road-bike-wheels", "wheel-thin").unwrap();
    assert_eq!(session.total_price(), dec!(640));

    println!("5. Shiny finish and carbon handlebar add their diamond surcharges");
    session
        .select_variant("road-bike-finish", "finish-shiny")
        .unwrap();
    session
        .select_variant("road-bike-handlebar", "handlebar-carbon")
        .unwrap();
    assert_eq!(session.total_price(), dec!(1180));
    assert!(session.is_complete());
    assert_eq!(session.current_step(), 5);

    println!("6. Undo the handlebar, then choose the standard one");
    assert!(session.undo());
    assert_eq!(session.total_price(), dec!(890));
    session
        .select_variant("road-bike-handlebar", "handlebar-standard")
        .unwrap();
    assert_eq!(session.total_price(), dec!(990));

    println!("7. Finalizing into a new cart");
    let result = session.finalize();
    assert!(result.complete);
    let item = result.to_cart_item();
    assert!(verify_cart_item(&index, &item).unwrap());

    let cart = store
        .create_cart(NewCart {
            purchased: false,
            items: vec![item.clone()],
        })
        .await
        .expect("Failed to create cart");
    assert_eq!(cart.total_price, dec!(990));
    assert_eq!(
        cart.items[0].selected_variant_ids(),
        vec![
            "frame-diamond",
            "wheel-thin",
            "finish-shiny",
            "handlebar-standard"
        ]
    );

    println!("8. A second, minimal configuration goes into the same cart");
    session.reset();
    assert_eq!(session.total_price(), dec!(200));
    assert!(!session.can_undo());
    session
        .select_variant("road-bike-frame", "frame-standard")
        .unwrap();
    let second = session.finalize().to_cart_item();
    assert_eq!(quote_cart_item(&index, &second).unwrap(), dec!(300));

    let cart = store
        .add_item(&cart.id, second)
        .await
        .expect("Failed to add item");
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.total_price, dec!(1290));

    let stored = store.get_cart(&cart.id).await.unwrap().unwrap();
    assert_eq!(stored.total_price, dec!(1290));
    println!("✅ Bike store workflow complete");
}

#[tokio::test]
async fn test_tampered_cart_item_is_detected() {
    let store = InMemoryStore::seeded();
    let products = store.list_products().await.unwrap();
    let road_bike = products
        .iter()
        .find(|product| product.id == "road-bike")
        .unwrap();
    let index = CatalogIndex::new(road_bike);

    let mut session = ConfiguratorSession::new(&index);
    session
        .select_variant("road-bike-frame", "frame-diamond")
        .unwrap();
    session
        .select_variant("road-bike-finish", "finish-shiny")
        .unwrap();

    let mut item = session.finalize().to_cart_item();
    assert_eq!(item.total_price, dec!(650));

    item.total_price = dec!(400);
    assert!(!verify_cart_item(&index, &item).unwrap());

    // Matte next to the diamond frame cannot be quoted at all
    item.selected_parts = Some("frame-diamond,finish-matte".to_string());
    assert!(matches!(
        quote_cart_item(&index, &item),
        Err(ConfiguratorError::IncompatibleSelection { .. })
    ));

    item.selected_parts = Some("frame-diamond,frame-standard".to_string());
    assert_eq!(
        quote_cart_item(&index, &item).unwrap_err(),
        ConfiguratorError::DuplicatePart {
            part_id: "road-bike-frame".to_string()
        }
    );
}

#[tokio::test]
async fn test_catalog_round_trips_through_json() {
    let products = InMemoryStore::seeded().list_products().await.unwrap();
    let json = serde_json::to_string(&products).unwrap();

    let store = InMemoryStore::from_json_str(&json).unwrap();
    let reloaded = store
        .get_product(&"road-bike".to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded, products[0]);

    let index = CatalogIndex::new(&reloaded);
    let mut session = ConfiguratorSession::new(&index);
    session
        .select_variant("road-bike-frame", "frame-diamond")
        .unwrap();
    assert!(session
        .select_variant("road-bike-finish", "finish-matte")
        .is_err());
}

use crate::model::{Part, Product, Variant};
use rust_decimal_macros::dec;

/// Helper to build a part whose variants all point back at it
fn create_part(product_id: &str, part_id: &str, name: &str, variants: Vec<Variant>) -> Part {
    let variants = variants
        .into_iter()
        .map(|mut variant| {
            variant.part_id = part_id.to_string();
            variant
        })
        .collect();
    Part::new(part_id, product_id, name, variants)
}

/// The customisable road bike: four parts, two surcharges, two
/// incompatibilities.
pub fn road_bike() -> Product {
    let handlebar = create_part(
        "road-bike",
        "road-bike-handlebar",
        "Handlebar",
        vec![
            Variant::new("handlebar-standard", "", "Standard Road Handlebar", dec!(100.00))
                .with_stock(true, 2),
            // Paired with the Diamond frame it needs extra fitting work
            Variant::new(
                "handlebar-carbon",
                "",
                "Custom Carbon Fiber Road Handlebar",
                dec!(200.00),
            )
            .with_stock(true, 5)
            .with_custom_price("frame-diamond", dec!(90.00)),
        ],
    );

    let frame = create_part(
        "road-bike",
        "road-bike-frame",
        "Frame",
        vec![
            Variant::new("frame-standard", "", "Standard Road Frame", dec!(100.00))
                .with_stock(true, 10),
            Variant::new("frame-diamond", "", "Diamond Road Frame", dec!(200.00))
                .with_stock(true, 10)
                .with_restrictions(["finish-matte"]),
        ],
    );

    let wheels = create_part(
        "road-bike",
        "road-bike-wheels",
        "Wheels",
        vec![
            Variant::new("wheel-standard", "", "Standard Road Wheel", dec!(200.00))
                .with_stock(true, 10),
            Variant::new("wheel-thin", "", "Thin Road Wheel", dec!(240.00))
                .with_stock(true, 5)
                .with_restrictions(["frame-standard"]),
        ],
    );

    let finish = create_part(
        "road-bike",
        "road-bike-finish",
        "Finish",
        vec![
            Variant::new("finish-matte", "", "Matte", dec!(100.00)).with_stock(true, 15),
            Variant::new("finish-shiny", "", "Shiny", dec!(200.00))
                .with_stock(true, 5)
                .with_custom_price("frame-diamond", dec!(50.00)),
            Variant::new("finish-red", "", "Red", dec!(100.00)).with_stock(false, 0),
        ],
    );

    Product::new("road-bike", "Road Bike", "Bike", dec!(200.00))
        .with_description("A high-performance road bike for fast rides.")
        .with_stock(true, 10)
        .with_parts(vec![handlebar, frame, wheels, finish])
}

/// Demonstration bike shop catalog. The customisable road bike comes first.
pub fn seed_catalog() -> Vec<Product> {
    vec![
        road_bike(),
        Product::new("mountain-bike", "Mountain Bike", "Bike", dec!(800.00))
            .with_description("Built for rugged trails and tough terrain.")
            .with_stock(true, 5),
        Product::new("fixed-gear-bike", "Fixed-Gear Bike", "Bike", dec!(920.00))
            .with_stock(false, 0),
    ]
}

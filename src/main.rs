use anyhow::{anyhow, Context};
use custom_builder::config::AppConfig;
use custom_builder::{
    CartStore, CatalogIndex, CatalogSource, ConfiguratorSession, Id, InMemoryStore, NewCart,
    Product,
};
use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    println!("Custom Builder: product configurator");

    let store = match &config.catalog.path {
        Some(path) => InMemoryStore::from_json_file(path)?,
        None => {
            info!("No catalog path configured, using the seed catalog");
            InMemoryStore::seeded()
        }
    };

    let product = pick_product(&store, config.catalog.product_id.as_ref()).await?;
    println!(
        "Configuring '{}' ({} part(s), base price {})",
        product.name,
        product.parts.len(),
        product.base_price
    );

    let index = CatalogIndex::new(&product);
    run_shell(&store, &index).await
}

async fn pick_product(store: &InMemoryStore, product_id: Option<&Id>) -> anyhow::Result<Product> {
    match product_id {
        Some(id) => store
            .get_product(id)
            .await?
            .ok_or_else(|| anyhow!("Product '{}' is not in the catalog", id)),
        None => store
            .list_products()
            .await?
            .into_iter()
            .find(|product| product.is_custom && !product.parts.is_empty())
            .ok_or_else(|| anyhow!("The catalog has no customisable product")),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  parts                    list parts and their variants");
    println!("  select <part> <variant>  choose a variant for a part");
    println!("  undo                     revert the last selection");
    println!("  reset                    clear every selection");
    println!("  show                     print the current selection and total");
    println!("  finalize                 add the configuration to the cart");
    println!("  quit                     leave");
}

fn print_parts(session: &ConfiguratorSession<'_>) {
    let index = session.index();
    for part in index.parts() {
        let chosen = session.selection().get(&part.id);
        println!("{} [{}]", part.name, part.id);
        for variant in &part.variants {
            let marker = match chosen {
                Some(choice) if choice.variant_id == variant.id => "*",
                _ => " ",
            };
            let price = session
                .adjusted_price(&variant.id, variant.price)
                .unwrap_or(variant.price);
            let selectable = session
                .selectable_variants(&part.id)
                .map(|variants| variants.iter().any(|v| v.id == variant.id))
                .unwrap_or(false);
            println!(
                "  {} {:<24} {:>10}{}",
                marker,
                variant.id,
                price,
                if selectable { "" } else { "  (incompatible)" }
            );
        }
    }
}

fn print_selection(session: &ConfiguratorSession<'_>) {
    for choice in session.selection() {
        println!("  {} -> {} ({})", choice.part_id, choice.name, choice.price);
    }
    match session.current_part() {
        Some(part) => println!(
            "Step {}/{}: next part is {}",
            session.current_step(),
            session.index().part_count(),
            part.name
        ),
        None => println!("All parts configured"),
    }
    println!("Total: {}", session.total_price());
}

async fn run_shell(store: &InMemoryStore, index: &CatalogIndex) -> anyhow::Result<()> {
    let mut session = ConfiguratorSession::new(index);
    let mut cart_id: Option<Id> = None;

    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["parts"] => print_parts(&session),
            ["select", part_id, variant_id] => match session.select_variant(part_id, variant_id) {
                Ok(total) => println!("Total: {}", total),
                Err(e) => println!("Rejected: {}", e),
            },
            ["undo"] => {
                if session.undo() {
                    println!("Total: {}", session.total_price());
                } else {
                    println!("Nothing to undo");
                }
            }
            ["reset"] => {
                session.reset();
                println!("Total: {}", session.total_price());
            }
            ["show"] => print_selection(&session),
            ["finalize"] => {
                let result = session.finalize();
                let item = result.to_cart_item();
                let cart = match &cart_id {
                    Some(id) => store.add_item(id, item).await,
                    None => {
                        store
                            .create_cart(NewCart {
                                purchased: false,
                                items: vec![item],
                            })
                            .await
                    }
                };
                match cart {
                    Ok(cart) => {
                        cart_id = Some(cart.id.clone());
                        let json = serde_json::to_string_pretty(&cart)
                            .context("Failed to serialize cart")?;
                        println!("{}", json);
                        session.reset();
                    }
                    Err(e) => error!("Failed to store configuration: {:#}", e),
                }
            }
            ["quit"] | ["exit"] => break,
            ["help"] => print_help(),
            _ => println!("Unknown command: {}", line.trim()),
        }
    }

    Ok(())
}

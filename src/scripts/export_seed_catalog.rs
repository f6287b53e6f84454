use anyhow::{Context, Result};
use custom_builder::seed;

/// Write the demonstration catalog as JSON, to the given path or stdout.
/// The output is accepted by `catalog.path`.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let catalog = seed::seed_catalog();
    let json = serde_json::to_string_pretty(&catalog).context("Failed to serialize catalog")?;

    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path))?;
            log::info!("Exported {} product(s) to {}", catalog.len(), path);
        }
        None => println!("{}", json),
    }

    Ok(())
}

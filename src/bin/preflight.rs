use catalog_store::infra::config::Config;
use catalog_store::{JsonFileStore, RecordStore};
use std::collections::HashSet;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Reads env vars (all optional):\n\
           CATALOG_DATA_FILE (default products.json), CATALOG_BIND_ADDR, LOG_FORMAT\n\
         Creates the catalog document as an empty array if it does not exist.\n"
    );
    std::process::exit(2);
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let config = Config::from_env()?;

    println!("> Preflight:");
    println!("  CATALOG_DATA_FILE={}", config.data_file.display());
    println!("  CATALOG_BIND_ADDR={}", config.bind_addr);
    println!("  LOG_FORMAT={:?}", config.log_format);

    let store = JsonFileStore::new(&config.data_file);
    let products = store
        .load_all()
        .map_err(|e| anyhow::anyhow!("Catalog document is not usable: {}", e))?;

    let mut seen = HashSet::new();
    let duplicates: Vec<i64> = products
        .iter()
        .filter(|p| !seen.insert(p.id))
        .map(|p| p.id)
        .collect();

    println!("  Products: {}", products.len());
    match products.iter().map(|p| p.id).max() {
        Some(max) => println!("  Max id: {}", max),
        None => println!("  Catalog is empty (next id will be 1)"),
    }
    if !duplicates.is_empty() {
        return Err(anyhow::anyhow!(
            "Catalog document has duplicate ids: {:?}",
            duplicates
        ));
    }

    println!("> Preflight OK.");
    Ok(())
}

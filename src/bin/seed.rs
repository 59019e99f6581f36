use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use inventory_client::{
    config::ClientConfig,
    dto::{products::CreateProductRequest, sellers::CreateSellerRequest},
    services::entity_store::Collection,
    state::AppState,
};

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Create products and sellers from a JSON fixture")]
struct Cli {
    /// Fixture file: {"products": [...], "sellers": [...]}
    fixture: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    products: Vec<CreateProductRequest>,
    #[serde(default)]
    sellers: Vec<CreateSellerRequest>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    let state = AppState::new(&config)?;

    let raw = tokio::fs::read_to_string(&cli.fixture).await?;
    let fixture: Fixture = serde_json::from_str(&raw)?;

    for product in &fixture.products {
        state.products.create(product).await?;
        println!("Seeded product {}", product.name);
    }
    for seller in &fixture.sellers {
        state.sellers.create(seller).await?;
        println!("Seeded seller {}", seller.email);
    }

    println!(
        "Seed completed. {} products, {} sellers on the server",
        state.products.snapshot().len(),
        state.sellers.snapshot().len()
    );
    Ok(())
}

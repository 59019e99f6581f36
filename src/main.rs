use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventory_client::{
    config::ClientConfig,
    dto::{products::ProductField, sellers::SellerField},
    services::{
        confirm::{Confirm, FixedConfirm, StdinConfirm, request_approval},
        entity_store::Collection,
    },
    state::AppState,
};

#[derive(Parser)]
#[command(name = "inventory-client")]
#[command(about = "Inventory management client for the shopping backend")]
struct Cli {
    #[arg(long, env = "INVENTORY_USERNAME")]
    username: String,

    #[arg(long, env = "INVENTORY_PASSWORD", hide_env_values = true)]
    password: String,

    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    yes: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Stats, products and categories in one view (default)
    Dashboard,

    /// List products with their display images
    Products,

    /// List sellers
    Sellers,

    AddProduct {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "0")]
        price: String,
        #[arg(long, default_value = "0")]
        stock: String,
    },

    EditProduct {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        stock: Option<String>,
    },

    DeleteProduct { id: i64 },

    AddSeller {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        seller_password: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },

    EditSeller {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        seller_password: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },

    DeleteSeller { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,inventory_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    let state = AppState::new(&config)?;
    tracing::info!(api = %state.api.base_url(), "client ready");

    state.session.login(&cli.username, &cli.password).await?;

    let gate: Box<dyn Confirm> = if cli.yes {
        Box::new(FixedConfirm(true))
    } else {
        Box::new(StdinConfirm)
    };

    let result = run(&state, cli.command.unwrap_or(Commands::Dashboard), gate.as_ref()).await;
    state.session.logout();
    result
}

async fn run(state: &AppState, command: Commands, gate: &dyn Confirm) -> anyhow::Result<()> {
    match command {
        Commands::Dashboard => {
            let view = state.dashboard().await?;
            let stats = &view.stats;
            println!(
                "products: {}  categories: {}  stock: {}  inventory value: {:.2}",
                stats.total_products,
                stats.total_categories,
                stats.total_stock,
                stats.total_inventory_value
            );
            for product in view.products.iter() {
                println!(
                    "#{:<4} {:<30} {:<15} {:>10.2} {:>6}  {}",
                    product.id,
                    product.name,
                    product.category_name,
                    product.price,
                    product.stock,
                    state.images.resolve(product)
                );
            }
            for orphan in view.orphaned_products() {
                tracing::warn!(
                    product_id = orphan.id,
                    category = %orphan.category_name,
                    "product refers to an unknown category"
                );
            }
        }
        Commands::Products => {
            for product in state.products.list().await?.iter() {
                println!(
                    "#{:<4} {:<30} {:<15} {}",
                    product.id,
                    product.name,
                    product.category_name,
                    state.images.resolve(product)
                );
            }
        }
        Commands::Sellers => {
            for seller in state.sellers.list().await?.iter() {
                println!(
                    "#{:<4} {:<25} {:<30} {:<15} {}",
                    seller.id,
                    seller.name,
                    seller.email,
                    seller.phone.as_deref().unwrap_or("N/A"),
                    seller.address.as_deref().unwrap_or("N/A")
                );
            }
        }
        Commands::AddProduct {
            name,
            category,
            price,
            stock,
        } => {
            let editor = state.product_editor();
            editor.open_add();
            editor.field_change(ProductField::Name, name)?;
            editor.field_change(ProductField::CategoryName, category)?;
            editor.field_change(ProductField::Price, price)?;
            editor.field_change(ProductField::Stock, stock)?;
            println!("{}", editor.submit().await?);
        }
        Commands::EditProduct {
            id,
            name,
            category,
            price,
            stock,
        } => {
            state.products.list().await?;
            let product = state
                .products
                .find(id)
                .ok_or_else(|| anyhow::anyhow!("product #{id} not found"))?;
            let editor = state.product_editor();
            editor.open_edit(&product);
            let changes = [
                (ProductField::Name, name),
                (ProductField::CategoryName, category),
                (ProductField::Price, price),
                (ProductField::Stock, stock),
            ];
            for (field, value) in changes {
                if let Some(value) = value {
                    editor.field_change(field, value)?;
                }
            }
            println!("{}", editor.submit().await?);
        }
        Commands::DeleteProduct { id } => {
            let Some(approval) = request_approval(gate, "Are you sure?") else {
                return Ok(());
            };
            state.products.remove(id, approval).await?;
            println!("Product deleted successfully!");
        }
        Commands::AddSeller {
            name,
            email,
            seller_password,
            phone,
            address,
        } => {
            let editor = state.seller_editor();
            editor.open_add();
            editor.field_change(SellerField::Name, name)?;
            editor.field_change(SellerField::Email, email)?;
            editor.field_change(SellerField::Password, seller_password)?;
            if let Some(phone) = phone {
                editor.field_change(SellerField::Phone, phone)?;
            }
            if let Some(address) = address {
                editor.field_change(SellerField::Address, address)?;
            }
            println!("{}", editor.submit().await?);
        }
        Commands::EditSeller {
            id,
            name,
            email,
            seller_password,
            phone,
            address,
            status,
        } => {
            state.sellers.list().await?;
            let seller = state
                .sellers
                .find(id)
                .ok_or_else(|| anyhow::anyhow!("seller #{id} not found"))?;
            let editor = state.seller_editor();
            editor.open_edit(&seller);
            let changes = [
                (SellerField::Name, name),
                (SellerField::Email, email),
                (SellerField::Password, seller_password),
                (SellerField::Phone, phone),
                (SellerField::Address, address),
                (SellerField::StatusId, status),
            ];
            for (field, value) in changes {
                if let Some(value) = value {
                    editor.field_change(field, value)?;
                }
            }
            println!("{}", editor.submit().await?);
        }
        Commands::DeleteSeller { id } => {
            let prompt = "Are you sure you want to delete this seller?";
            let Some(approval) = request_approval(gate, prompt) else {
                return Ok(());
            };
            state.sellers.remove(id, approval).await?;
            println!("Seller deleted successfully!");
        }
    }
    Ok(())
}

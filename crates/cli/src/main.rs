//! Go Marketplace CLI - Inspect and edit the persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Add a product by hand
//! gm-cli add --id 1234 --title "Chaveiro" --image-url https://cdn/img.png --price 15.90
//!
//! # Add a product from the catalogue backend
//! gm-cli add-product 1234
//!
//! # Change quantities
//! gm-cli increment 1234
//! gm-cli decrement 1234
//!
//! # Show the floating summary, or the full cart
//! gm-cli show
//! gm-cli open
//!
//! # List the catalogue
//! gm-cli products
//! ```
//!
//! # Commands
//!
//! - `add` / `add-product` - Add one unit of a product
//! - `increment` / `decrement` - Change a line item's quantity
//! - `show` - Print the cart summary
//! - `open` - Print the full cart screen
//! - `products` - List products from the catalogue backend
//!
//! Configuration comes from `GM_*` environment variables (see
//! `go_marketplace_cart::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "gm-cli")]
#[command(author, version, about = "Go Marketplace cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product described on the command line
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Product title
        #[arg(short, long)]
        title: String,

        /// Product image URL
        #[arg(short, long, default_value = "")]
        image_url: String,

        /// Unit price
        #[arg(short, long)]
        price: Decimal,
    },
    /// Add one unit of a product from the catalogue backend
    AddProduct {
        /// Product ID
        id: String,
    },
    /// Increase a line item's quantity by one
    Increment {
        /// Product ID
        id: String,
    },
    /// Decrease a line item's quantity by one, removing it at zero
    Decrement {
        /// Product ID
        id: String,
    },
    /// Print the cart summary
    Show,
    /// Print the full cart
    Open,
    /// List products from the catalogue backend
    Products,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gm_cli=info,go_marketplace_cart=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let state = commands::load_state().await?;

    match cli.command {
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => commands::cart::add(&state, &id, &title, &image_url, price).await?,
        Commands::AddProduct { id } => commands::cart::add_product(&state, &id).await?,
        Commands::Increment { id } => commands::cart::increment(&state, &id).await?,
        Commands::Decrement { id } => commands::cart::decrement(&state, &id).await?,
        Commands::Show => commands::cart::show(&state)?,
        Commands::Open => commands::cart::open(&state)?,
        Commands::Products => commands::catalogue::list(&state).await?,
    }
    Ok(())
}

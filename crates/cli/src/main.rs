//! GoMarketplace CLI - cart inspection and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart contents
//! gm-cli show
//!
//! # Add a product to the cart (adding again increments the line)
//! gm-cli add -i p-1 -t "Olive Hat" --image-url https://img.example/hat.jpg -p 10.99
//!
//! # Change a line's quantity
//! gm-cli increment p-1
//! gm-cli decrement p-1
//!
//! # Empty the cart
//! gm-cli clear
//! ```
//!
//! All commands operate on the same on-device database the embedding app
//! uses (see `GOMARKETPLACE_DATA_DIR`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gm-cli")]
#[command(author, version, about = "GoMarketplace cart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart contents and totals
    Show,
    /// Add a product to the cart (an existing line is incremented)
    Add {
        /// Product identifier
        #[arg(short, long)]
        id: String,

        /// Product title
        #[arg(short, long)]
        title: String,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Unit price (e.g. 10.99)
        #[arg(short, long)]
        price: String,
    },
    /// Increase the quantity of a cart line by 1
    Increment {
        /// Product identifier
        id: String,
    },
    /// Decrease the quantity of a cart line by 1 (a line at 0 is removed)
    Decrement {
        /// Product identifier
        id: String,
    },
    /// Empty the cart and remove the persisted snapshot
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Show => commands::cart::show().await?,
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => {
            commands::cart::add(&id, &title, &image_url, &price).await?;
        }
        Commands::Increment { id } => commands::cart::increment(&id).await?,
        Commands::Decrement { id } => commands::cart::decrement(&id).await?,
        Commands::Clear => commands::cart::clear().await?,
    }
    Ok(())
}

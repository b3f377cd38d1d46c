//! Vinsara CLI - inspect and edit the stored cart and session.
//!
//! Works on the same file-backed client storage the storefront uses, so a
//! cart can be examined or repaired without a browser.
//!
//! # Usage
//!
//! ```bash
//! # Show the stored cart
//! vs-cli cart list
//!
//! # Add two kurtas in size M
//! vs-cli cart add --id silk-kurta --title "Silk Kurta" --price 1299.50 \
//!     --size M --sku KUR-001 --quantity 2
//!
//! # Drop lines reported as purchased
//! vs-cli cart purchased KUR-001-M
//!
//! # Forget the auth token and cart
//! vs-cli logout
//! ```
//!
//! # Commands
//!
//! - `cart` - List and edit cart lines
//! - `logout` - Clear the stored session

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use thiserror::Error;
use vinsara_storefront::config::{ConfigError, StorefrontConfig};
use vinsara_storefront::storage::{FileStorage, StorageError};
use vinsara_storefront::telemetry::{LogFormat, init_tracing};

mod commands;

const DEFAULT_LOG_FILTER: &str = "vinsara_storefront=info,vs_cli=info";

#[derive(Parser)]
#[command(name = "vs-cli")]
#[command(author, version, about = "Vinsara CLI tools")]
struct Cli {
    /// Storage directory (defaults to `STOREFRONT_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or edit the stored cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Clear the stored auth token and cart
    Logout,
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines with count and total
    List,
    /// Add a line (merges with an existing line of the same product and size)
    Add {
        /// Product id (slug)
        #[arg(long)]
        id: String,

        /// Product title
        #[arg(long)]
        title: String,

        /// Unit price in rupees
        #[arg(long)]
        price: Decimal,

        /// Selected size
        #[arg(long)]
        size: String,

        /// Stock-keeping unit
        #[arg(long)]
        sku: String,

        /// Quantity to add
        #[arg(long, default_value_t = 1)]
        quantity: u32,

        /// Image URL
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Set a line's quantity (zero or less removes it)
    Update {
        #[arg(long)]
        id: String,

        #[arg(long)]
        size: String,

        #[arg(long, allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        #[arg(long)]
        id: String,

        #[arg(long)]
        size: String,
    },
    /// Remove every line
    Clear,
    /// Remove lines by purchase key (`SKU-SIZE`)
    Purchased {
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No cart line for {id} in size {size}")]
    LineNotFound { id: String, size: String },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        // Config errors happen before the configured subscriber is installed
        init_tracing(DEFAULT_LOG_FILTER, LogFormat::default());
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let storage_dir = match cli.storage_dir {
        Some(dir) => {
            init_tracing(DEFAULT_LOG_FILTER, LogFormat::default());
            dir
        }
        None => {
            let config = StorefrontConfig::from_env()?;
            init_tracing(DEFAULT_LOG_FILTER, config.log_format);
            config.storage_dir
        }
    };

    let storage = FileStorage::new(storage_dir);
    tracing::debug!(dir = %storage.dir().display(), "Using file storage");

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(storage)?,
            CartAction::Add {
                id,
                title,
                price,
                size,
                sku,
                quantity,
                image,
            } => commands::cart::add(
                storage,
                vinsara_storefront::cart::CartItem {
                    id,
                    title,
                    price,
                    image,
                    size,
                    quantity,
                    sku,
                },
            )?,
            CartAction::Update { id, size, quantity } => {
                commands::cart::update(storage, &id, &size, quantity)?;
            }
            CartAction::Remove { id, size } => commands::cart::remove(storage, &id, &size)?,
            CartAction::Clear => commands::cart::clear(storage)?,
            CartAction::Purchased { keys } => commands::cart::purchased(storage, &keys)?,
        },
        Commands::Logout => commands::session::logout(&storage)?,
    }
    Ok(())
}

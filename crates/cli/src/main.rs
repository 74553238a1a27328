//! Cricket Sphere CLI - Wishlist inspection and editing tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the wishlist
//! cs-cli wishlist list
//!
//! # Add an item
//! cs-cli wishlist add --product-id gid://shopify/Product/1 \
//!     --variant-id gid://shopify/ProductVariant/11 --title "Bat" \
//!     --handle bat --amount 12999.00 --currency INR
//!
//! # Remove an item, or everything
//! cs-cli wishlist remove gid://shopify/ProductVariant/11
//! cs-cli wishlist clear
//! ```
//!
//! # Commands
//!
//! - `wishlist list` / `export` / `count` / `contains` - Read the wishlist
//! - `wishlist add` / `remove` / `clear` - Change the wishlist

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;

use commands::wishlist::{self, NewItem};

#[derive(Parser)]
#[command(name = "cs-cli")]
#[command(author, version, about = "Cricket Sphere CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or edit a wishlist on disk
    Wishlist {
        /// Directory holding the wishlist file
        #[arg(
            long,
            env = "CRICKET_SPHERE_DATA_DIR",
            default_value = ".cricket-sphere",
            global = true
        )]
        data_dir: PathBuf,

        #[command(subcommand)]
        action: WishlistAction,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List items in order
    List,
    /// Print the persisted JSON array
    Export,
    /// Print the number of items
    Count,
    /// Check whether a variant is on the wishlist
    Contains {
        /// Variant ID
        variant_id: String,
    },
    /// Add an item (no-op if the variant is already present)
    Add(AddArgs),
    /// Remove an item by variant ID
    Remove {
        /// Variant ID
        variant_id: String,
    },
    /// Remove every item
    Clear,
}

#[derive(Args)]
struct AddArgs {
    /// Product ID
    #[arg(long)]
    product_id: String,

    /// Variant ID
    #[arg(long)]
    variant_id: String,

    /// Display title
    #[arg(long)]
    title: String,

    /// Product URL handle
    #[arg(long)]
    handle: String,

    /// Price amount (decimal)
    #[arg(long)]
    amount: String,

    /// ISO 4217 currency code
    #[arg(long, default_value = "INR")]
    currency: String,

    /// Image URL
    #[arg(long)]
    image_url: Option<String>,

    /// Image alt text
    #[arg(long, requires = "image_url")]
    image_alt: Option<String>,

    /// Mark the item as not available for sale
    #[arg(long)]
    unavailable: bool,

    /// Refuse to grow the wishlist past this many items
    #[arg(long, env = "WISHLIST_MAX_ITEMS")]
    max_items: Option<usize>,
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
fn run(cli: Cli) -> Result<(), wishlist::WishlistCommandError> {
    match cli.command {
        Commands::Wishlist { data_dir, action } => match action {
            WishlistAction::List => println!("{}", wishlist::list(&data_dir)),
            WishlistAction::Export => println!("{}", wishlist::export(&data_dir)?),
            WishlistAction::Count => println!("{}", wishlist::count(&data_dir)),
            WishlistAction::Contains { variant_id } => {
                println!("{}", wishlist::contains(&data_dir, &variant_id)?);
            }
            WishlistAction::Add(args) => {
                let max_items = args.max_items;
                let item = NewItem {
                    product_id: args.product_id,
                    variant_id: args.variant_id,
                    title: args.title,
                    handle: args.handle,
                    amount: args.amount,
                    currency: args.currency,
                    image_url: args.image_url,
                    image_alt: args.image_alt,
                    unavailable: args.unavailable,
                };
                wishlist::add(&data_dir, item, max_items)?;
            }
            WishlistAction::Remove { variant_id } => {
                wishlist::remove(&data_dir, &variant_id)?;
            }
            WishlistAction::Clear => {
                println!("Removed {} items", wishlist::clear(&data_dir)?);
            }
        },
    }
    Ok(())
}

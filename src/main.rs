//! Cart CLI - drive one cart operation against the configured API and storage file.
//!
//! # Usage
//!
//! ```bash
//! cart show
//! cart add 1
//! cart set 1 3
//! cart remove 1
//! ```
//!
//! Configuration comes from the environment (and `.env`), see [`CartConfig`].
//! Notifications are printed to stderr; the exit status is non-zero if any was raised.

use std::process::ExitCode;
use std::sync::Arc;

use cart_manager::config::CartConfig;
use cart_manager::lifecycle::{setup_tracing, CartSystem};
use cart_manager::model::{Cart, ProductId};
use cart_manager::notify::ChannelNotifier;
use clap::{Parser, Subcommand};
use tracing::{info, Instrument};

#[derive(Parser)]
#[command(name = "cart")]
#[command(version, about = "Shopping cart manager")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Catalog product id
        id: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product id
        id: u32,
    },
    /// Set the quantity of a product already in the cart
    Set {
        /// Catalog product id
        id: u32,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let cli = Cli::parse();
    let config = CartConfig::from_env()?;
    info!(api_url = %config.api_url, storage = %config.storage_path.display(), "Starting cart");

    let (notifier, mut notifications) = ChannelNotifier::new();
    let system = CartSystem::from_config(&config, Arc::new(notifier))?;
    let client = system.cart_client.clone();

    let span = tracing::info_span!("cart_command");
    let cart = async {
        let outcome = match cli.command {
            Command::Show => return client.cart().await,
            Command::Add { id } => client.add_product(ProductId(id)).await,
            Command::Remove { id } => client.remove_product(ProductId(id)).await,
            Command::Set { id, amount } => client.update_product_amount(ProductId(id), amount).await,
        };
        // Rejections were already notified; show the cart as it stands.
        match outcome {
            Ok(cart) => Ok(cart),
            Err(_) => client.cart().await,
        }
    }
    .instrument(span)
    .await?;

    drop(client);
    system.shutdown().await?;

    print_cart(&cart);

    let mut failed = false;
    while let Ok(notification) = notifications.try_recv() {
        eprintln!("{notification}");
        failed = true;
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }
    for item in cart {
        println!(
            "{:>5}  {:<30} {:>3} x {:>9.2} = {:>10.2}",
            item.id,
            item.name,
            item.amount,
            item.price,
            item.line_total()
        );
    }
    println!(
        "Items: {}  Subtotal: {:.2}",
        cart.total_amount(),
        cart.subtotal()
    );
}

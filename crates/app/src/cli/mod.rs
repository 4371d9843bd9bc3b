use clap::{Parser, Subcommand};
use vitrine_app::{config::AppConfig, context::AppContext};

mod cart;
mod checkout;
mod orders;
mod output;
mod products;

#[derive(Debug, Parser)]
#[command(name = "vitrine", about = "Vitrine storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Products(products::ProductsCommand),
    Cart(cart::CartCommand),
    Orders(orders::OrdersCommand),
    Checkout(checkout::CheckoutArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::from_config(&self.config.storefront)
            .map_err(|error| format!("failed to initialise storefront: {error}"))?;

        match self.command {
            Commands::Products(command) => products::run(&context, command).await,
            Commands::Cart(command) => cart::run(&context, command).await,
            Commands::Orders(command) => orders::run(&context, command).await,
            Commands::Checkout(args) => checkout::run(&context, args).await,
        }
    }
}

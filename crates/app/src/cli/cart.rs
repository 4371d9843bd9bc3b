use std::io;

use clap::{Args, Subcommand};
use vitrine::{products::ProductId, receipt::Receipt};
use vitrine_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart
    Show,
    /// Add a product to the cart
    Add(AddArgs),
    /// Remove a cart line
    Remove(RemoveArgs),
    /// Set the quantity of a cart line; zero or less removes it
    Update(UpdateArgs),
    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product identifier
    product: String,

    /// Units to add
    #[arg(long, short, default_value_t = 1_i64, allow_negative_numbers = true)]
    quantity: i64,

    /// Size label; defaults to the first listed size for sized products
    #[arg(long, short)]
    size: Option<String>,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Cart line identifier, as shown by `cart show`
    line: String,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Cart line identifier, as shown by `cart show`
    line: String,

    /// New quantity
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) async fn run(context: &AppContext, command: CartCommand) -> Result<(), String> {
    let mut engine = context.cart_engine();

    match command.command {
        CartSubcommand::Show => {}
        CartSubcommand::Add(args) => {
            let product = context
                .products
                .get_by_id(&ProductId::new(args.product.as_str()))
                .await
                .map_err(|error| format!("failed to fetch product: {error}"))?
                .ok_or_else(|| format!("product not found: {}", args.product))?;

            if let Some(size) = args.size.as_deref()
                && !product.sizes().iter().any(|s| s == size)
            {
                return Err(format!("{} does not come in size {size}", product.name));
            }

            engine
                .add_product_checked(&product, args.quantity, args.size.as_deref())
                .map_err(|error| format!("cannot add {}: {error}", product.name))?;
        }
        CartSubcommand::Remove(args) => {
            if engine.cart().line(&args.line.as_str().into()).is_none() {
                return Err(format!("no cart line {}", args.line));
            }

            engine.remove_item(args.line.as_str());
        }
        CartSubcommand::Update(args) => {
            if engine.cart().line(&args.line.as_str().into()).is_none() {
                return Err(format!("no cart line {}", args.line));
            }

            engine.update_quantity(args.line.as_str(), args.quantity);
        }
        CartSubcommand::Clear => {
            engine.clear();
        }
    }

    Receipt::for_cart(engine.cart(), context.currency)
        .write_to(io::stdout().lock())
        .map_err(|error| error.to_string())
}

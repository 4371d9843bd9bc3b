use clap::{Args, Subcommand};
use tracing::debug;
use vitrine::{
    filters::FilterCriteria,
    products::{Category, Metal, ProductId},
    sorting::sort_records,
};
use vitrine_app::{context::AppContext, domain::listing::ListingState};

use crate::cli::output::{parse_amount, print_product, print_products, sort_config};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List catalog products matching the given filters
    List(ListProductsArgs),
    /// Show one product
    Show(ShowProductArgs),
}

#[derive(Debug, Args)]
struct ListProductsArgs {
    /// Only show products priced at or below this amount
    #[arg(long)]
    max_price: Option<String>,

    /// Metal to include; repeat for several
    #[arg(long = "metal")]
    metals: Vec<Metal>,

    /// Category to include; repeat for several
    #[arg(long = "category")]
    categories: Vec<Category>,

    /// Column to sort by (name, price, stock, metal, category)
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,
}

#[derive(Debug, Args)]
struct ShowProductArgs {
    /// Product identifier
    id: String,
}

pub(crate) async fn run(context: &AppContext, command: ProductsCommand) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::List(args) => list(context, args).await,
        ProductsSubcommand::Show(args) => show(context, args).await,
    }
}

async fn list(context: &AppContext, args: ListProductsArgs) -> Result<(), String> {
    let mut criteria = FilterCriteria::new()
        .with_metals(args.metals)
        .with_categories(args.categories);

    criteria.max_price = args
        .max_price
        .as_deref()
        .map(|raw| parse_amount(raw, context.currency))
        .transpose()?;

    let mut listing = context.listing();
    let mut updates = listing.subscribe();

    listing.set_criteria(criteria);

    let products = loop {
        updates
            .changed()
            .await
            .map_err(|error| format!("product listing closed: {error}"))?;

        let snapshot = updates.borrow_and_update().clone();
        debug!(generation = snapshot.generation, "listing update");

        match snapshot.state {
            ListingState::Loading => {}
            ListingState::Ready(products) => break products,
            ListingState::Failed(error) => return Err(format!("failed to list products: {error}")),
        }
    };

    let sort = sort_config(args.sort, args.desc);
    print_products(&sort_records(&products, sort.as_ref()), context.currency);

    Ok(())
}

async fn show(context: &AppContext, args: ShowProductArgs) -> Result<(), String> {
    let product = context
        .products
        .get_by_id(&ProductId::new(args.id.as_str()))
        .await
        .map_err(|error| format!("failed to fetch product: {error}"))?
        .ok_or_else(|| format!("product not found: {}", args.id))?;

    print_product(&product, context.currency);

    Ok(())
}

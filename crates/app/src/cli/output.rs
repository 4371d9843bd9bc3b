use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use vitrine::{
    fixtures::products::parse_price,
    orders::Order,
    prices::Price,
    products::Product,
    sorting::SortConfig,
};

pub(crate) fn print_products(products: &[Product], currency: &'static Currency) {
    if products.is_empty() {
        println!("no products match");
        return;
    }

    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Metal", "Category", "Price", "Stock"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.metal.to_string(),
            product.category.to_string(),
            product.price.to_money(currency).to_string(),
            product.stock.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(4..6), Alignment::right());

    println!("{table}");
}

pub(crate) fn print_product(product: &Product, currency: &'static Currency) {
    println!("id: {}", product.id);
    println!("name: {}", product.name);
    println!("price: {}", product.price.to_money(currency));
    println!("metal: {}", product.metal);
    println!("category: {}", product.category);
    println!("stock: {}", product.stock);

    if !product.sizes().is_empty() {
        println!("sizes: {}", product.sizes().join(", "));
    }

    if let Some(image) = product.primary_image() {
        println!("image: {image}");
    }

    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
}

pub(crate) fn print_orders(orders: &[Order], currency: &'static Currency) {
    if orders.is_empty() {
        println!("no orders found");
        return;
    }

    let mut builder = Builder::default();

    builder.push_record(["ID", "Customer", "Date", "Status", "Items", "Total"]);

    for order in orders {
        builder.push_record([
            order.id.to_string(),
            order.customer_name.clone(),
            order.date.to_string(),
            order.status.to_string(),
            order
                .items
                .iter()
                .map(|line| u64::from(line.quantity))
                .sum::<u64>()
                .to_string(),
            order.total.to_money(currency).to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(4..6), Alignment::right());

    println!("{table}");
}

/// Parse a major-unit amount such as `450` or `175.50` into a price.
pub(crate) fn parse_amount(raw: &str, currency: &'static Currency) -> Result<Price, String> {
    let (minor_units, _) = parse_price(&format!("{raw} {}", currency.iso_alpha_code))
        .map_err(|error| format!("invalid amount {raw:?}: {error}"))?;

    u64::try_from(minor_units)
        .map(Price::new)
        .map_err(|_| format!("amount cannot be negative: {raw}"))
}

pub(crate) fn sort_config(key: Option<String>, descending: bool) -> Option<SortConfig> {
    key.map(|key| {
        if descending {
            SortConfig::descending(key)
        } else {
            SortConfig::ascending(key)
        }
    })
}

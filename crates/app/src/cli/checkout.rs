use clap::Args;
use vitrine_app::{context::AppContext, domain::checkout::Customer};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Customer name for the order
    #[arg(long)]
    customer: String,

    /// Optional contact email
    #[arg(long)]
    email: Option<String>,
}

pub(crate) async fn run(context: &AppContext, args: CheckoutArgs) -> Result<(), String> {
    let mut engine = context.cart_engine();

    let mut customer = Customer::new(args.customer);
    if let Some(email) = args.email {
        customer = customer.with_email(email);
    }

    let order = context
        .checkout()
        .place_order(&mut engine, &customer)
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    println!("order_id: {}", order.id);
    println!("customer: {}", order.customer_name);
    println!("date: {}", order.date);
    println!("status: {}", order.status);
    println!("total: {}", order.total.to_money(context.currency));

    Ok(())
}

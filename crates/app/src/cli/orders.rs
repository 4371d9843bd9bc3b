use clap::{Args, Subcommand};
use vitrine::orders::{OrderId, OrderStatus};
use vitrine_app::context::AppContext;

use crate::cli::output::{print_orders, sort_config};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders
    List(ListOrdersArgs),
    /// Change an order's fulfilment status
    Status(StatusArgs),
}

#[derive(Debug, Args)]
struct ListOrdersArgs {
    /// Column to sort by (id, customerName, date, status, total)
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,
}

#[derive(Debug, Args)]
struct StatusArgs {
    /// Order identifier
    id: String,

    /// New status (pending, shipped, delivered)
    status: OrderStatus,
}

pub(crate) async fn run(context: &AppContext, command: OrdersCommand) -> Result<(), String> {
    let mut dashboard = context.dashboard();

    dashboard
        .load()
        .await
        .map_err(|error| format!("failed to load dashboard: {error}"))?;

    match command.command {
        OrdersSubcommand::List(args) => {
            dashboard.set_order_sort(sort_config(args.sort, args.desc));
            print_orders(&dashboard.orders(), context.currency);
        }
        OrdersSubcommand::Status(args) => {
            let order = dashboard
                .update_order_status(&OrderId::new(args.id.as_str()), args.status)
                .await
                .map_err(|error| format!("failed to update order {}: {error}", args.id))?;

            println!("order_id: {}", order.id);
            println!("status: {}", order.status);
        }
    }

    Ok(())
}

//! CLI binary for browsing the back-office fixtures.
#![allow(
    clippy::exit,
    reason = "CLI binary uses process::exit for fatal errors"
)]

use std::io::{self, Write as _};
use std::process::ExitCode;

use backoffice_rs::backoffice::BackofficeBlocking;
use backoffice_rs::models::{
    CommissionStatus, OrderId, OrderStatus, User, UserId, UserRole, UserStatus,
};
use backoffice_rs::query::{
    CommissionFilter, OrderFilter, OrderSort, OrderSortKey, SortDirection, UserFilter,
};
use backoffice_rs::views::{
    CommissionsView, DetailPhase, OrderDetailView, OrdersListView, UserDetailView,
};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

/// Back-office dashboard CLI — browse users, orders and commissions.
#[derive(Debug, Parser)]
#[command(name = "backoffice", version, about)]
struct Cli {
    /// Override the fixture base URL.
    #[arg(long, global = true, env = "BACKOFFICE_BASE_URL", value_name = "URL")]
    base_url: Option<String>,
    /// Simulated network latency in milliseconds (0 disables it).
    #[arg(long, global = true, value_name = "MS")]
    latency_ms: Option<u64>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Show the dashboard overview figures.
    Dashboard,
    /// List users, optionally filtered by search term, status or role.
    Users(UsersArgs),
    /// List orders, optionally filtered by status and sorted.
    Orders(OrdersArgs),
    /// List commissions with their summary totals.
    Commissions(CommissionsArgs),
    /// Show (and optionally edit) one user.
    User(UserArgs),
    /// Show (and optionally edit) one order.
    Order(OrderArgs),
}

/// Arguments for the `users` subcommand.
#[derive(Debug, Args)]
struct UsersArgs {
    /// Search term matched against name or email (case-insensitive).
    #[arg(long)]
    search: Option<String>,
    /// Filter by status (active | inactive).
    #[arg(long, value_parser = parse_user_status)]
    status: Option<UserStatus>,
    /// Filter by role (admin | seller | customer).
    #[arg(long, value_parser = parse_user_role)]
    role: Option<UserRole>,
}

/// Arguments for the `orders` subcommand.
#[derive(Debug, Args)]
struct OrdersArgs {
    /// Filter by status (pending | processing | completed | cancelled).
    #[arg(long, value_parser = parse_order_status)]
    status: Option<OrderStatus>,
    /// Sort key (date | value). Defaults to date.
    #[arg(long, value_parser = parse_sort_key)]
    sort: Option<OrderSortKey>,
    /// Sort ascending instead of the default descending.
    #[arg(long)]
    ascending: bool,
}

/// Arguments for the `commissions` subcommand.
#[derive(Debug, Args)]
struct CommissionsArgs {
    /// Filter by status (pending | paid).
    #[arg(long, value_parser = parse_commission_status)]
    status: Option<CommissionStatus>,
}

/// Arguments for the `user` subcommand.
#[derive(Debug, Args)]
struct UserArgs {
    /// User identifier.
    id: String,
    /// Set a new display name before showing the record.
    #[arg(long)]
    name: Option<String>,
    /// Set a new email address before showing the record.
    #[arg(long)]
    email: Option<String>,
    /// Flip the activation status before showing the record.
    #[arg(long)]
    toggle_status: bool,
}

/// Arguments for the `order` subcommand.
#[derive(Debug, Args)]
struct OrderArgs {
    /// Order identifier.
    id: String,
    /// Set a new status before showing the record.
    #[arg(long, value_parser = parse_order_status)]
    status: Option<OrderStatus>,
}

/// Parses a user status string for clap.
fn parse_user_status(s: &str) -> Result<UserStatus, String> {
    match s {
        "active" => Ok(UserStatus::Active),
        "inactive" => Ok(UserStatus::Inactive),
        other => Err(format!("unknown status: {other} (expected active | inactive)")),
    }
}

/// Parses a user role string for clap.
fn parse_user_role(s: &str) -> Result<UserRole, String> {
    match s {
        "admin" => Ok(UserRole::Admin),
        "seller" => Ok(UserRole::Seller),
        "customer" => Ok(UserRole::Customer),
        other => Err(format!(
            "unknown role: {other} (expected admin | seller | customer)"
        )),
    }
}

/// Parses an order status string for clap.
fn parse_order_status(s: &str) -> Result<OrderStatus, String> {
    match s {
        "pending" => Ok(OrderStatus::Pending),
        "processing" => Ok(OrderStatus::Processing),
        "completed" => Ok(OrderStatus::Completed),
        "cancelled" => Ok(OrderStatus::Cancelled),
        other => Err(format!(
            "unknown status: {other} (expected pending | processing | completed | cancelled)"
        )),
    }
}

/// Parses a commission status string for clap.
fn parse_commission_status(s: &str) -> Result<CommissionStatus, String> {
    match s {
        "pending" => Ok(CommissionStatus::Pending),
        "paid" => Ok(CommissionStatus::Paid),
        other => Err(format!("unknown status: {other} (expected pending | paid)")),
    }
}

/// Parses a sort key string for clap.
fn parse_sort_key(s: &str) -> Result<OrderSortKey, String> {
    match s {
        "date" => Ok(OrderSortKey::Date),
        "value" => Ok(OrderSortKey::Value),
        other => Err(format!("unknown sort key: {other} (expected date | value)")),
    }
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut builder = BackofficeBlocking::builder();
    if let Some(url) = cli.base_url {
        builder = builder.base_url(url);
    }
    if let Some(ms) = cli.latency_ms {
        builder = builder.latency(Duration::from_millis(ms));
    }
    let facade = match builder.build() {
        Ok(facade) => facade,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to build client: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    dispatch(&facade, cli.command)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch(facade: &BackofficeBlocking, command: Command) -> io::Result<ExitCode> {
    match command {
        Command::Dashboard => cmd_dashboard(facade),
        Command::Users(args) => cmd_users(facade, &args),
        Command::Orders(args) => cmd_orders(facade, &args),
        Command::Commissions(args) => cmd_commissions(facade, &args),
        Command::User(args) => cmd_user(facade, args),
        Command::Order(args) => cmd_order(facade, args),
    }
}

/// Prints a store error inline, the way the views surface it.
fn print_load_error(message: &str) -> io::Result<()> {
    writeln!(
        io::stderr().lock(),
        "{} {message}",
        "error:".red().bold()
    )
}

/// Executes the `dashboard` subcommand.
fn cmd_dashboard(facade: &BackofficeBlocking) -> io::Result<ExitCode> {
    let spinner = make_spinner("Loading fixtures...");
    facade.load_all();
    spinner.finish_and_clear();

    let view = facade.dashboard_view();
    for store_error in [
        facade.users_store().error(),
        facade.orders_store().error(),
        facade.commissions_store().error(),
    ]
    .into_iter()
    .flatten()
    {
        print_load_error(&store_error)?;
    }

    let stats = view.stats();
    let mut out = io::stdout().lock();
    writeln!(out, "{}", "Overview".green().bold())?;
    writeln!(out)?;

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Metric").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    _ = table.add_row(vec![
        Cell::new("Total users"),
        Cell::new(stats.total_users),
    ]);
    _ = table.add_row(vec![
        Cell::new("Active users"),
        Cell::new(stats.active_users),
    ]);
    _ = table.add_row(vec![
        Cell::new("Total orders"),
        Cell::new(stats.total_orders),
    ]);
    _ = table.add_row(vec![
        Cell::new("Orders value"),
        Cell::new(format!("{:.2}", stats.total_orders_value)),
    ]);
    _ = table.add_row(vec![
        Cell::new("Commissions"),
        Cell::new(format!("{:.2}", stats.total_commissions)),
    ]);
    writeln!(out, "{table}")?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `users` subcommand.
fn cmd_users(facade: &BackofficeBlocking, args: &UsersArgs) -> io::Result<ExitCode> {
    let spinner = make_spinner("Loading users...");
    _ = facade.load_users();
    spinner.finish_and_clear();

    let mut view = facade.users_view();
    if let Some(message) = view.error() {
        print_load_error(&message)?;
        return Ok(ExitCode::FAILURE);
    }
    let mut filter = UserFilter::new();
    if let Some(term) = args.search.as_deref() {
        filter = filter.search(term);
    }
    if let Some(status) = args.status {
        filter = filter.status(status);
    }
    if let Some(role) = args.role {
        filter = filter.role(role);
    }
    view.set_filter(filter);

    print_users_table(&view.visible(), view.is_empty())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `orders` subcommand.
fn cmd_orders(facade: &BackofficeBlocking, args: &OrdersArgs) -> io::Result<ExitCode> {
    let spinner = make_spinner("Loading orders...");
    _ = facade.load_orders();
    _ = facade.load_users();
    spinner.finish_and_clear();

    let mut view = facade.orders_view();
    if let Some(message) = view.error() {
        print_load_error(&message)?;
        return Ok(ExitCode::FAILURE);
    }
    let mut filter = OrderFilter::new();
    if let Some(status) = args.status {
        filter = filter.status(status);
    }
    view.set_filter(filter);
    view.set_sort(OrderSort {
        key: args.sort.unwrap_or(OrderSortKey::Date),
        direction: if args.ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        },
    });

    print_orders_table(&view)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `commissions` subcommand.
fn cmd_commissions(facade: &BackofficeBlocking, args: &CommissionsArgs) -> io::Result<ExitCode> {
    let spinner = make_spinner("Loading commissions...");
    _ = facade.load_commissions();
    _ = facade.load_users();
    spinner.finish_and_clear();

    let mut view = facade.commissions_view();
    if let Some(message) = view.error() {
        print_load_error(&message)?;
        return Ok(ExitCode::FAILURE);
    }
    let mut filter = CommissionFilter::new();
    if let Some(status) = args.status {
        filter = filter.status(status);
    }
    view.set_filter(filter);

    print_commission_summary(&view)?;
    print_commissions_table(&view)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `user` subcommand: show one record, optionally editing
/// it in memory first.
fn cmd_user(facade: &BackofficeBlocking, args: UserArgs) -> io::Result<ExitCode> {
    let spinner = make_spinner("Loading users...");
    _ = facade.load_users();
    spinner.finish_and_clear();

    let id = UserId::new(args.id);
    let mut view = facade.user_detail_view(&id);
    if view.phase() == DetailPhase::NotFound {
        writeln!(
            io::stderr().lock(),
            "{} user not found: {id}",
            "error:".red().bold()
        )?;
        return Ok(ExitCode::FAILURE);
    }

    let mut edited = false;
    if let Some(name) = args.name {
        edited |= view.set_name(name);
    }
    if let Some(email) = args.email {
        edited |= view.set_email(email);
    }
    if args.toggle_status {
        edited |= view.toggle_status();
    }
    if edited {
        let now = Utc::now();
        _ = view.save(now);
        if view.success_visible(now) {
            writeln!(
                io::stdout().lock(),
                "{}",
                "Changes saved (in memory only).".green().bold()
            )?;
        }
    }

    print_user_detail(&view)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `order` subcommand: show one record, optionally
/// editing its status in memory first.
fn cmd_order(facade: &BackofficeBlocking, args: OrderArgs) -> io::Result<ExitCode> {
    let spinner = make_spinner("Loading orders...");
    _ = facade.load_orders();
    _ = facade.load_users();
    spinner.finish_and_clear();

    let id = OrderId::new(args.id);
    let mut view = facade.order_detail_view(&id);
    if view.phase() == DetailPhase::NotFound {
        writeln!(
            io::stderr().lock(),
            "{} order not found: {id}",
            "error:".red().bold()
        )?;
        return Ok(ExitCode::FAILURE);
    }

    if let Some(status) = args.status {
        _ = view.set_status(status);
        let now = Utc::now();
        _ = view.save(now);
        if view.success_visible(now) {
            writeln!(
                io::stdout().lock(),
                "{}",
                "Changes saved (in memory only).".green().bold()
            )?;
        }
    }

    print_order_detail(&view)?;
    Ok(ExitCode::SUCCESS)
}

// ── Output formatting ────────────────────────────────────────────────

/// Colours a user status cell.
fn user_status_cell(status: UserStatus) -> Cell {
    match status {
        UserStatus::Active => Cell::new("active").fg(Color::Green),
        UserStatus::Inactive => Cell::new("inactive").fg(Color::DarkGrey),
    }
}

/// Colours an order status cell.
fn order_status_cell(status: OrderStatus) -> Cell {
    match status {
        OrderStatus::Pending => Cell::new("pending").fg(Color::Yellow),
        OrderStatus::Processing => Cell::new("processing").fg(Color::Cyan),
        OrderStatus::Completed => Cell::new("completed").fg(Color::Green),
        OrderStatus::Cancelled => Cell::new("cancelled").fg(Color::Red),
    }
}

/// Colours a commission status cell.
fn commission_status_cell(status: CommissionStatus) -> Cell {
    match status {
        CommissionStatus::Pending => Cell::new("pending").fg(Color::Yellow),
        CommissionStatus::Paid => Cell::new("paid").fg(Color::Green),
    }
}

/// Prints the filtered users in a table.
fn print_users_table(users: &[User], collection_empty: bool) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if users.is_empty() {
        if collection_empty {
            writeln!(out, "{}", "No users found.".dimmed())?;
        } else {
            writeln!(out, "{}", "No results match the active filters.".dimmed())?;
        }
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Email").fg(Color::Cyan),
        Cell::new("Role").fg(Color::Cyan),
        Cell::new("Country").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
    ]);

    for user in users {
        let role = match user.role {
            UserRole::Admin => "admin",
            UserRole::Seller => "seller",
            UserRole::Customer => "customer",
        };
        _ = table.add_row(vec![
            Cell::new(&user.name),
            Cell::new(&user.email),
            Cell::new(role),
            Cell::new(&user.country),
            user_status_cell(user.status),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Users".green().bold(),
        format_args!("({})", users.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints the filtered, sorted orders in a table.
fn print_orders_table(view: &OrdersListView) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let orders = view.visible();
    if orders.is_empty() {
        if view.is_empty() {
            writeln!(out, "{}", "No orders found.".dimmed())?;
        } else {
            writeln!(out, "{}", "No results match the active filters.".dimmed())?;
        }
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Order").fg(Color::Cyan),
        Cell::new("User").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);

    for order in &orders {
        _ = table.add_row(vec![
            Cell::new(order.id().as_inner()),
            Cell::new(view.user_name(order.user_id())),
            order_status_cell(order.status()),
            Cell::new(order.created_at().format("%Y-%m-%d").to_string()),
            Cell::new(format!("{:.2}", order.total())),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Orders".green().bold(),
        format_args!("({})", orders.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints the commission summary cards.
fn print_commission_summary(view: &CommissionsView) -> io::Result<()> {
    let summary = view.summary();
    let mut out = io::stdout().lock();
    writeln!(out, "{}", "Commissions".green().bold())?;
    writeln!(out)?;
    writeln!(
        out,
        "  {} {:.2}",
        "Total:".bold(),
        summary.total_all
    )?;
    writeln!(
        out,
        "  {} {}",
        "Pending:".bold(),
        format_args!("{:.2}", summary.total_pending).yellow()
    )?;
    writeln!(
        out,
        "  {} {}",
        "Paid:".bold(),
        format_args!("{:.2}", summary.total_paid).green()
    )?;
    writeln!(out)?;
    Ok(())
}

/// Prints the filtered commissions in a table.
fn print_commissions_table(view: &CommissionsView) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let commissions = view.visible();
    if commissions.is_empty() {
        if view.is_empty() {
            writeln!(out, "{}", "No commissions found.".dimmed())?;
        } else {
            writeln!(out, "{}", "No results match the active filters.".dimmed())?;
        }
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("User").fg(Color::Cyan),
        Cell::new("Order").fg(Color::Cyan),
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);

    for commission in &commissions {
        _ = table.add_row(vec![
            Cell::new(view.user_name(&commission.user_id)),
            Cell::new(view.order_reference(commission).as_inner()),
            Cell::new(commission.created_at.format("%Y-%m-%d").to_string()),
            commission_status_cell(commission.status),
            Cell::new(format!("{:.2}", commission.amount)),
        ]);
    }

    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints one user record.
fn print_user_detail(view: &UserDetailView) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let Some(user) = view.buffer() else {
        return Ok(());
    };
    let role = match user.role {
        UserRole::Admin => "admin",
        UserRole::Seller => "seller",
        UserRole::Customer => "customer",
    };
    let status = match user.status {
        UserStatus::Active => "active",
        UserStatus::Inactive => "inactive",
    };
    writeln!(out, "{}", "User".green().bold())?;
    writeln!(out)?;
    writeln!(out, "  {} {}", "ID:".bold(), user.id)?;
    writeln!(out, "  {} {}", "Name:".bold(), user.name)?;
    writeln!(out, "  {} {}", "Email:".bold(), user.email)?;
    writeln!(out, "  {} {role}", "Role:".bold())?;
    writeln!(out, "  {} {}", "Country:".bold(), user.country)?;
    writeln!(out, "  {} {status}", "Status:".bold())?;
    writeln!(
        out,
        "  {} {}",
        "Created:".bold(),
        user.created_at.format("%Y-%m-%d")
    )?;
    Ok(())
}

/// Prints one order record with its items and related user.
fn print_order_detail(view: &OrderDetailView) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let Some(order) = view.buffer() else {
        return Ok(());
    };

    writeln!(
        out,
        "{} {}",
        "Order".green().bold(),
        order.id().as_inner().dimmed()
    )?;
    writeln!(out)?;

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Product").fg(Color::Cyan),
        Cell::new("Quantity").fg(Color::Cyan),
        Cell::new("Unit price").fg(Color::Cyan),
        Cell::new("Total").fg(Color::Cyan),
    ]);
    for item in order.items() {
        _ = table.add_row(vec![
            Cell::new(&item.product_name),
            Cell::new(item.quantity),
            Cell::new(format!("{:.2}", item.unit_price)),
            Cell::new(format!("{:.2}", item.line_total())),
        ]);
    }
    _ = table.add_row(vec![
        Cell::new("Order total").fg(Color::Green),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format!("{:.2}", order.total())).fg(Color::Green),
    ]);
    writeln!(out, "{table}")?;

    let status = match order.status() {
        OrderStatus::Pending => "pending",
        OrderStatus::Processing => "processing",
        OrderStatus::Completed => "completed",
        OrderStatus::Cancelled => "cancelled",
    };
    writeln!(out, "  {} {status}", "Status:".bold())?;
    writeln!(
        out,
        "  {} {}",
        "Created:".bold(),
        order.created_at().format("%Y-%m-%d %H:%M")
    )?;
    match view.related_user() {
        Some(user) => {
            writeln!(out, "  {} {} <{}>", "User:".bold(), user.name, user.email)?;
        }
        None => writeln!(out, "  {} {}", "User:".bold(), "unknown".dimmed())?,
    }
    Ok(())
}

/// Creates a spinner with the given message.
fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // Last-resort error output — if stderr itself failed, nothing
            // we can do.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}

//! Pantry back-office CLI

use std::{process, sync::Arc};

use clap::{Args, Parser, Subcommand};
use pantry::status::OrderStatus;
use pantry_app::{
    database::{self, Db},
    domain::{
        customers::CustomerUuid,
        notifications::TracingNotifier,
        orders::{OrderUuid, OrdersService, OrdersSettings, PgOrdersService},
        products::{NewProduct, PgProductsService, ProductUuid, ProductsService},
    },
};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "pantry-app", about = "Pantry back-office CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Product(ProductCommand),
    Order(OrderCommand),
}

#[derive(Debug, Args)]
struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(CreateProductArgs),
    List(DatabaseArgs),
}

#[derive(Debug, Args)]
struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct CreateProductArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Product display name
    #[arg(long)]
    name: String,

    /// Price in minor units
    #[arg(long)]
    price: u64,

    /// Sales unit
    #[arg(long, default_value = "each")]
    unit: String,

    /// Catalog category
    #[arg(long, default_value = "uncategorised")]
    category: String,

    /// Initial stock level
    #[arg(long, default_value_t = 0)]
    stock: u64,

    /// Optional product UUID; generated when omitted
    #[arg(long)]
    product_uuid: Option<Uuid>,
}

#[derive(Debug, Args)]
struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    List(ListOrdersArgs),
    Show(ShowOrderArgs),
    SetStatus(SetStatusArgs),
}

#[derive(Debug, Args)]
struct ListOrdersArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Customer UUID
    #[arg(long)]
    customer: Uuid,
}

#[derive(Debug, Args)]
struct ShowOrderArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Order UUID
    #[arg(long)]
    order: Uuid,
}

#[derive(Debug, Args)]
struct SetStatusArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Order UUID
    #[arg(long)]
    order: Uuid,

    /// Target status, e.g. `confirmed` or `out_for_delivery`
    #[arg(long)]
    status: OrderStatus,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Product(ProductCommand { command }) => match command {
            ProductSubcommand::Create(args) => create_product(args).await,
            ProductSubcommand::List(args) => list_products(args).await,
        },
        Commands::Order(OrderCommand { command }) => match command {
            OrderSubcommand::List(args) => list_orders(args).await,
            OrderSubcommand::Show(args) => show_order(args).await,
            OrderSubcommand::SetStatus(args) => set_status(args).await,
        },
    }
}

async fn connect(database_url: &str) -> Result<Db, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(Db::new(pool))
}

async fn create_product(args: CreateProductArgs) -> Result<(), String> {
    let db = connect(&args.database.database_url).await?;
    let service = PgProductsService::new(db);

    let uuid = args
        .product_uuid
        .map_or_else(ProductUuid::new, ProductUuid::from_uuid);

    let product = service
        .create_product(NewProduct {
            uuid,
            name: args.name,
            price: args.price,
            unit: args.unit,
            category: args.category,
            stock_quantity: args.stock,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("name: {}", product.name);
    println!("price: {}", product.price);

    Ok(())
}

async fn list_products(args: DatabaseArgs) -> Result<(), String> {
    let db = connect(&args.database_url).await?;
    let service = PgProductsService::new(db);

    let products = service
        .list_products()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    for product in products {
        println!(
            "{}  {}  {} / {}  ({})",
            product.uuid, product.name, product.price, product.unit, product.category
        );
    }

    Ok(())
}

fn orders_service(db: Db) -> PgOrdersService {
    PgOrdersService::new(db, Arc::new(TracingNotifier), OrdersSettings::default())
}

async fn list_orders(args: ListOrdersArgs) -> Result<(), String> {
    let db = connect(&args.database.database_url).await?;
    let service = orders_service(db);

    let orders = service
        .list_orders(CustomerUuid::from_uuid(args.customer))
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    for order in orders {
        println!(
            "{}  {}  {}  total {}",
            order.uuid, order.order_number, order.status, order.total_amount
        );
    }

    Ok(())
}

async fn show_order(args: ShowOrderArgs) -> Result<(), String> {
    let db = connect(&args.database.database_url).await?;
    let service = orders_service(db);

    let order = service
        .get_order(OrderUuid::from_uuid(args.order))
        .await
        .map_err(|error| format!("failed to load order: {error}"))?;

    println!("order_number: {}", order.order_number);
    println!("status: {}", order.status);
    println!("delivery_address: {}", order.delivery_address);
    println!("delivery_fee: {}", order.delivery_fee);
    println!("total_amount: {}", order.total_amount);

    for line in &order.lines {
        println!(
            "  {} x{} @ {} = {}",
            line.product_uuid, line.quantity, line.unit_price, line.total_price
        );
    }

    Ok(())
}

async fn set_status(args: SetStatusArgs) -> Result<(), String> {
    let db = connect(&args.database.database_url).await?;
    let service = orders_service(db);

    let order = service
        .set_status(OrderUuid::from_uuid(args.order), args.status)
        .await
        .map_err(|error| format!("failed to update status: {error}"))?;

    println!("order_number: {}", order.order_number);
    println!("status: {}", order.status);

    Ok(())
}

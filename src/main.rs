use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use sqlx::migrate::Migrator;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkout_core::adapters::{
    PostgresCustomerRepository, PostgresDeliveryRepository, PostgresProductRepository,
    PostgresTransactionRepository,
};
use checkout_core::cli::{Cli, Commands, DbCommands};
use checkout_core::config::Config;
use checkout_core::wompi::WompiClient;
use checkout_core::{AppState, create_app, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Db(DbCommands::Migrate) => {
            let pool = db::create_pool(&config).await?;
            run_migrations(&pool).await
        }
        Commands::Seed => {
            let pool = db::create_pool(&config).await?;
            run_migrations(&pool).await?;
            db::seed::seed_products(&pool).await
        }
    }
}

async fn run_migrations(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let migrator = Migrator::new(Path::new("./migrations")).await?;
    migrator.run(pool).await?;
    tracing::info!("database migrations completed");
    Ok(())
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let pool = db::create_pool(&config).await?;
    run_migrations(&pool).await?;

    let gateway = WompiClient::new(config.wompi.clone());
    tracing::info!(api_url = %config.wompi.api_url, "Wompi client initialized");

    let state = AppState {
        db: pool.clone(),
        customers: Arc::new(PostgresCustomerRepository::new(pool.clone())),
        products: Arc::new(PostgresProductRepository::new(pool.clone())),
        transactions: Arc::new(PostgresTransactionRepository::new(pool.clone())),
        deliveries: Arc::new(PostgresDeliveryRepository::new(pool)),
        gateway: Arc::new(gateway),
        gateway_customer: config.payment_customer.clone(),
    };

    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

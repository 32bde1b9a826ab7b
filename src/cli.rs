use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "checkout-core")]
#[command(about = "Checkout Core - store checkout and payment API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Database management commands
    #[command(subcommand)]
    Db(DbCommands),

    /// Seed the product catalog with demo data
    Seed,
}

#[derive(Subcommand)]
pub enum DbCommands {
    /// Run database migrations
    Migrate,
}

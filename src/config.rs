use dotenvy::dotenv;
use std::env;

use crate::ports::GatewayCustomer;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub wompi: WompiConfig,
    pub payment_customer: GatewayCustomer,
}

/// Wompi API credentials. The integrity key signs outgoing transactions,
/// the events key verifies incoming webhook checksums.
#[derive(Debug, Clone)]
pub struct WompiConfig {
    pub api_url: String,
    pub public_key: String,
    pub private_key: String,
    pub integrity_key: String,
    pub events_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL")?,
            wompi: WompiConfig {
                api_url: env::var("WOMPI_API_URL")
                    .unwrap_or_else(|_| "https://api-sandbox.co.uat.wompi.dev/v1".to_string()),
                public_key: env::var("WOMPI_PUBLIC_KEY")?,
                private_key: env::var("WOMPI_PRIVATE_KEY")?,
                integrity_key: env::var("WOMPI_INTEGRITY_KEY")?,
                events_key: env::var("WOMPI_EVENTS_KEY")?,
            },
            // Sent to the gateway as customer_data on every charge. Required
            // here so the service refuses to start without it instead of
            // falling back to a hardcoded default.
            payment_customer: GatewayCustomer {
                full_name: env::var("PAYMENT_CUSTOMER_NAME")?,
                phone_number: env::var("PAYMENT_CUSTOMER_PHONE")?,
            },
        })
    }
}

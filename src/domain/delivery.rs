use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Pending,
    InTransit,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "PENDING",
            DeliveryStatus::InTransit => "IN_TRANSIT",
            DeliveryStatus::Delivered => "DELIVERED",
            DeliveryStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(DeliveryStatus::Pending),
            "IN_TRANSIT" => Ok(DeliveryStatus::InTransit),
            "DELIVERED" => Ok(DeliveryStatus::Delivered),
            "CANCELLED" => Ok(DeliveryStatus::Cancelled),
            other => Err(format!("unknown delivery status: {}", other)),
        }
    }
}

/// Shipping record created alongside each transaction (1:1).
#[derive(Debug, Clone)]
pub struct Delivery {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub address: String,
    pub city: String,
    pub department: Option<String>,
    pub postal_code: Option<String>,
    pub delivery_status: DeliveryStatus,
    pub delivery_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    pub fn new(
        transaction_id: Uuid,
        address: String,
        city: String,
        department: Option<String>,
        postal_code: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            transaction_id,
            address,
            city,
            department,
            postal_code,
            delivery_status: DeliveryStatus::Pending,
            delivery_notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}

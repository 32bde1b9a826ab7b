//! Wire types for the Wompi REST API.

use serde::{Deserialize, Serialize};

use crate::domain::TransactionStatus;

#[derive(Debug, Serialize)]
pub struct TransactionRequestBody {
    pub amount_in_cents: i64,
    pub currency: String,
    pub customer_email: String,
    pub payment_method: PaymentMethodBody,
    pub reference: String,
    pub acceptance_token: String,
    pub customer_data: CustomerDataBody,
    pub signature: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentMethodBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub token: String,
    pub installments: u32,
}

#[derive(Debug, Serialize)]
pub struct CustomerDataBody {
    pub phone_number: String,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct TokenizeRequestBody {
    pub number: String,
    pub cvc: String,
    pub exp_month: String,
    pub exp_year: String,
    pub card_holder: String,
}

#[derive(Debug, Deserialize)]
pub struct TransactionEnvelope {
    pub data: TransactionData,
}

/// Transaction payload as returned by both POST and GET /transactions.
/// The POST response nests the payment method, the GET response flattens
/// it into `payment_method_type`; both are optional here.
#[derive(Debug, Deserialize)]
pub struct TransactionData {
    pub id: String,
    pub created_at: String,
    pub amount_in_cents: i64,
    pub reference: String,
    pub currency: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub payment_method_type: Option<String>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethodInfo>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentMethodInfo {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenEnvelope {
    pub data: TokenData,
}

#[derive(Debug, Deserialize)]
pub struct TokenData {
    pub id: String,
    pub brand: String,
    pub last_four: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Field name to message(s), e.g. {"reference": ["has already been used"]}.
    #[serde(default)]
    pub messages: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct EventPayload {
    pub event: String,
    pub data: EventData,
}

#[derive(Debug, Deserialize)]
pub struct EventData {
    pub transaction: EventTransaction,
}

#[derive(Debug, Deserialize)]
pub struct EventTransaction {
    pub id: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub reference: Option<String>,
}

//! HTTP client for the Wompi payment gateway.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::config::WompiConfig;
use crate::ports::{
    CardData, CardToken, GatewayError, GatewayTransaction, PaymentGateway, PaymentRequest,
};
use crate::wompi::types::{
    ApiErrorBody, CustomerDataBody, ErrorEnvelope, PaymentMethodBody, TokenEnvelope,
    TransactionData, TransactionEnvelope, TransactionRequestBody, TokenizeRequestBody,
};

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct WompiClient {
    client: Client,
    config: WompiConfig,
}

impl WompiClient {
    pub fn new(config: WompiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        WompiClient { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Wompi signature recipe: sha256(reference + amount_in_cents + currency
    /// + integrity_secret), hex encoded.
    fn integrity_signature(&self, reference: &str, amount_in_cents: i64, currency: &str) -> String {
        let payload = format!(
            "{}{}{}{}",
            reference, amount_in_cents, currency, self.config.integrity_key
        );
        hex::encode(Sha256::digest(payload.as_bytes()))
    }

    async fn decode_api_error(response: reqwest::Response) -> GatewayError {
        let status = response.status();
        match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => {
                let ApiErrorBody {
                    kind,
                    reason,
                    messages,
                } = envelope.error;
                GatewayError::Api {
                    kind,
                    message: flatten_error_messages(reason, messages),
                }
            }
            Err(_) => GatewayError::InvalidResponse(format!(
                "unexpected response status {}",
                status
            )),
        }
    }

    fn into_gateway_transaction(data: TransactionData) -> GatewayTransaction {
        let payment_method_type = data
            .payment_method
            .map(|pm| pm.kind)
            .or(data.payment_method_type);

        GatewayTransaction {
            id: data.id,
            status: data.status,
            reference: data.reference,
            amount_in_cents: data.amount_in_cents,
            currency: data.currency,
            payment_method_type,
            created_at: data.created_at,
        }
    }
}

/// Joins the gateway's per-field validation messages into one line, falling
/// back to the top-level reason.
fn flatten_error_messages(
    reason: Option<String>,
    messages: Option<serde_json::Value>,
) -> String {
    let mut message = reason.unwrap_or_default();

    if let Some(map) = messages.as_ref().and_then(|v| v.as_object()) {
        let all: Vec<String> = map
            .iter()
            .map(|(field, msgs)| match msgs {
                serde_json::Value::Array(items) => {
                    let joined = items
                        .iter()
                        .filter_map(|m| m.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{}: {}", field, joined)
                }
                other => format!("{}: {}", field, other.as_str().unwrap_or_default()),
            })
            .collect();
        if !all.is_empty() {
            message = all.join("; ");
        }
    }

    if message.is_empty() {
        message = "unknown error".to_string();
    }

    message
}

#[async_trait]
impl PaymentGateway for WompiClient {
    async fn create_transaction(
        &self,
        request: &PaymentRequest,
    ) -> Result<GatewayTransaction, GatewayError> {
        let signature = self.integrity_signature(
            &request.reference,
            request.amount_in_cents,
            &request.currency,
        );

        let body = TransactionRequestBody {
            amount_in_cents: request.amount_in_cents,
            currency: request.currency.clone(),
            customer_email: request.customer_email.clone(),
            payment_method: PaymentMethodBody {
                kind: "CARD".to_string(),
                token: request.card_token.clone(),
                installments: request.installments,
            },
            reference: request.reference.clone(),
            acceptance_token: request.acceptance_token.clone(),
            customer_data: CustomerDataBody {
                phone_number: request.customer.phone_number.clone(),
                full_name: request.customer.full_name.clone(),
            },
            signature,
        };

        tracing::info!(reference = %request.reference, "creating Wompi transaction");

        let response = self
            .client
            .post(self.url("/transactions"))
            .bearer_auth(&self.config.private_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::decode_api_error(response).await);
        }

        let envelope = response.json::<TransactionEnvelope>().await?;
        tracing::info!(
            gateway_id = %envelope.data.id,
            status = %envelope.data.status,
            "Wompi transaction created"
        );

        Ok(Self::into_gateway_transaction(envelope.data))
    }

    async fn get_transaction(
        &self,
        gateway_id: &str,
    ) -> Result<GatewayTransaction, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!("/transactions/{}", gateway_id)))
            .bearer_auth(&self.config.private_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::decode_api_error(response).await);
        }

        let envelope = response.json::<TransactionEnvelope>().await?;
        Ok(Self::into_gateway_transaction(envelope.data))
    }

    async fn tokenize_card(&self, card: &CardData) -> Result<CardToken, GatewayError> {
        let body = TokenizeRequestBody {
            number: card.number.split_whitespace().collect(),
            cvc: card.cvc.clone(),
            exp_month: card.exp_month.clone(),
            exp_year: card.exp_year.clone(),
            card_holder: card.card_holder.clone(),
        };

        // Tokenization authenticates with the public key, not the private one.
        let response = self
            .client
            .post(self.url("/tokens/cards"))
            .bearer_auth(&self.config.public_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::decode_api_error(response).await);
        }

        let envelope = response.json::<TokenEnvelope>().await?;
        Ok(CardToken {
            id: envelope.data.id,
            brand: envelope.data.brand,
            last_four: envelope.data.last_four,
        })
    }

    fn verify_event_signature(&self, payload: &[u8], signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(self.config.events_key.as_bytes()) else {
            return false;
        };
        mac.update(payload);
        mac.verify_slice(&expected).is_ok()
    }
}

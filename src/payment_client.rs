use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::Utc;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;
use uuid::Uuid;

use crate::configuration::PaymentGatewayConfig;
use crate::routes::payment::schemas::PaymentStatus;
use crate::schemas::{impl_serialize_format, CurrencyType};
use crate::utils::fmt_json;

/// Client for the payment gateway's order API. Credentials come from
/// configuration; every call carries the configured timeout.
#[derive(Debug)]
pub struct PaymentClient {
    http_client: Client,
    base_url: String,
    key_id: String,
    key_secret: SecretString,
}

/// Gateway orders are denominated in minor currency units (paise):
/// `round(amount * 100)`, exactly.
pub fn to_minor_units(amount: &BigDecimal) -> Result<i64, anyhow::Error> {
    let minor = (amount * BigDecimal::from(100)).round(0);
    minor
        .to_i64()
        .ok_or_else(|| anyhow::anyhow!("Amount {} overflows minor units", amount))
}

/// Receipt label for a checkout attempt, embedding the campaign reference
/// (when present) and a unix timestamp. The gateway caps receipts at 40
/// characters, so only a uuid prefix is used.
pub fn generate_receipt(campaign_id: Option<&Uuid>) -> String {
    let ts = Utc::now().timestamp();
    match campaign_id {
        Some(id) => {
            let id = id.simple().to_string();
            format!("camp_{}_{}", &id[..8], ts)
        }
        None => format!("donation_{}", ts),
    }
}

#[derive(Debug, Serialize)]
pub struct GatewayOrderRequest {
    pub amount: i64,
    pub currency: CurrencyType,
    pub receipt: String,
    pub payment_capture: u8,
}

impl_serialize_format!(GatewayOrderRequest, Display);

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum GatewayOrderStatus {
    Created,
    Attempted,
    Paid,
}

#[derive(Debug, Deserialize)]
pub struct GatewayOrderData {
    pub id: String,
    pub entity: String,
    pub amount: i64,
    pub amount_paid: i64,
    pub amount_due: i64,
    pub currency: CurrencyType,
    pub receipt: String,
    pub status: GatewayOrderStatus,
    pub created_at: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum GatewayPaymentStatus {
    Created,
    Authorized,
    Captured,
    Refunded,
    Failed,
}

#[derive(Debug, Deserialize)]
pub struct GatewayPaymentData {
    pub id: String,
    pub entity: String,
    pub amount: i64,
    pub currency: CurrencyType,
    pub status: GatewayPaymentStatus,
    pub order_id: String,
    pub method: Option<String>,
    pub captured: bool,
    pub created_at: i64,
}

impl GatewayPaymentData {
    pub fn payment_status(&self) -> PaymentStatus {
        match self.status {
            GatewayPaymentStatus::Created => PaymentStatus::NotPaid,
            GatewayPaymentStatus::Authorized => PaymentStatus::Paid,
            GatewayPaymentStatus::Captured => PaymentStatus::Paid,
            GatewayPaymentStatus::Refunded => PaymentStatus::Refunded,
            GatewayPaymentStatus::Failed => PaymentStatus::NotPaid,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GatewayPaymentCollection {
    #[allow(dead_code)]
    pub count: u32,
    pub items: Vec<GatewayPaymentData>,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorResponse {
    pub error: GatewayErrorBody,
}

impl PaymentClient {
    #[tracing::instrument(skip(config))]
    pub fn new(config: &PaymentGatewayConfig) -> Result<Self, anyhow::Error> {
        tracing::info!("Initializing payment gateway client.");
        let http_client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
        })
    }

    /// Asks the gateway to create a payable order with immediate capture.
    /// The only side effect is the outbound gateway call; nothing is
    /// persisted here.
    #[tracing::instrument(name = "create gateway order", skip(self))]
    pub async fn create_order(
        &self,
        amount: &BigDecimal,
        receipt: &str,
    ) -> Result<GatewayOrderData, anyhow::Error> {
        let request_body = GatewayOrderRequest {
            amount: to_minor_units(amount)?,
            currency: CurrencyType::Inr,
            receipt: receipt.to_string(),
            payment_capture: 1,
        };
        let url = format!("{}/orders", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|err| anyhow::anyhow!("Failed to parse gateway order: {}", err))
        } else {
            let error_body: GatewayErrorResponse = response
                .json()
                .await
                .map_err(|err| anyhow::anyhow!("Gateway returned {}: {}", status, err))?;
            Err(anyhow::anyhow!(error_body.error.description))
        }
    }

    #[tracing::instrument(name = "fetch gateway payments", skip(self))]
    pub async fn fetch_payments_for_order(
        &self,
        gateway_order_id: &str,
    ) -> Result<Vec<GatewayPaymentData>, anyhow::Error> {
        let url = format!("{}/orders/{}/payments", self.base_url, gateway_order_id);
        let response = self
            .http_client
            .get(&url)
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let collection: GatewayPaymentCollection = response
                .json()
                .await
                .map_err(|err| anyhow::anyhow!("Failed to parse gateway payments: {}", err))?;
            Ok(collection.items)
        } else {
            let error_body: GatewayErrorResponse = response
                .json()
                .await
                .map_err(|err| anyhow::anyhow!("Gateway returned {}: {}", status, err))?;
            Err(anyhow::anyhow!(error_body.error.description))
        }
    }

    /// One captured or authorized payment makes the order paid; a refund
    /// without any capture reads as refunded; otherwise not paid.
    pub fn determine_final_payment_status(
        &self,
        payments: &[GatewayPaymentData],
    ) -> PaymentStatus {
        if payments
            .iter()
            .any(|p| p.payment_status() == PaymentStatus::Paid)
        {
            PaymentStatus::Paid
        } else if payments
            .iter()
            .any(|p| p.payment_status() == PaymentStatus::Refunded)
        {
            PaymentStatus::Refunded
        } else {
            PaymentStatus::NotPaid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use std::str::FromStr;

    #[test]
    fn five_hundred_rupees_is_fifty_thousand_paise() {
        let amount = BigDecimal::from_str("500").unwrap();
        assert_eq!(to_minor_units(&amount).unwrap(), 50000);
        let request = GatewayOrderRequest {
            amount: to_minor_units(&amount).unwrap(),
            currency: CurrencyType::Inr,
            receipt: "camp_0a1b2c3d_1723291200".to_string(),
            payment_capture: 1,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["amount"], 50000);
        assert_eq!(body["currency"], "INR");
        assert_eq!(body["payment_capture"], 1);
    }

    #[quickcheck]
    fn minor_unit_conversion_is_exact_for_paise_amounts(rupees: u32, paise: u8) -> bool {
        let paise = u64::from(paise % 100);
        let amount = BigDecimal::from_str(&format!("{}.{:02}", rupees, paise)).unwrap();
        to_minor_units(&amount).unwrap() == (u64::from(rupees) * 100 + paise) as i64
    }

    #[test]
    fn fractional_paise_rounds() {
        let amount = BigDecimal::from_str("10.999").unwrap();
        assert_eq!(to_minor_units(&amount).unwrap(), 1100);
    }

    #[test]
    fn receipt_embeds_campaign_prefix_and_timestamp() {
        let campaign_id = Uuid::new_v4();
        let receipt = generate_receipt(Some(&campaign_id));
        let prefix = &campaign_id.simple().to_string()[..8];
        assert!(receipt.starts_with(&format!("camp_{}_", prefix)));
        assert!(receipt.len() <= 40);
        let ts: i64 = receipt.rsplit('_').next().unwrap().parse().unwrap();
        assert!(ts > 0);
    }

    #[test]
    fn receipt_without_campaign_still_carries_timestamp() {
        let receipt = generate_receipt(None);
        assert!(receipt.starts_with("donation_"));
        assert!(receipt.len() <= 40);
    }

    fn dummy_payment(status: GatewayPaymentStatus, captured: bool) -> GatewayPaymentData {
        GatewayPaymentData {
            id: "pay_dummy".to_string(),
            entity: "payment".to_string(),
            amount: 50000,
            currency: CurrencyType::Inr,
            status,
            order_id: "order_dummy".to_string(),
            method: Some("upi".to_string()),
            captured,
            created_at: 1723291200,
        }
    }

    #[test]
    fn captured_payment_wins_over_failed_attempts() {
        let client = PaymentClient::new(&crate::configuration::PaymentGatewayConfig {
            base_url: "http://localhost".to_string(),
            key_id: "rzp_test".to_string(),
            key_secret: SecretString::from("secret".to_string()),
            timeout_secs: 5,
        })
        .unwrap();
        let payments = vec![
            dummy_payment(GatewayPaymentStatus::Failed, false),
            dummy_payment(GatewayPaymentStatus::Captured, true),
        ];
        assert_eq!(
            client.determine_final_payment_status(&payments),
            PaymentStatus::Paid
        );
        assert_eq!(client.determine_final_payment_status(&[]), PaymentStatus::NotPaid);
    }
}

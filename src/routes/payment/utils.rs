use sqlx::PgPool;
use uuid::Uuid;

use super::errors::PaymentOrderError;
use super::models::PaymentOrderModel;
use super::schemas::{
    PaymentConfirmData, PaymentOrderCreateRequest, PaymentOrderData, PaymentStatus,
};
use crate::payment_client::{generate_receipt, PaymentClient};

const ORDER_COLUMNS: &str = "id, idempotency_key, campaign_id, created_by, amount, \
     gateway_order_id, receipt, status, created_on";

#[tracing::instrument(name = "fetch order by idempotency key", skip(pool))]
async fn get_order_by_idempotency_key(
    pool: &PgPool,
    created_by: Uuid,
    idempotency_key: Uuid,
) -> Result<Option<PaymentOrderModel>, anyhow::Error> {
    let row = sqlx::query_as::<_, PaymentOrderModel>(&format!(
        "SELECT {} FROM payment_order WHERE created_by = $1 AND idempotency_key = $2",
        ORDER_COLUMNS
    ))
    .bind(created_by)
    .bind(idempotency_key)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching payment order")
    })?;
    Ok(row)
}

#[tracing::instrument(name = "fetch order by gateway id", skip(pool))]
async fn get_order_by_gateway_id(
    pool: &PgPool,
    gateway_order_id: &str,
) -> Result<Option<PaymentOrderModel>, anyhow::Error> {
    let row = sqlx::query_as::<_, PaymentOrderModel>(&format!(
        "SELECT {} FROM payment_order WHERE gateway_order_id = $1",
        ORDER_COLUMNS
    ))
    .bind(gateway_order_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching payment order")
    })?;
    Ok(row)
}

/// Opens a payable order: validates the target campaign, asks the gateway for
/// an order and records it. A retry carrying the same idempotency key returns
/// the order the first attempt created, without a second gateway call.
#[tracing::instrument(name = "create payment order", skip(pool, payment_client))]
pub async fn create_payment_order(
    pool: &PgPool,
    payment_client: &PaymentClient,
    created_by: Uuid,
    request: &PaymentOrderCreateRequest,
) -> Result<PaymentOrderData, PaymentOrderError> {
    if let Some(existing) =
        get_order_by_idempotency_key(pool, created_by, request.idempotency_key).await?
    {
        tracing::info!("Replaying payment order for idempotency key");
        return Ok(existing.into_schema());
    }
    if let Some(campaign_id) = request.campaign_id {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM campaign WHERE id = $1 AND status = 'active'",
        )
        .bind(campaign_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            PaymentOrderError::DatabaseError(
                "Failed to verify campaign".to_string(),
                anyhow::Error::new(e),
            )
        })?
        .ok_or_else(|| {
            PaymentOrderError::ValidationError("Campaign not found or not active".to_string())
        })?;
    }

    let receipt = generate_receipt(request.campaign_id.as_ref());
    let gateway_order = payment_client
        .create_order(&request.amount, &receipt)
        .await
        .map_err(|e| PaymentOrderError::GatewayError(e.to_string()))?;

    let row = sqlx::query_as::<_, PaymentOrderModel>(&format!(
        r#"
        INSERT INTO payment_order
            (idempotency_key, campaign_id, created_by, amount, gateway_order_id, receipt)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {}
        "#,
        ORDER_COLUMNS
    ))
    .bind(request.idempotency_key)
    .bind(request.campaign_id)
    .bind(created_by)
    .bind(&request.amount)
    .bind(&gateway_order.id)
    .bind(&receipt)
    .fetch_one(pool)
    .await;

    match row {
        Ok(model) => Ok(model.into_schema()),
        Err(e) => {
            let constraint = match &e {
                sqlx::Error::Database(db) => db.constraint().map(|s| s.to_string()),
                _ => None,
            };
            // Two concurrent requests with the same key can both miss the
            // lookup; the per-account unique index arbitrates, the loser
            // replays.
            if constraint.as_deref() == Some("payment_order_created_by_idempotency_key_key") {
                let existing =
                    get_order_by_idempotency_key(pool, created_by, request.idempotency_key)
                        .await?
                        .ok_or(PaymentOrderError::NotFound)?;
                Ok(existing.into_schema())
            } else {
                tracing::error!("Failed to execute query: {:?}", e);
                Err(PaymentOrderError::DatabaseError(
                    "Failed to save payment order".to_string(),
                    anyhow::Error::new(e),
                ))
            }
        }
    }
}

/// Settles an order against what the gateway actually recorded. The handler
/// never trusts the client's claim of payment: it re-fetches the gateway's
/// payment list and only a captured or authorized payment marks the order
/// paid and lands a feed row. The feed insert is write-once per order, so
/// replayed confirmations cannot double-count.
#[tracing::instrument(name = "confirm payment", skip(pool, payment_client))]
pub async fn confirm_payment(
    pool: &PgPool,
    payment_client: &PaymentClient,
    user_id: Uuid,
    gateway_order_id: &str,
) -> Result<PaymentConfirmData, PaymentOrderError> {
    let order = get_order_by_gateway_id(pool, gateway_order_id)
        .await?
        .ok_or(PaymentOrderError::NotFound)?;
    if order.created_by != user_id {
        return Err(PaymentOrderError::NotOwner);
    }

    let payments = payment_client
        .fetch_payments_for_order(gateway_order_id)
        .await
        .map_err(|e| PaymentOrderError::GatewayError(e.to_string()))?;
    let payment_status = payment_client.determine_final_payment_status(&payments);
    let payment_id = payments
        .iter()
        .find(|p| p.payment_status() == PaymentStatus::Paid)
        .map(|p| p.id.clone());

    let newly_settled = match payment_status {
        PaymentStatus::Paid => {
            record_settlement(pool, &order, payment_id.as_deref().unwrap_or_default()).await?
        }
        // Refunded is terminal: no capture survived, the order will never
        // settle. NotPaid is not, the donor may still complete checkout.
        PaymentStatus::Refunded => {
            mark_order_failed(pool, order.id).await?;
            false
        }
        PaymentStatus::NotPaid => false,
    };

    let order = get_order_by_gateway_id(pool, gateway_order_id)
        .await?
        .ok_or(PaymentOrderError::NotFound)?;
    Ok(PaymentConfirmData {
        order: order.into_schema(),
        payment_status,
        payment_id,
        newly_settled,
    })
}

/// An order that already settled keeps its paid status even if the gateway
/// later reports the payments refunded.
async fn mark_order_failed(pool: &PgPool, order_id: Uuid) -> Result<(), PaymentOrderError> {
    sqlx::query("UPDATE payment_order SET status = 'failed' WHERE id = $1 AND status = 'created'")
        .bind(order_id)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            PaymentOrderError::DatabaseError(
                "Failed to update payment order".to_string(),
                anyhow::Error::new(e),
            )
        })?;
    Ok(())
}

/// Marks the order paid and, for campaign orders, inserts the feed row in the
/// same transaction. Returns whether this call recorded the settlement.
async fn record_settlement(
    pool: &PgPool,
    order: &PaymentOrderModel,
    payment_id: &str,
) -> Result<bool, PaymentOrderError> {
    let mut tx = pool.begin().await.map_err(|e| {
        PaymentOrderError::DatabaseError(
            "Failed to open transaction".to_string(),
            anyhow::Error::new(e),
        )
    })?;

    let order_updated = sqlx::query(
        "UPDATE payment_order SET status = 'paid' WHERE id = $1 AND status <> 'paid'",
    )
    .bind(order.id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        PaymentOrderError::DatabaseError(
            "Failed to update payment order".to_string(),
            anyhow::Error::new(e),
        )
    })?
    .rows_affected();

    let newly_settled = if let Some(campaign_id) = order.campaign_id {
        let inserted = sqlx::query(
            r#"
            INSERT INTO campaign_donation (campaign_id, donor_id, amount, payment_id, order_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (order_id) DO NOTHING
            "#,
        )
        .bind(campaign_id)
        .bind(order.created_by)
        .bind(&order.amount)
        .bind(payment_id)
        .bind(&order.gateway_order_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            PaymentOrderError::DatabaseError(
                "Failed to record campaign donation".to_string(),
                anyhow::Error::new(e),
            )
        })?
        .rows_affected();
        inserted > 0
    } else {
        order_updated > 0
    };

    tx.commit().await.map_err(|e| {
        PaymentOrderError::DatabaseError(
            "Failed to commit transaction".to_string(),
            anyhow::Error::new(e),
        )
    })?;
    Ok(newly_settled)
}

use std::sync::Arc;

use actix::Addr;
use actix_web::web;
use sqlx::PgPool;
use utoipa::TupleUnit;

use super::schemas::{
    PaymentConfirmData, PaymentConfirmRequest, PaymentOrderCreateRequest, PaymentOrderData,
};
use super::utils::{confirm_payment, create_payment_order};
use crate::email_client::GenericEmailService;
use crate::errors::GenericError;
use crate::payment_client::PaymentClient;
use crate::routes::campaign::utils::get_campaign_by_id;
use crate::routes::ngo::utils::get_ngo_by_id;
use crate::routes::notification::utils::{save_notification, send_email_in_background};
use crate::routes::user::schemas::UserAccount;
use crate::routes::user::utils::get_user;
use crate::schemas::GenericResponse;
use crate::websocket::{MessageToClient, Server, WebSocketActionType};

#[utoipa::path(
    post,
    path = "/payment/order/create",
    tag = "Payment",
    description = "Opens a payable order with the gateway for a money donation. Safe to \
        retry: the same idempotency key always returns the same order.",
    request_body(content = PaymentOrderCreateRequest, description = "Request Body"),
    responses(
        (status=200, description= "Order created", body= GenericResponse<PaymentOrderData>),
        (status=400, description= "Invalid Request body", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(
    name = "create payment order",
    skip(pool, payment_client),
    fields(user_id = %user.id)
)]
pub async fn create_order(
    body: PaymentOrderCreateRequest,
    pool: web::Data<PgPool>,
    payment_client: web::Data<PaymentClient>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<PaymentOrderData>>, GenericError> {
    let order = create_payment_order(&pool, &payment_client, user.id, &body).await?;
    Ok(web::Json(GenericResponse::success(
        "Successfully created payment order",
        Some(order),
    )))
}

#[utoipa::path(
    post,
    path = "/payment/confirm",
    tag = "Payment",
    description = "Confirms a checkout. The server re-fetches the gateway's payment list \
        and records the settlement only when the gateway reports a capture.",
    request_body(content = PaymentConfirmRequest, description = "Request Body"),
    responses(
        (status=200, description= "Confirmation outcome", body= GenericResponse<PaymentConfirmData>),
        (status=400, description= "Invalid Request body", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=410, description= "Order not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(
    name = "confirm payment",
    skip(pool, payment_client, websocket_srv, email_service),
    fields(user_id = %user.id)
)]
pub async fn confirm(
    body: PaymentConfirmRequest,
    pool: web::Data<PgPool>,
    payment_client: web::Data<PaymentClient>,
    user: UserAccount,
    websocket_srv: web::Data<Addr<Server>>,
    email_service: web::Data<Arc<dyn GenericEmailService>>,
) -> Result<web::Json<GenericResponse<PaymentConfirmData>>, GenericError> {
    let outcome = confirm_payment(&pool, &payment_client, user.id, &body.order_id).await?;

    if outcome.newly_settled {
        if let Some(campaign_id) = outcome.order.campaign_id {
            let payload = serde_json::json!({
                "orderId": outcome.order.gateway_order_id,
                "donorDisplayName": user.display_name,
                "amount": outcome.order.amount,
            });
            websocket_srv.do_send(MessageToClient::new(
                campaign_id,
                WebSocketActionType::DonationReceived,
                payload,
            ));
            if let Err(e) = notify_campaign_owner(&pool, &email_service, campaign_id, &user, &outcome.order.amount.to_string()).await
            {
                tracing::error!("Failed to notify campaign owner: {:?}", e);
            }
        }
    }
    Ok(web::Json(GenericResponse::success(
        "Successfully processed payment confirmation",
        Some(outcome),
    )))
}

async fn notify_campaign_owner(
    pool: &PgPool,
    email_service: &web::Data<Arc<dyn GenericEmailService>>,
    campaign_id: uuid::Uuid,
    donor: &UserAccount,
    amount: &str,
) -> Result<(), anyhow::Error> {
    let campaign = get_campaign_by_id(pool, campaign_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Campaign vanished after settlement"))?;
    let ngo = get_ngo_by_id(pool, campaign.ngo_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("NGO vanished after settlement"))?;
    let message = format!(
        "{} donated INR {} to {}",
        donor.display_name, amount, campaign.name
    );
    save_notification(pool, ngo.owner_id, &message).await?;
    if let Some(owner) = get_user(ngo.owner_id, pool).await? {
        send_email_in_background(
            email_service.get_ref().clone(),
            owner.email,
            "New donation received".to_string(),
            message,
        );
    }
    Ok(())
}

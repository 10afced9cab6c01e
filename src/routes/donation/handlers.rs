use std::sync::Arc;

use actix::Addr;
use actix_web::web;
use sqlx::PgPool;
use utoipa::TupleUnit;

use super::schemas::{
    CreateDonationRequest, DonationData, DonationListFilter, DonationStatusUpdateRequest,
};
use super::utils::{
    fetch_donations_for_donor, fetch_donations_for_ngo, save_donation, transition_donation_status,
};
use crate::email_client::GenericEmailService;
use crate::errors::GenericError;
use crate::routes::ngo::utils::get_ngo_by_owner;
use crate::routes::notification::utils::{save_notification, send_email_in_background};
use crate::routes::user::schemas::{UserAccount, UserType};
use crate::routes::user::utils::get_user;
use crate::schemas::GenericResponse;
use crate::websocket::{MessageToClient, Server, WebSocketActionType};

#[utoipa::path(
    post,
    path = "/donation/create",
    tag = "Donation",
    description = "Records a new donation pledge. Money donations require a positive amount.",
    request_body(content = CreateDonationRequest, description = "Request Body"),
    responses(
        (status=200, description= "Donation created", body= GenericResponse<DonationData>),
        (status=400, description= "Invalid Request body", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(
    name = "create donation",
    skip(pool, websocket_srv),
    fields(user_id = %user.id)
)]
pub async fn create_donation(
    body: CreateDonationRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
    websocket_srv: web::Data<Addr<Server>>,
) -> Result<web::Json<GenericResponse<DonationData>>, GenericError> {
    let donation = save_donation(&pool, user.id, &body).await?;
    // Not a settled donation yet, so it must not announce as one.
    if let Some(campaign_id) = donation.campaign_id {
        let payload = serde_json::to_value(&donation)?;
        websocket_srv.do_send(MessageToClient::new(
            campaign_id,
            WebSocketActionType::PledgeReceived,
            payload,
        ));
    }
    Ok(web::Json(GenericResponse::success(
        "Successfully created donation",
        Some(donation),
    )))
}

#[utoipa::path(
    post,
    path = "/donation/status/update",
    tag = "Donation",
    description = "Accepts, rejects or completes a donation. Only the NGO the donation \
        targets may act on it, and the caller must supply the version it last read.",
    request_body(content = DonationStatusUpdateRequest, description = "Request Body"),
    responses(
        (status=200, description= "Status updated", body= GenericResponse<DonationData>),
        (status=400, description= "Invalid transition", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=409, description= "Concurrent modification", body= GenericResponse<TupleUnit>),
        (status=410, description= "Donation not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(
    name = "update donation status",
    skip(pool, websocket_srv, email_service),
    fields(user_id = %user.id)
)]
pub async fn update_donation_status(
    body: DonationStatusUpdateRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
    websocket_srv: web::Data<Addr<Server>>,
    email_service: web::Data<Arc<dyn GenericEmailService>>,
) -> Result<web::Json<GenericResponse<DonationData>>, GenericError> {
    let ngo = get_ngo_by_owner(&pool, user.id).await?.ok_or_else(|| {
        GenericError::ValidationError("No NGO profile exists for this account".to_string())
    })?;
    let donation = transition_donation_status(&pool, ngo.id, &body).await?;

    let message = format!(
        "Your {} donation to {} is now {}",
        donation.category, ngo.display_name, donation.status
    );
    if let Err(e) = save_notification(&pool, donation.donor_id, &message).await {
        tracing::error!("Failed to save donor notification: {:?}", e);
    }
    if let Some(campaign_id) = donation.campaign_id {
        let payload = serde_json::to_value(&donation)?;
        websocket_srv.do_send(MessageToClient::new(
            campaign_id,
            WebSocketActionType::DonationStatusUpdate,
            payload,
        ));
    }
    match get_user(donation.donor_id, &pool).await {
        Ok(Some(donor)) => {
            send_email_in_background(
                email_service.get_ref().clone(),
                donor.email,
                "Donation status update".to_string(),
                message,
            );
        }
        Ok(None) => {}
        Err(e) => tracing::error!("Failed to fetch donor for email: {:?}", e),
    }
    Ok(web::Json(GenericResponse::success(
        "Successfully updated donation status",
        Some(donation),
    )))
}

#[utoipa::path(
    get,
    path = "/donation/list",
    tag = "Donation",
    description = "Lists donations scoped to the caller. Donors see their own pledges, \
        NGO accounts see donations targeting their NGO.",
    params(("status" = Option<String>, Query, description = "Filter by donation status")),
    responses(
        (status=200, description= "Donation list", body= GenericResponse<Vec<DonationData>>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "list donations", skip(pool), fields(user_id = %user.id))]
pub async fn list_donations(
    pool: web::Data<PgPool>,
    user: UserAccount,
    filter: web::Query<DonationListFilter>,
) -> Result<web::Json<GenericResponse<Vec<DonationData>>>, GenericError> {
    let donations = match user.role {
        UserType::Ngo => {
            let ngo = get_ngo_by_owner(&pool, user.id).await?.ok_or_else(|| {
                GenericError::ValidationError("No NGO profile exists for this account".to_string())
            })?;
            fetch_donations_for_ngo(&pool, ngo.id, filter.status)
                .await
                .map_err(|e| {
                    GenericError::DatabaseError("Failed to fetch donations".to_string(), e)
                })?
        }
        _ => fetch_donations_for_donor(&pool, user.id, filter.status)
            .await
            .map_err(|e| {
                GenericError::DatabaseError("Failed to fetch donations".to_string(), e)
            })?,
    };
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched donations",
        Some(donations),
    )))
}

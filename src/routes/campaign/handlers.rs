use actix::Addr;
use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use sqlx::PgPool;
use utoipa::TupleUnit;
use uuid::Uuid;

use super::schemas::{
    CampaignCloseRequest, CampaignData, CampaignDonationData, CreateCampaignRequest,
};
use super::utils::{
    close_campaign, fetch_active_campaigns, fetch_campaign_donations, get_campaign_by_id,
    save_campaign,
};
use crate::errors::GenericError;
use crate::routes::ngo::utils::get_ngo_by_owner;
use crate::routes::user::schemas::UserAccount;
use crate::schemas::GenericResponse;
use crate::websocket::{Server, WebSocketSession};

#[utoipa::path(
    post,
    path = "/campaign/create",
    tag = "Campaign",
    description = "Creates a fundraising campaign under the caller's NGO profile.",
    request_body(content = CreateCampaignRequest, description = "Request Body"),
    responses(
        (status=200, description= "Campaign created", body= GenericResponse<CampaignData>),
        (status=400, description= "Invalid Request body", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "create campaign", skip(pool), fields(user_id = %user.id))]
pub async fn create_campaign(
    body: CreateCampaignRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<CampaignData>>, GenericError> {
    let ngo = get_ngo_by_owner(&pool, user.id).await?.ok_or_else(|| {
        GenericError::ValidationError("No NGO profile exists for this account".to_string())
    })?;
    let campaign = save_campaign(&pool, ngo.id, user.id, &body).await?;
    Ok(web::Json(GenericResponse::success(
        "Successfully created campaign",
        Some(campaign),
    )))
}

#[utoipa::path(
    post,
    path = "/campaign/status/update",
    tag = "Campaign",
    description = "Closes a campaign. Closed campaigns stop accepting payment orders; \
        closing is final.",
    request_body(content = CampaignCloseRequest, description = "Request Body"),
    responses(
        (status=200, description= "Campaign closed", body= GenericResponse<CampaignData>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=410, description= "Campaign not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "close campaign", skip(pool), fields(user_id = %user.id))]
pub async fn close_campaign_handler(
    body: CampaignCloseRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<CampaignData>>, GenericError> {
    let ngo = get_ngo_by_owner(&pool, user.id).await?.ok_or_else(|| {
        GenericError::ValidationError("No NGO profile exists for this account".to_string())
    })?;
    let campaign = close_campaign(&pool, ngo.id, body.campaign_id).await?;
    Ok(web::Json(GenericResponse::success(
        "Successfully closed campaign",
        Some(campaign),
    )))
}

#[utoipa::path(
    get,
    path = "/campaign/list",
    tag = "Campaign",
    description = "Lists active campaigns across all NGOs.",
    responses(
        (status=200, description= "Campaign list", body= GenericResponse<Vec<CampaignData>>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "list campaigns", skip(pool, _user))]
pub async fn list_campaigns(
    pool: web::Data<PgPool>,
    _user: UserAccount,
) -> Result<web::Json<GenericResponse<Vec<CampaignData>>>, GenericError> {
    let campaigns = fetch_active_campaigns(&pool, None).await.map_err(|e| {
        GenericError::DatabaseError("Failed to fetch campaigns".to_string(), e)
    })?;
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched campaigns",
        Some(campaigns),
    )))
}

#[utoipa::path(
    get,
    path = "/campaign/donations/{campaign_id}",
    tag = "Campaign",
    description = "Lists settled donations for a campaign, newest first. Clients re-query \
        this endpoint when the campaign websocket pushes a change notification.",
    params(("campaign_id" = String, Path, description = "Campaign id")),
    responses(
        (status=200, description= "Donation feed", body= GenericResponse<Vec<CampaignDonationData>>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=410, description= "Campaign not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "campaign donation feed", skip(pool, _user))]
pub async fn list_campaign_donations(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    _user: UserAccount,
) -> Result<web::Json<GenericResponse<Vec<CampaignDonationData>>>, GenericError> {
    let campaign_id = path.into_inner();
    get_campaign_by_id(&pool, campaign_id)
        .await?
        .ok_or_else(|| GenericError::DataNotFound("Campaign not found".to_string()))?;
    let donations = fetch_campaign_donations(&pool, campaign_id)
        .await
        .map_err(|e| {
            GenericError::DatabaseError("Failed to fetch campaign donations".to_string(), e)
        })?;
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched campaign donations",
        Some(donations),
    )))
}

/// Upgrades to a websocket session scoped to one campaign. Sessions only ever
/// receive notifications for the campaign they subscribed to.
#[tracing::instrument(name = "campaign websocket", skip(req, stream, pool, websocket_srv))]
pub async fn campaign_ws(
    req: HttpRequest,
    path: web::Path<Uuid>,
    stream: web::Payload,
    pool: web::Data<PgPool>,
    websocket_srv: web::Data<Addr<Server>>,
) -> Result<HttpResponse, GenericError> {
    let campaign_id = path.into_inner();
    get_campaign_by_id(&pool, campaign_id)
        .await?
        .ok_or_else(|| GenericError::DataNotFound("Campaign not found".to_string()))?;
    let session = WebSocketSession::new(campaign_id, websocket_srv.get_ref().clone());
    ws::start(session, &req, stream)
        .map_err(|e| GenericError::UnexpectedError(anyhow::anyhow!("{}", e)))
}

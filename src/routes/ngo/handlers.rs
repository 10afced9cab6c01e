use actix_web::web;
use sqlx::PgPool;
use utoipa::TupleUnit;

use super::schemas::{CreateNgoProfileRequest, NgoData};
use super::utils::{fetch_verified_ngos, save_ngo_profile};
use crate::errors::GenericError;
use crate::routes::user::schemas::UserAccount;
use crate::schemas::GenericResponse;

#[utoipa::path(
    post,
    path = "/ngo/register",
    tag = "NGO",
    description = "Creates the NGO profile for the signed-in NGO account. Profiles start unverified.",
    request_body(content = CreateNgoProfileRequest, description = "Request Body"),
    responses(
        (status=200, description= "Profile created", body= GenericResponse<TupleUnit>),
        (status=400, description= "Invalid Request body", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "ngo registration", skip(pool), fields(user_id = %user.id))]
pub async fn register_ngo(
    body: CreateNgoProfileRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<()>>, GenericError> {
    save_ngo_profile(&pool, user.id, &body).await?;
    Ok(web::Json(GenericResponse::success(
        "Successfully created NGO profile",
        Some(()),
    )))
}

#[utoipa::path(
    get,
    path = "/ngo/list",
    tag = "NGO",
    description = "Lists verified NGOs for donor browsing.",
    responses(
        (status=200, description= "NGO list", body= GenericResponse<Vec<NgoData>>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "ngo list", skip(pool, _user))]
pub async fn list_ngos(
    pool: web::Data<PgPool>,
    _user: UserAccount,
) -> Result<web::Json<GenericResponse<Vec<NgoData>>>, GenericError> {
    let ngos = fetch_verified_ngos(&pool).await.map_err(|e| {
        GenericError::DatabaseError("Failed to fetch NGO list".to_string(), e)
    })?;
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched NGO list",
        Some(ngos),
    )))
}

use actix_web::web;
use sqlx::PgPool;
use utoipa::TupleUnit;
use uuid::Uuid;

use super::schemas::{LocationData, LocationRecordRequest};
use super::utils::{fetch_latest_locations, record_location};
use crate::errors::GenericError;
use crate::routes::user::schemas::UserAccount;
use crate::schemas::GenericResponse;

#[utoipa::path(
    post,
    path = "/volunteer/location/record",
    tag = "Volunteer",
    description = "Records a location ping for the signed-in volunteer on an assignment.",
    request_body(content = LocationRecordRequest, description = "Request Body"),
    responses(
        (status=200, description= "Location recorded", body= GenericResponse<LocationData>),
        (status=400, description= "Invalid Request body", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=403, description= "Insufficient Privilege", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "record location", skip(pool), fields(user_id = %user.id))]
pub async fn record_location_handler(
    body: LocationRecordRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<LocationData>>, GenericError> {
    let location = record_location(&pool, user.id, &body).await.map_err(|e| {
        GenericError::DatabaseError("Failed to record location".to_string(), e)
    })?;
    Ok(web::Json(GenericResponse::success(
        "Successfully recorded location",
        Some(location),
    )))
}

#[utoipa::path(
    get,
    path = "/volunteer/location/latest/{assignment_id}",
    tag = "Volunteer",
    description = "Latest location per volunteer for an assignment.",
    params(("assignment_id" = String, Path, description = "Assignment id")),
    responses(
        (status=200, description= "Latest locations", body= GenericResponse<Vec<LocationData>>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "latest locations", skip(pool, _user))]
pub async fn latest_locations(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    _user: UserAccount,
) -> Result<web::Json<GenericResponse<Vec<LocationData>>>, GenericError> {
    let locations = fetch_latest_locations(&pool, path.into_inner())
        .await
        .map_err(|e| {
            GenericError::DatabaseError("Failed to fetch locations".to_string(), e)
        })?;
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched locations",
        Some(locations),
    )))
}

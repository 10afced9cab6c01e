use actix_web::web;
use sqlx::PgPool;
use utoipa::TupleUnit;

use super::schemas::{NotificationData, NotificationSeenRequest};
use super::utils::{fetch_notifications, mark_notification_seen};
use crate::errors::GenericError;
use crate::routes::user::schemas::UserAccount;
use crate::schemas::GenericResponse;

#[utoipa::path(
    get,
    path = "/notification/list",
    tag = "Notification",
    description = "Lists the caller's notifications, newest first.",
    responses(
        (status=200, description= "Notification list", body= GenericResponse<Vec<NotificationData>>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "list notifications", skip(pool), fields(user_id = %user.id))]
pub async fn list_notifications(
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<Vec<NotificationData>>>, GenericError> {
    let notifications = fetch_notifications(&pool, user.id).await.map_err(|e| {
        GenericError::DatabaseError("Failed to fetch notifications".to_string(), e)
    })?;
    Ok(web::Json(GenericResponse::success(
        "Successfully fetched notifications",
        Some(notifications),
    )))
}

#[utoipa::path(
    post,
    path = "/notification/seen",
    tag = "Notification",
    description = "Marks one of the caller's notifications as seen.",
    request_body(content = NotificationSeenRequest, description = "Request Body"),
    responses(
        (status=200, description= "Notification updated", body= GenericResponse<TupleUnit>),
        (status=401, description= "Invalid Token", body= GenericResponse<TupleUnit>),
        (status=410, description= "Notification not found", body= GenericResponse<TupleUnit>),
        (status=500, description= "Internal Server Error", body= GenericResponse<TupleUnit>),
    )
)]
#[tracing::instrument(name = "mark notification seen", skip(pool), fields(user_id = %user.id))]
pub async fn mark_seen(
    body: NotificationSeenRequest,
    pool: web::Data<PgPool>,
    user: UserAccount,
) -> Result<web::Json<GenericResponse<()>>, GenericError> {
    let updated = mark_notification_seen(&pool, user.id, body.notification_id)
        .await
        .map_err(|e| {
            GenericError::DatabaseError("Failed to update notification".to_string(), e)
        })?;
    if !updated {
        return Err(GenericError::DataNotFound(
            "Notification not found".to_string(),
        ));
    }
    Ok(web::Json(GenericResponse::success(
        "Successfully marked notification as seen",
        Some(()),
    )))
}

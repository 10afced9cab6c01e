use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use super::models::NotificationModel;
use super::schemas::NotificationData;
use crate::email_client::GenericEmailService;

#[tracing::instrument(name = "save notification", skip(pool))]
pub async fn save_notification(
    pool: &PgPool,
    user_id: Uuid,
    message: &str,
) -> Result<Uuid, anyhow::Error> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO user_notification (user_id, message) VALUES ($1, $2) RETURNING id",
    )
    .bind(user_id)
    .bind(message)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while saving notification")
    })?;
    Ok(id)
}

#[tracing::instrument(name = "fetch notifications", skip(pool))]
pub async fn fetch_notifications(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<NotificationData>, anyhow::Error> {
    let rows = sqlx::query_as::<_, NotificationModel>(
        r#"
        SELECT id, message, seen, created_on
        FROM user_notification
        WHERE user_id = $1
        ORDER BY created_on DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while fetching notifications")
    })?;
    Ok(rows
        .into_iter()
        .map(NotificationModel::into_schema)
        .collect())
}

#[tracing::instrument(name = "mark notification seen", skip(pool))]
pub async fn mark_notification_seen(
    pool: &PgPool,
    user_id: Uuid,
    notification_id: Uuid,
) -> Result<bool, anyhow::Error> {
    let updated = sqlx::query(
        "UPDATE user_notification SET seen = TRUE WHERE id = $1 AND user_id = $2",
    )
    .bind(notification_id)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        anyhow::Error::new(e).context("A database failure occurred while updating notification")
    })?
    .rows_affected();
    Ok(updated > 0)
}

/// Fire-and-forget delivery; a failed mail never fails the request that
/// triggered it.
pub fn send_email_in_background(
    email_service: Arc<dyn GenericEmailService>,
    recipient: String,
    subject: String,
    body: String,
) {
    tokio::spawn(async move {
        if let Err(e) = email_service
            .send_text_email(&recipient, &subject, body)
            .await
        {
            tracing::error!("Failed to send email: {:?}", e);
        }
    });
}

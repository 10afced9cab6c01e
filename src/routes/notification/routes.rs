use actix_web::web;

use super::handlers::{list_notifications, mark_seen};
use crate::routes::user::RequireAuth;

pub fn notification_route(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/list").route(web::get().to(list_notifications).wrap(RequireAuth)),
    );
    cfg.service(web::resource("/seen").route(web::post().to(mark_seen).wrap(RequireAuth)));
}

use actix_web::web;

use super::campaign::campaign_route;
use super::donation::donation_route;
use super::ngo::ngo_route;
use super::notification::notification_route;
use super::payment::payment_route;
use super::user::user_route;
use super::volunteer::volunteer_route;
use crate::schemas::GenericResponse;

#[utoipa::path(
    get,
    path = "/health_check",
    tag = "Health",
    description = "Liveness probe.",
    responses(
        (status=200, description= "Service is up", body= GenericResponse<utoipa::TupleUnit>),
    )
)]
pub async fn health_check() -> web::Json<GenericResponse<()>> {
    web::Json(GenericResponse::success("Running Server", Some(())))
}

pub fn main_route(cfg: &mut web::ServiceConfig) {
    cfg.route("/health_check", web::get().to(health_check));
    cfg.service(web::scope("/user").configure(user_route));
    cfg.service(web::scope("/ngo").configure(ngo_route));
    cfg.service(web::scope("/campaign").configure(campaign_route));
    cfg.service(web::scope("/donation").configure(donation_route));
    cfg.service(web::scope("/payment").configure(payment_route));
    cfg.service(web::scope("/volunteer").configure(volunteer_route));
    cfg.service(web::scope("/notification").configure(notification_route));
}

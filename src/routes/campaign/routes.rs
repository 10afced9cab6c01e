use actix_web::web;

use super::handlers::{
    campaign_ws, close_campaign_handler, create_campaign, list_campaign_donations, list_campaigns,
};
use crate::routes::user::schemas::UserType;
use crate::routes::user::{RequireAuth, RoleValidation};

pub fn campaign_route(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/create").route(
            web::post()
                .to(create_campaign)
                .wrap(RoleValidation {
                    role_list: vec![UserType::Ngo],
                })
                .wrap(RequireAuth),
        ),
    );
    cfg.service(
        web::resource("/status/update").route(
            web::post()
                .to(close_campaign_handler)
                .wrap(RoleValidation {
                    role_list: vec![UserType::Ngo],
                })
                .wrap(RequireAuth),
        ),
    );
    cfg.service(web::resource("/list").route(web::get().to(list_campaigns).wrap(RequireAuth)));
    cfg.service(
        web::resource("/donations/{campaign_id}")
            .route(web::get().to(list_campaign_donations).wrap(RequireAuth)),
    );
    // Browser websockets cannot set auth headers; the feed only exposes data
    // that is already public on the campaign page.
    cfg.service(web::resource("/ws/{campaign_id}").route(web::get().to(campaign_ws)));
}

use actix_web::web;

use super::handlers::{create_donation, list_donations, update_donation_status};
use crate::routes::user::schemas::UserType;
use crate::routes::user::{RequireAuth, RoleValidation};

pub fn donation_route(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/create").route(
            web::post()
                .to(create_donation)
                .wrap(RoleValidation {
                    role_list: vec![UserType::Donor],
                })
                .wrap(RequireAuth),
        ),
    );
    cfg.service(
        web::resource("/status/update").route(
            web::post()
                .to(update_donation_status)
                .wrap(RoleValidation {
                    role_list: vec![UserType::Ngo],
                })
                .wrap(RequireAuth),
        ),
    );
    cfg.service(web::resource("/list").route(web::get().to(list_donations).wrap(RequireAuth)));
}

use actix_web::web;

use super::handlers::{confirm, create_order};
use crate::routes::user::schemas::UserType;
use crate::routes::user::{RequireAuth, RoleValidation};

pub fn payment_route(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/order/create").route(
            web::post()
                .to(create_order)
                .wrap(RoleValidation {
                    role_list: vec![UserType::Donor],
                })
                .wrap(RequireAuth),
        ),
    );
    cfg.service(
        web::resource("/confirm").route(
            web::post()
                .to(confirm)
                .wrap(RoleValidation {
                    role_list: vec![UserType::Donor],
                })
                .wrap(RequireAuth),
        ),
    );
}

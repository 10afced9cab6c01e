use actix_web::web;

use super::handlers::{list_ngos, register_ngo};
use crate::routes::user::schemas::UserType;
use crate::routes::user::{RequireAuth, RoleValidation};

pub fn ngo_route(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/register").route(
            web::post()
                .to(register_ngo)
                .wrap(RoleValidation {
                    role_list: vec![UserType::Ngo],
                })
                .wrap(RequireAuth),
        ),
    );
    cfg.service(web::resource("/list").route(web::get().to(list_ngos).wrap(RequireAuth)));
}

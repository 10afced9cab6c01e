use actix_web::web;

use super::handlers::{latest_locations, record_location_handler};
use crate::routes::user::schemas::UserType;
use crate::routes::user::{RequireAuth, RoleValidation};

pub fn volunteer_route(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/location/record").route(
            web::post()
                .to(record_location_handler)
                .wrap(RoleValidation {
                    role_list: vec![UserType::Volunteer],
                })
                .wrap(RequireAuth),
        ),
    );
    cfg.service(
        web::resource("/location/latest/{assignment_id}").route(
            web::get()
                .to(latest_locations)
                .wrap(RoleValidation {
                    role_list: vec![UserType::Ngo],
                })
                .wrap(RequireAuth),
        ),
    );
}

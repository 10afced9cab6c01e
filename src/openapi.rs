use utoipa::OpenApi;
use utoipauto::utoipauto;

#[utoipauto]
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Seva Connect REST API", description = "Donor, NGO and volunteer coordination API endpoints")
    ),
)]
pub struct ApiDoc {}

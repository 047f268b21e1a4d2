use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the bearer scheme referenced by the catalog operations.
///
/// Tokens are verified by the gateway in front of this service.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Read-only product catalog with hypermedia links and paginated listings"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = domain_catalog::links::ITEMS_PATH, api = domain_catalog::ApiDoc)
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

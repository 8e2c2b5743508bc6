use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{
    AccountType, NullSpeedCafeCard, NullSpeedRegularUser, Package, PrepaidCard, Subscriber,
    SubscriberStatus,
};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::logout,
        handlers::staff::get_me,
        handlers::subscribers::list_subscribers,
        handlers::subscribers::search_subscribers,
        handlers::subscribers::get_subscriber,
        handlers::subscribers::create_subscriber,
        handlers::subscribers::update_subscriber,
        handlers::subscribers::delete_subscriber,
        handlers::subscribers::cancel_subscriber,
        handlers::cafe_cards::list_cafe_cards,
        handlers::cafe_cards::search_cafe_cards,
        handlers::cafe_cards::get_cafe_card,
        handlers::cafe_cards::create_cafe_card,
        handlers::cafe_cards::update_cafe_card,
        handlers::cafe_cards::delete_cafe_card,
        handlers::cafe_cards::cancel_cafe_card,
        handlers::cafe_cards::activate_cafe_card,
        handlers::packages::list_packages,
        handlers::packages::search_packages,
        handlers::packages::get_package,
        handlers::packages::create_package,
        handlers::packages::update_package,
        handlers::packages::delete_package,
        handlers::pending::list_pending,
        handlers::pending::search_pending,
        handlers::pending::get_pending,
        handlers::pending::create_pending,
        handlers::pending::update_pending,
        handlers::pending::delete_pending,
        handlers::pending::activate_pending,
    ),
    components(
        schemas(
            ApiError,
            AffectedRows,
            LoginRequest,
            AuthResponse,
            RefreshResponse,
            StaffResponse,
            Subscriber,
            SubscriberForm,
            SubscriberStatus,
            AccountType,
            CafeCardActivationRequest,
            CafeCardActivationResponse,
            Package,
            PackageForm,
            PendingTable,
            PrepaidCard,
            PrepaidCardForm,
            NullSpeedRegularUser,
            NullSpeedCafeCard,
            NullSpeedForm,
            ActivationOutcome,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Staff authentication"),
        (name = "staff", description = "Current staff user"),
        (name = "subscribers", description = "Active subscribers in AuthTable"),
        (name = "cafe-cards", description = "Cafe cards in AuthTable"),
        (name = "packages", description = "Package catalog"),
        (name = "pending", description = "Cards awaiting activation"),
    ),
    info(
        title = "STC Portal API",
        version = "1.0.0",
        description = "Subscriber administration REST API"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_lifecycle_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/pending/{table}/{id}/activate"));
        assert!(doc.paths.paths.contains_key("/subscribers/{id}/cancel"));
        let schemas = &doc.components.as_ref().unwrap().schemas;
        assert!(schemas.contains_key("Subscriber"));
        assert!(schemas.contains_key("Package"));
        assert!(schemas.contains_key("ActivationOutcome"));
    }
}

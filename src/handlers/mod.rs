pub mod auth;
pub mod cafe_cards;
pub mod packages;
pub mod pending;
pub mod staff;
pub mod subscribers;

pub use auth::auth_config;
pub use cafe_cards::cafe_card_config;
pub use packages::package_config;
pub use pending::pending_config;
pub use staff::staff_config;
pub use subscribers::subscriber_config;

use crate::error::{AppError, AppResult};
use crate::services::AuthService;
use actix_web::{HttpMessage, HttpRequest};

/// Staff id stored in the request by `AuthMiddleware`.
pub(crate) fn current_staff_id(req: &HttpRequest) -> AppResult<i64> {
    req.extensions()
        .get::<i64>()
        .copied()
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

/// Rejects callers that may not modify subscriber data.
pub(crate) async fn require_manager(auth: &AuthService, req: &HttpRequest) -> AppResult<()> {
    let staff_id = current_staff_id(req)?;
    auth.require_manager(staff_id).await?;
    Ok(())
}

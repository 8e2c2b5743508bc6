use crate::handlers::current_staff_id;
use crate::models::*;
use crate::services::AuthService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/staff/me",
    tag = "staff",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current staff user", body = StaffResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_me(auth_service: web::Data<AuthService>, req: HttpRequest) -> Result<HttpResponse> {
    let result = match current_staff_id(&req) {
        Ok(staff_id) => auth_service.get_staff(staff_id).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(staff) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": StaffResponse::from(staff)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn staff_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/staff").route("/me", web::get().to(get_me)));
}

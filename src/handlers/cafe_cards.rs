//! Cafe cards are `AuthTable` rows with `accounttype = cafe`.

use crate::handlers::require_manager;
use crate::models::*;
use crate::services::{AuthService, LifecycleService, SubscriberScope, SubscriberService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

const SCOPE: SubscriberScope = SubscriberScope::CafeCards;

#[utoipa::path(
    get,
    path = "/cafe-cards",
    tag = "cafe-cards",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "One page of cafe cards, newest first")
    )
)]
pub async fn list_cafe_cards(
    subscriber_service: web::Data<SubscriberService>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match subscriber_service.list(&query, SCOPE).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/cafe-cards/search",
    tag = "cafe-cards",
    params(SearchQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Up to 10 matching cafe cards", body = [Subscriber])
    )
)]
pub async fn search_cafe_cards(
    subscriber_service: web::Data<SubscriberService>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    match subscriber_service.search(query.keyword(), SCOPE).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rows
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/cafe-cards/{id}",
    tag = "cafe-cards",
    params(("id" = i64, Path, description = "Cafe card id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Cafe card", body = Subscriber),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_cafe_card(
    subscriber_service: web::Data<SubscriberService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match subscriber_service.get(path.into_inner(), SCOPE).await {
        Ok(card) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": card
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cafe-cards",
    tag = "cafe-cards",
    request_body = SubscriberForm,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Cafe card created", body = Subscriber),
        (status = 409, description = "userlogin already exists")
    )
)]
pub async fn create_cafe_card(
    auth_service: web::Data<AuthService>,
    subscriber_service: web::Data<SubscriberService>,
    req: HttpRequest,
    form: web::Json<SubscriberForm>,
) -> Result<HttpResponse> {
    let result = async {
        require_manager(&auth_service, &req).await?;
        subscriber_service.create(form.into_inner(), SCOPE).await
    }
    .await;
    match result {
        Ok(card) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": card,
            "message": "Cafe card created"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/cafe-cards/{id}",
    tag = "cafe-cards",
    params(("id" = i64, Path, description = "Cafe card id")),
    request_body = SubscriberForm,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Cafe card updated", body = Subscriber),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_cafe_card(
    auth_service: web::Data<AuthService>,
    subscriber_service: web::Data<SubscriberService>,
    req: HttpRequest,
    path: web::Path<i64>,
    form: web::Json<SubscriberForm>,
) -> Result<HttpResponse> {
    let result = async {
        require_manager(&auth_service, &req).await?;
        subscriber_service
            .update(path.into_inner(), form.into_inner(), SCOPE)
            .await
    }
    .await;
    match result {
        Ok(card) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": card,
            "message": "Cafe card updated"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/cafe-cards/{id}",
    tag = "cafe-cards",
    params(("id" = i64, Path, description = "Cafe card id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Rows removed; zero when the id is unknown", body = AffectedRows)
    )
)]
pub async fn delete_cafe_card(
    auth_service: web::Data<AuthService>,
    subscriber_service: web::Data<SubscriberService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let result = async {
        require_manager(&auth_service, &req).await?;
        subscriber_service.delete(id, SCOPE).await
    }
    .await;
    match result {
        Ok(affected) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": affected,
            "message": format!("Cafe card with id={id} has been deleted.")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cafe-cards/{id}/cancel",
    tag = "cafe-cards",
    params(("id" = i64, Path, description = "Cafe card id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Rows cancelled; zero when the id is unknown", body = AffectedRows)
    )
)]
pub async fn cancel_cafe_card(
    auth_service: web::Data<AuthService>,
    lifecycle_service: web::Data<LifecycleService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let result = async {
        require_manager(&auth_service, &req).await?;
        lifecycle_service.cancel(id, SCOPE).await
    }
    .await;
    match result {
        Ok(affected) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": affected,
            "message": format!("Cafe card with id={id} has been cancelled.")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cafe-cards/activate",
    tag = "cafe-cards",
    request_body = CafeCardActivationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Cards activated", body = CafeCardActivationResponse),
        (status = 404, description = "No cafe card for the username, or its package is missing")
    )
)]
pub async fn activate_cafe_card(
    auth_service: web::Data<AuthService>,
    lifecycle_service: web::Data<LifecycleService>,
    req: HttpRequest,
    request: web::Json<CafeCardActivationRequest>,
) -> Result<HttpResponse> {
    let result = async {
        require_manager(&auth_service, &req).await?;
        lifecycle_service.activate_cafe_card(&request.username).await
    }
    .await;
    match result {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response,
            "message": format!("Cafe card for {} has been activated.", request.username.trim())
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn cafe_card_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cafe-cards")
            .route("", web::get().to(list_cafe_cards))
            .route("", web::post().to(create_cafe_card))
            .route("/search", web::get().to(search_cafe_cards))
            .route("/activate", web::post().to(activate_cafe_card))
            .route("/{id}", web::get().to(get_cafe_card))
            .route("/{id}", web::put().to(update_cafe_card))
            .route("/{id}", web::delete().to(delete_cafe_card))
            .route("/{id}/cancel", web::post().to(cancel_cafe_card)),
    );
}

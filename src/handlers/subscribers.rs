use crate::handlers::require_manager;
use crate::models::*;
use crate::services::{AuthService, LifecycleService, SubscriberScope, SubscriberService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/subscribers",
    tag = "subscribers",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "One page of subscribers, newest first")
    )
)]
pub async fn list_subscribers(
    subscriber_service: web::Data<SubscriberService>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match subscriber_service.list(&query, SubscriberScope::All).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subscribers/search",
    tag = "subscribers",
    params(SearchQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Up to 10 matching subscribers", body = [Subscriber])
    )
)]
pub async fn search_subscribers(
    subscriber_service: web::Data<SubscriberService>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    match subscriber_service
        .search(query.keyword(), SubscriberScope::All)
        .await
    {
        Ok(rows) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rows
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subscribers/{id}",
    tag = "subscribers",
    params(("id" = i64, Path, description = "Subscriber id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Subscriber", body = Subscriber),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_subscriber(
    subscriber_service: web::Data<SubscriberService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match subscriber_service
        .get(path.into_inner(), SubscriberScope::All)
        .await
    {
        Ok(subscriber) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": subscriber
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/subscribers",
    tag = "subscribers",
    request_body = SubscriberForm,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Subscriber created", body = Subscriber),
        (status = 400, description = "Invalid form"),
        (status = 409, description = "userlogin already exists")
    )
)]
pub async fn create_subscriber(
    auth_service: web::Data<AuthService>,
    subscriber_service: web::Data<SubscriberService>,
    req: HttpRequest,
    form: web::Json<SubscriberForm>,
) -> Result<HttpResponse> {
    let result = async {
        require_manager(&auth_service, &req).await?;
        subscriber_service
            .create(form.into_inner(), SubscriberScope::All)
            .await
    }
    .await;
    match result {
        Ok(subscriber) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": subscriber,
            "message": "Subscriber created"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/subscribers/{id}",
    tag = "subscribers",
    params(("id" = i64, Path, description = "Subscriber id")),
    request_body = SubscriberForm,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Subscriber updated", body = Subscriber),
        (status = 404, description = "Not found"),
        (status = 409, description = "userlogin already exists")
    )
)]
pub async fn update_subscriber(
    auth_service: web::Data<AuthService>,
    subscriber_service: web::Data<SubscriberService>,
    req: HttpRequest,
    path: web::Path<i64>,
    form: web::Json<SubscriberForm>,
) -> Result<HttpResponse> {
    let result = async {
        require_manager(&auth_service, &req).await?;
        subscriber_service
            .update(path.into_inner(), form.into_inner(), SubscriberScope::All)
            .await
    }
    .await;
    match result {
        Ok(subscriber) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": subscriber,
            "message": "Subscriber updated"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/subscribers/{id}",
    tag = "subscribers",
    params(("id" = i64, Path, description = "Subscriber id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Rows removed; zero when the id is unknown", body = AffectedRows)
    )
)]
pub async fn delete_subscriber(
    auth_service: web::Data<AuthService>,
    subscriber_service: web::Data<SubscriberService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let result = async {
        require_manager(&auth_service, &req).await?;
        subscriber_service.delete(id, SubscriberScope::All).await
    }
    .await;
    match result {
        Ok(affected) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": affected,
            "message": format!("Subscriber with id={id} has been deleted.")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/subscribers/{id}/cancel",
    tag = "subscribers",
    params(("id" = i64, Path, description = "Subscriber id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Rows cancelled; zero when the id is unknown", body = AffectedRows)
    )
)]
pub async fn cancel_subscriber(
    auth_service: web::Data<AuthService>,
    lifecycle_service: web::Data<LifecycleService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let result = async {
        require_manager(&auth_service, &req).await?;
        lifecycle_service.cancel(id, SubscriberScope::All).await
    }
    .await;
    match result {
        Ok(affected) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": affected,
            "message": format!("Subscriber with id={id} has been cancelled.")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn subscriber_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subscribers")
            .route("", web::get().to(list_subscribers))
            .route("", web::post().to(create_subscriber))
            .route("/search", web::get().to(search_subscribers))
            .route("/{id}", web::get().to(get_subscriber))
            .route("/{id}", web::put().to(update_subscriber))
            .route("/{id}", web::delete().to(delete_subscriber))
            .route("/{id}/cancel", web::post().to(cancel_subscriber)),
    );
}

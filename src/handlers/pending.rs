//! Staging tables under `/pending/{table}` where `table` is `prepaid`,
//! `nullspeed-regular` or `nullspeed-cafe`.

use crate::error::{AppError, AppResult};
use crate::handlers::require_manager;
use crate::models::*;
use crate::services::{AuthService, LifecycleService, PendingCardService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::{Value, json};

fn parse_table(raw: &str) -> AppResult<PendingTable> {
    raw.parse()
}

#[utoipa::path(
    get,
    path = "/pending/{table}",
    tag = "pending",
    params(
        ("table" = PendingTable, Path, description = "Staging table"),
        PaginationParams
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "One page of pending cards, newest first"),
        (status = 404, description = "Unknown table")
    )
)]
pub async fn list_pending(
    pending_service: web::Data<PendingCardService>,
    path: web::Path<String>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let result = async {
        let table = parse_table(&path)?;
        pending_service.list(table, &query).await
    }
    .await;
    match result {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/pending/{table}/search",
    tag = "pending",
    params(
        ("table" = PendingTable, Path, description = "Staging table"),
        SearchQuery
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Up to 10 matching pending cards"),
        (status = 404, description = "Unknown table")
    )
)]
pub async fn search_pending(
    pending_service: web::Data<PendingCardService>,
    path: web::Path<String>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let result = async {
        let table = parse_table(&path)?;
        pending_service.search(table, query.keyword()).await
    }
    .await;
    match result {
        Ok(rows) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rows
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/pending/{table}/{id}",
    tag = "pending",
    params(
        ("table" = PendingTable, Path, description = "Staging table"),
        ("id" = i64, Path, description = "Pending card id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pending card"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_pending(
    pending_service: web::Data<PendingCardService>,
    path: web::Path<(String, i64)>,
) -> Result<HttpResponse> {
    let (raw_table, id) = path.into_inner();
    let result = async {
        let table = parse_table(&raw_table)?;
        pending_service.get(table, id).await
    }
    .await;
    match result {
        Ok(record) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": record
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/pending/{table}",
    tag = "pending",
    params(("table" = PendingTable, Path, description = "Staging table")),
    request_body(
        content = NullSpeedForm,
        description = "NullSpeedForm for the null-speed tables, PrepaidCardForm for `prepaid`"
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Pending card created"),
        (status = 400, description = "Invalid form"),
        (status = 409, description = "userlogin already exists")
    )
)]
pub async fn create_pending(
    auth_service: web::Data<AuthService>,
    pending_service: web::Data<PendingCardService>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse> {
    let result = async {
        let table = parse_table(&path)?;
        require_manager(&auth_service, &req).await?;
        let record = pending_service.create(table, body.into_inner()).await?;
        Ok::<_, AppError>((table, record))
    }
    .await;
    match result {
        Ok((table, record)) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": record,
            "message": format!("{} created", table.label())
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/pending/{table}/{id}",
    tag = "pending",
    params(
        ("table" = PendingTable, Path, description = "Staging table"),
        ("id" = i64, Path, description = "Pending card id")
    ),
    request_body(
        content = NullSpeedForm,
        description = "NullSpeedForm for the null-speed tables, PrepaidCardForm for `prepaid`"
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pending card updated"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_pending(
    auth_service: web::Data<AuthService>,
    pending_service: web::Data<PendingCardService>,
    req: HttpRequest,
    path: web::Path<(String, i64)>,
    body: web::Json<Value>,
) -> Result<HttpResponse> {
    let (raw_table, id) = path.into_inner();
    let result = async {
        let table = parse_table(&raw_table)?;
        require_manager(&auth_service, &req).await?;
        let record = pending_service.update(table, id, body.into_inner()).await?;
        Ok::<_, AppError>((table, record))
    }
    .await;
    match result {
        Ok((table, record)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": record,
            "message": format!("{} updated", table.label())
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/pending/{table}/{id}",
    tag = "pending",
    params(
        ("table" = PendingTable, Path, description = "Staging table"),
        ("id" = i64, Path, description = "Pending card id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Rows removed; zero when the id is unknown", body = AffectedRows)
    )
)]
pub async fn delete_pending(
    auth_service: web::Data<AuthService>,
    pending_service: web::Data<PendingCardService>,
    req: HttpRequest,
    path: web::Path<(String, i64)>,
) -> Result<HttpResponse> {
    let (raw_table, id) = path.into_inner();
    let result = async {
        let table = parse_table(&raw_table)?;
        require_manager(&auth_service, &req).await?;
        let affected = pending_service.delete(table, id).await?;
        Ok::<_, AppError>((table, affected))
    }
    .await;
    match result {
        Ok((table, affected)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": affected,
            "message": format!("{} with id={id} has been deleted.", table.label())
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/pending/{table}/{id}/activate",
    tag = "pending",
    params(
        ("table" = PendingTable, Path, description = "Staging table"),
        ("id" = i64, Path, description = "Pending card id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Card moved to AuthTable", body = ActivationOutcome),
        (status = 400, description = "Card has no userlogin or the package has no valid billperiod"),
        (status = 404, description = "Card or package not found"),
        (status = 409, description = "A subscriber with this userlogin already exists")
    )
)]
pub async fn activate_pending(
    auth_service: web::Data<AuthService>,
    lifecycle_service: web::Data<LifecycleService>,
    req: HttpRequest,
    path: web::Path<(String, i64)>,
) -> Result<HttpResponse> {
    let (raw_table, id) = path.into_inner();
    let result = async {
        let table = parse_table(&raw_table)?;
        require_manager(&auth_service, &req).await?;
        lifecycle_service.activate(table, id).await
    }
    .await;
    match result {
        Ok(outcome) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": outcome.message(),
            "data": outcome
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn pending_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pending/{table}")
            .route("", web::get().to(list_pending))
            .route("", web::post().to(create_pending))
            .route("/search", web::get().to(search_pending))
            .route("/{id}", web::get().to(get_pending))
            .route("/{id}", web::put().to(update_pending))
            .route("/{id}", web::delete().to(delete_pending))
            .route("/{id}/activate", web::post().to(activate_pending)),
    );
}

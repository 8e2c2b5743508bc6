use crate::handlers::require_manager;
use crate::models::*;
use crate::services::{AuthService, PackageService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/packages",
    tag = "packages",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "One page of packages")
    )
)]
pub async fn list_packages(
    package_service: web::Data<PackageService>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match package_service.list(&query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/packages/search",
    tag = "packages",
    params(SearchQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Up to 10 matching packages", body = [Package])
    )
)]
pub async fn search_packages(
    package_service: web::Data<PackageService>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    match package_service.search(query.keyword()).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rows
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/packages/{type_id}",
    tag = "packages",
    params(("type_id" = String, Path, description = "Package TypeID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Package", body = Package),
        (status = 404, description = "Package not found")
    )
)]
pub async fn get_package(
    package_service: web::Data<PackageService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match package_service.get_by_type_id(&path).await {
        Ok(package) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": package
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/packages",
    tag = "packages",
    request_body = PackageForm,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Package created", body = Package),
        (status = 409, description = "TypeID already exists")
    )
)]
pub async fn create_package(
    auth_service: web::Data<AuthService>,
    package_service: web::Data<PackageService>,
    req: HttpRequest,
    form: web::Json<PackageForm>,
) -> Result<HttpResponse> {
    let result = async {
        require_manager(&auth_service, &req).await?;
        package_service.create(form.into_inner()).await
    }
    .await;
    match result {
        Ok(package) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": package,
            "message": "Package created"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/packages/{type_id}",
    tag = "packages",
    params(("type_id" = String, Path, description = "Package TypeID")),
    request_body = PackageForm,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Package updated", body = Package),
        (status = 404, description = "Package not found")
    )
)]
pub async fn update_package(
    auth_service: web::Data<AuthService>,
    package_service: web::Data<PackageService>,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Json<PackageForm>,
) -> Result<HttpResponse> {
    let result = async {
        require_manager(&auth_service, &req).await?;
        package_service.update(&path, form.into_inner()).await
    }
    .await;
    match result {
        Ok(package) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": package,
            "message": "Package updated"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/packages/{type_id}",
    tag = "packages",
    params(("type_id" = String, Path, description = "Package TypeID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Rows removed; zero when the TypeID is unknown", body = AffectedRows)
    )
)]
pub async fn delete_package(
    auth_service: web::Data<AuthService>,
    package_service: web::Data<PackageService>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let result = async {
        require_manager(&auth_service, &req).await?;
        package_service.delete(&path).await
    }
    .await;
    match result {
        Ok(affected) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": affected,
            "message": format!("Package {} has been deleted.", path.as_str())
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn package_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/packages")
            .route("", web::get().to(list_packages))
            .route("", web::post().to(create_package))
            .route("/search", web::get().to(search_packages))
            .route("/{type_id}", web::get().to(get_package))
            .route("/{type_id}", web::put().to(update_package))
            .route("/{type_id}", web::delete().to(delete_package)),
    );
}

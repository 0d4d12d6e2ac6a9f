//! Route handlers.
//!
//! - `GET /` list, `POST /` insert, `DELETE /` delete one by matcher
//! - `PUT /{id}` replace, `DELETE /{id}` delete by id
//! - `GET /health`

use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse};
use vaultora_core::error::CoreError;
use vaultora_core::services::CredentialService;
use vaultora_core::types::{CredentialMatcher, CredentialRecord};

use crate::error::ApiError;

type Service = web::Data<CredentialService>;

/// Register every route on the service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // /health before /{id}, resources match in registration order
    cfg.service(
        web::resource("/health")
            .route(web::get().to(health))
            .route(web::route().method(Method::OPTIONS).to(preflight)),
    )
    .service(
        web::resource("/")
            .route(web::get().to(list))
            .route(web::post().to(create))
            .route(web::delete().to(delete_matching))
            .route(web::route().method(Method::OPTIONS).to(preflight)),
    )
    .service(
        web::resource("/{id}")
            .route(web::put().to(update))
            .route(web::delete().to(delete_by_id))
            .route(web::route().method(Method::OPTIONS).to(preflight)),
    );
}

/// Malformed or mistyped JSON bodies become 400 with the usual error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError(CoreError::ValidationError(err.to_string())).into()
    })
}

async fn list(service: Service) -> Result<HttpResponse, ApiError> {
    let records = service.list_all().await?;
    Ok(HttpResponse::Ok().json(records))
}

async fn create(
    service: Service,
    body: web::Json<CredentialRecord>,
) -> Result<HttpResponse, ApiError> {
    let ack = service.create(&body).await?;
    Ok(HttpResponse::Ok().json(ack))
}

async fn delete_matching(
    service: Service,
    body: web::Json<CredentialMatcher>,
) -> Result<HttpResponse, ApiError> {
    let ack = service.delete_one(&body).await?;
    Ok(HttpResponse::Ok().json(ack))
}

async fn update(
    service: Service,
    path: web::Path<String>,
    body: web::Json<CredentialRecord>,
) -> Result<HttpResponse, ApiError> {
    let ack = service.update(&path, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

async fn delete_by_id(service: Service, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let ack = service.delete_by_id(&path).await?;
    Ok(HttpResponse::Ok().json(ack))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn preflight() -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header(("Access-Control-Max-Age", "86400"))
        .finish()
}

/// Unmatched paths: preflight still succeeds, everything else is 404.
pub async fn fallback(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return preflight().await;
    }
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "error": { "code": "RouteNotFound", "details": req.path() },
    }))
}

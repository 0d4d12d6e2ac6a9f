//! Vaultora credential service.
//!
//! A single `passwords` collection behind a small JSON API, with permissive
//! CORS so browser clients on any origin can use it.

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod repository;

use actix_service::Service as _;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, App};
use tracing::Instrument;
use vaultora_core::services::CredentialService;

pub use config::ServerConfig;
pub use error::ApiError;
pub use repository::DatabaseCredentialRepository;

const REQUEST_ID_HEADER: &str = "x-request-id";

fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add((
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, DELETE, OPTIONS",
        ))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}

/// Build the application with routes, CORS headers and request tracing.
pub fn create_app(
    service: web::Data<CredentialService>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(service)
        .app_data(handlers::json_config())
        .configure(handlers::configure)
        .default_service(web::to(handlers::fallback))
        .wrap(cors_headers())
        .wrap_fn(|req, srv| {
            let request_id = uuid::Uuid::new_v4().to_string();
            let span = tracing::info_span!(
                "http_request",
                method = %req.method(),
                path = %req.path(),
                request_id = %request_id,
            );
            let fut = span.in_scope(|| srv.call(req));

            async move {
                let mut res = fut.await?;
                tracing::info!(status = res.status().as_u16(), "request completed");
                if let Ok(value) = HeaderValue::from_str(&request_id) {
                    res.headers_mut()
                        .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                }
                Ok(res)
            }
            .instrument(span)
        })
}

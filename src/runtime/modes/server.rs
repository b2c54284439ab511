//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::services::{AppStartTime, health_routes, portal_routes};
use crate::config::CorsConfig;
use crate::runtime::lifetime;

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    if cors_config.enabled && cors_config.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Set allowed_origins explicitly or use '[\"*\"]' for any origin."
        );
    }
}

/// Build CORS middleware from configuration
fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    // 未启用时沿用浏览器同源策略
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_header("Content-Type")
        .allowed_header("Authorization")
        .allowed_header("Accept")
        .max_age(cors_config.max_age as usize);

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Run the HTTP server
///
/// 1. Prepares server components (storage, ad counters, lead service)
/// 2. Configures and starts the HTTP server
/// 3. Listens for graceful shutdown signals and flushes pending ad counts
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let storage = startup.storage.clone();
    let counters = startup.counters.clone();
    let lead_service = startup.lead_service.clone();

    let config = crate::config::get_config();
    let cors_config = config.cors.clone();
    let leads_config = config.leads.clone();
    validate_cors_config(&cors_config);

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&cors_config);
        let leads_config = leads_config.clone();

        App::new()
            .wrap(cors)
            .wrap(Compress::default())
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(counters.clone()))
            .app_data(web::Data::from(lead_service.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add(("Keep-Alive", "timeout=30, max=1000"))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .configure(health_routes)
            .configure(move |cfg| portal_routes(cfg, &leads_config))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    tokio::select! {
        res = server => {
            res?;
            // 服务器自行退出时也要刷写剩余计数
            lifetime::shutdown::flush_on_shutdown(&startup.counters).await;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&startup.counters) => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::HttpResponse;
    use actix_web::http::{Method, StatusCode, header, header::HeaderMap};
    use actix_web::test::{self, TestRequest};

    const PORTAL_ORIGIN: &str = "https://portal.example.com";

    fn cors(enabled: bool, origins: &[&str]) -> CorsConfig {
        CorsConfig {
            enabled,
            allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
            max_age: 60,
        }
    }

    async fn preflight(cfg: &CorsConfig, origin: &str) -> (StatusCode, HeaderMap) {
        let app = test::init_service(
            App::new()
                .wrap(build_cors_middleware(cfg))
                .route("/br/api/news", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let req = TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/br/api/news")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        (resp.status(), resp.headers().clone())
    }

    fn allow_origin(headers: &HeaderMap) -> Option<String> {
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    #[actix_rt::test]
    async fn test_listed_origin_passes_preflight() {
        let (status, headers) = preflight(&cors(true, &[PORTAL_ORIGIN]), PORTAL_ORIGIN).await;
        assert!(status.is_success());
        assert_eq!(allow_origin(&headers).as_deref(), Some(PORTAL_ORIGIN));
        assert_eq!(
            headers
                .get(header::ACCESS_CONTROL_MAX_AGE)
                .and_then(|v| v.to_str().ok()),
            Some("60")
        );
    }

    #[actix_rt::test]
    async fn test_unlisted_origin_is_refused() {
        let (status, headers) =
            preflight(&cors(true, &[PORTAL_ORIGIN]), "https://evil.example.net").await;
        assert!(!status.is_success());
        assert!(allow_origin(&headers).is_none());
    }

    #[actix_rt::test]
    async fn test_wildcard_allows_any_origin() {
        let (status, headers) = preflight(&cors(true, &["*"]), "https://anywhere.example.org").await;
        assert!(status.is_success());
        assert!(allow_origin(&headers).is_some());
    }

    #[actix_rt::test]
    async fn test_disabled_cors_ignores_configured_origins() {
        let (_, headers) = preflight(&cors(false, &["*"]), PORTAL_ORIGIN).await;
        assert!(allow_origin(&headers).is_none());
    }
}

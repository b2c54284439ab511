use actix_web::{HttpResponse, http::StatusCode, web};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, trace};

use crate::api::error_code::ErrorCode;
use crate::api::helpers::json_response;
use crate::storage::SeaOrmStorage;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct StorageCheck {
    pub status: &'static str,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime: u64,
    pub storage: StorageCheck,
    pub response_time_ms: u64,
}

/// GET /health
///
/// 不在区域作用域内，直接探测存储。
pub async fn health_check(
    storage: web::Data<Arc<SeaOrmStorage>>,
    app_start_time: web::Data<AppStartTime>,
) -> HttpResponse {
    let start_time = Instant::now();
    trace!("Received health check request");

    let backend = storage.backend_name().to_string();
    let storage_check = match tokio::time::timeout(Duration::from_secs(5), storage.ping()).await {
        Ok(Ok(())) => StorageCheck {
            status: "healthy",
            backend,
            error: None,
        },
        Ok(Err(e)) => {
            error!("Storage health check failed: {}", e);
            StorageCheck {
                status: "unhealthy",
                backend,
                error: Some(format!("database error: {}", e)),
            }
        }
        Err(_) => {
            error!("Storage health check timeout");
            StorageCheck {
                status: "unhealthy",
                backend,
                error: Some("timeout".to_string()),
            }
        }
    };

    let now = chrono::Utc::now();
    let is_healthy = storage_check.status == "healthy";
    let health = HealthResponse {
        status: storage_check.status,
        timestamp: now.to_rfc3339(),
        uptime: (now - app_start_time.start_datetime).num_seconds().max(0) as u64,
        storage: storage_check,
        response_time_ms: start_time.elapsed().as_millis() as u64,
    };

    if is_healthy {
        json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(health))
    } else {
        json_response(
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::ServiceUnavailable,
            "Service Unavailable",
            Some(health),
        )
    }
}

use crate::ads::AdCounterManager;
use crate::config::get_config;
use crate::services::LeadService;
use crate::storage::{SeaOrmStorage, StorageFactory};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub counters: AdCounterManager,
    pub lead_service: Arc<LeadService>,
}

/// 准备服务器启动的上下文
/// 包括存储、广告计数和留资服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let config = get_config();

    // 广告计数缓冲，后台定时刷写
    let counters = AdCounterManager::from_config(storage.as_counter_sink(), &config.ads);
    let counters_for_task = counters.clone();
    tokio::spawn(async move {
        counters_for_task.start_background_task().await;
    });
    debug!(
        "AdCounterManager initialized with {} seconds and {} max counts before flush",
        config.ads.flush_interval_secs, config.ads.max_before_flush
    );

    let lead_service = Arc::new(LeadService::new(storage.as_lead_store(), &config.leads));

    if config.admin.token.is_empty() {
        warn!("Admin API is disabled (admin.token not set)");
    } else {
        info!("Admin API available at /{{region}}/admin/v1");
    }

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        counters,
        lead_service,
    })
}

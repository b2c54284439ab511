use std::time::Duration;
use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::ads::AdCounterManager;

/// 关闭超时时间（秒）
const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// 等待 Ctrl+C，然后把缓冲中的广告计数刷到数据库
pub async fn listen_for_shutdown(counters: &AdCounterManager) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, flushing ad counters...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    flush_on_shutdown(counters).await;
}

/// 超时内完成最后一次刷写；失败时计数仍留在内存中并随进程退出丢失
pub async fn flush_on_shutdown(counters: &AdCounterManager) {
    match timeout(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS), counters.flush()).await {
        Ok(()) => {
            let remaining = counters.buffer_size();
            if remaining > 0 {
                error!("{} ad counts could not be flushed on shutdown", remaining);
            } else {
                info!("AdCounterManager flushed successfully");
            }
        }
        Err(_) => {
            error!(
                "Ad counter flush timed out after {} seconds",
                SHUTDOWN_TIMEOUT_SECS
            );
        }
    }
}

//! 广告计数管理器
//!
//! 负责收集曝光与点击计数并批量刷写：
//! - 无锁计数缓冲（DashMap）
//! - 定时刷盘 + 阈值触发刷盘
//! - 刷盘失败时数据回填缓冲区，计数只增不减
//! - 同一挂载 id 的重复曝光在 TTL 内去重

use std::fmt;
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use async_trait::async_trait;
use dashmap::DashMap;
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::config::AdsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKind {
    View,
    Click,
}

/// 计数键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdCounter {
    pub ad_id: i32,
    pub kind: CounterKind,
}

impl AdCounter {
    pub fn view(ad_id: i32) -> Self {
        Self {
            ad_id,
            kind: CounterKind::View,
        }
    }

    pub fn click(ad_id: i32) -> Self {
        Self {
            ad_id,
            kind: CounterKind::Click,
        }
    }
}

/// 一次广告位挂载的标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MountId(String);

impl MountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MountId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for MountId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 计数落盘目标
#[async_trait]
pub trait CounterSink: Send + Sync {
    async fn flush_counters(&self, updates: Vec<(AdCounter, u64)>) -> anyhow::Result<()>;
}

/// 广告遥测
///
/// 返回 `()`：任何失败都在实现内部记录并吞掉，调用方无需也无法等待。
pub trait AdTelemetry: Send + Sync {
    fn view(&self, ad_id: i32, mount: &MountId);
    fn click(&self, ad_id: i32);
}

/// 计数缓冲区
struct CounterBuffer {
    data: DashMap<AdCounter, u64>,
    /// 缓冲区中的总计数（用于阈值判断）
    total: AtomicU64,
    /// 刷盘锁，防止并发刷盘
    flush_lock: Mutex<()>,
    /// 是否已有阈值刷盘任务待处理
    flush_pending: AtomicBool,
}

impl CounterBuffer {
    fn new() -> Self {
        Self {
            data: DashMap::new(),
            total: AtomicU64::new(0),
            flush_lock: Mutex::new(()),
            flush_pending: AtomicBool::new(false),
        }
    }

    fn increment(&self, counter: AdCounter) -> u64 {
        *self.data.entry(counter).or_insert(0) += 1;
        self.total.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// 取出快照中的所有键（逐个 remove，不影响窗口期新增）
    fn drain(&self) -> Vec<(AdCounter, u64)> {
        let keys: Vec<AdCounter> = self.data.iter().map(|r| *r.key()).collect();

        let mut updates = Vec::with_capacity(keys.len());
        let mut removed = 0;
        for key in keys {
            if let Some((k, v)) = self.data.remove(&key) {
                removed += v;
                updates.push((k, v));
            }
        }

        if removed > 0 {
            self.total
                .fetch_update(Ordering::Release, Ordering::Relaxed, |current| {
                    Some(current.saturating_sub(removed))
                })
                .ok();
        }

        updates
    }

    /// 刷盘失败时回填
    fn restore(&self, updates: Vec<(AdCounter, u64)>) {
        let mut restored = 0;
        for (k, v) in updates {
            *self.data.entry(k).or_insert(0) += v;
            restored += v;
        }
        self.total.fetch_add(restored, Ordering::Relaxed);
    }

    fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

/// 广告计数管理器
#[derive(Clone)]
pub struct AdCounterManager {
    buffer: Arc<CounterBuffer>,
    sink: Arc<dyn CounterSink>,
    flush_interval: Duration,
    max_before_flush: u64,
    /// 已记录曝光的 (ad_id, mount) 集合
    mounts: Cache<(i32, MountId), ()>,
}

impl AdCounterManager {
    pub fn new(
        sink: Arc<dyn CounterSink>,
        flush_interval: Duration,
        max_before_flush: usize,
        mount_ttl: Duration,
    ) -> Self {
        Self {
            buffer: Arc::new(CounterBuffer::new()),
            sink,
            flush_interval,
            max_before_flush: max_before_flush.max(1) as u64,
            mounts: Cache::builder()
                .time_to_live(mount_ttl)
                .max_capacity(100_000)
                .build(),
        }
    }

    pub fn from_config(sink: Arc<dyn CounterSink>, config: &AdsConfig) -> Self {
        Self::new(
            sink,
            Duration::from_secs(config.flush_interval_secs),
            config.max_before_flush,
            Duration::from_secs(config.mount_ttl_secs),
        )
    }

    /// 记录曝光；同一挂载重复调用只计一次，返回本次是否计数
    pub fn record_view(&self, ad_id: i32, mount: &MountId) -> bool {
        let entry = self
            .mounts
            .entry((ad_id, mount.clone()))
            .or_insert(());
        if !entry.is_fresh() {
            trace!("AdCounterManager: view for ad {} mount {} already counted", ad_id, mount);
            return false;
        }
        self.increment(AdCounter::view(ad_id));
        true
    }

    pub fn record_click(&self, ad_id: i32) {
        self.increment(AdCounter::click(ad_id));
    }

    fn increment(&self, counter: AdCounter) {
        let current = self.buffer.increment(counter);
        trace!("AdCounterManager: buffer size {}", current);

        if current >= self.max_before_flush
            && self
                .buffer
                .flush_pending
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::Relaxed)
                .is_ok()
        {
            let buffer = Arc::clone(&self.buffer);
            let sink = Arc::clone(&self.sink);
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move {
                        if let Ok(_guard) = buffer.flush_lock.try_lock() {
                            Self::flush_buffer(&buffer, &sink).await;
                        } else {
                            trace!("AdCounterManager: flush already in progress, skipping");
                        }
                        buffer.flush_pending.store(false, Ordering::Release);
                    });
                }
                Err(_) => {
                    // 无运行时（如同步上下文），留给定时任务
                    buffer.flush_pending.store(false, Ordering::Release);
                }
            }
        }
    }

    /// 后台定时刷盘
    pub async fn start_background_task(&self) {
        loop {
            sleep(self.flush_interval).await;

            debug!("AdCounterManager: Triggering scheduled flush");
            if let Ok(_guard) = self.buffer.flush_lock.try_lock() {
                Self::flush_buffer(&self.buffer, &self.sink).await;
            } else {
                trace!("AdCounterManager: flush already in progress, skipping scheduled flush");
            }
        }
    }

    /// 手动刷盘（等待进行中的刷盘完成）
    pub async fn flush(&self) {
        debug!("AdCounterManager: Manual flush triggered");
        let _guard = self.buffer.flush_lock.lock().await;
        Self::flush_buffer(&self.buffer, &self.sink).await;
    }

    async fn flush_buffer(buffer: &CounterBuffer, sink: &Arc<dyn CounterSink>) {
        let updates = buffer.drain();
        if updates.is_empty() {
            trace!("AdCounterManager: Nothing to flush");
            return;
        }

        let count = updates.len();
        match sink.flush_counters(updates.clone()).await {
            Ok(()) => {
                debug!("AdCounterManager: Flushed {} counters", count);
            }
            Err(e) => {
                buffer.restore(updates);
                warn!(
                    "AdCounterManager: flush_counters failed: {}, {} counters restored to buffer",
                    e, count
                );
            }
        }
    }

    /// 缓冲区中尚未落盘的总计数
    pub fn buffer_size(&self) -> u64 {
        self.buffer.total()
    }
}

impl AdTelemetry for AdCounterManager {
    fn view(&self, ad_id: i32, mount: &MountId) {
        self.record_view(ad_id, mount);
    }

    fn click(&self, ad_id: i32) {
        self.record_click(ad_id);
    }
}

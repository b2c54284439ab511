//! 客户端导航状态
//!
//! 持有当前路径、区域与历史记录。区域总是从 URL 重新推导；
//! `change_region` 在目标即当前区域时不做任何事，也不追加历史。
//! 每次区域变化都会递增 generation，旧区域发起的请求结果据此丢弃。

use tracing::debug;

use super::{Region, resolve, rewrite};
use crate::context::RegionContext;

/// 发起异步读取时记录的区域快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub region: Region,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct RegionNavigator {
    region: Region,
    path: String,
    history: Vec<String>,
    generation: u64,
}

impl RegionNavigator {
    pub fn new(initial_path: impl Into<String>) -> Self {
        let path = initial_path.into();
        Self {
            region: resolve(&path),
            history: vec![path.clone()],
            path,
            generation: 0,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn context(&self) -> RegionContext {
        RegionContext::new(self.region)
    }

    /// 普通导航：记录历史并从新 URL 重新推导区域
    pub fn navigate(&mut self, path: impl Into<String>) -> Region {
        let path = path.into();
        let region = resolve(&path);
        self.history.push(path.clone());
        self.path = path;
        self.set_region(region);
        region
    }

    /// 切换区域，返回新路径；目标即当前区域时为 no-op 并返回 None
    pub fn change_region(&mut self, target: Region) -> Option<&str> {
        if target == self.region {
            debug!("Region {} already active, ignoring change request", target);
            return None;
        }

        let next = rewrite(&self.path, target);
        self.history.push(next.clone());
        self.path = next;
        self.set_region(target);
        Some(&self.path)
    }

    fn set_region(&mut self, region: Region) {
        if region != self.region {
            debug!("Region changed: {} -> {}", self.region, region);
            self.region = region;
            self.generation += 1;
        }
    }

    /// 为即将发起的读取生成凭据
    pub fn ticket(&self) -> FetchTicket {
        FetchTicket {
            region: self.region,
            generation: self.generation,
        }
    }

    /// 接收读取结果；发起后区域已变化的结果被丢弃
    pub fn accept<T>(&self, ticket: FetchTicket, value: T) -> Option<T> {
        if ticket.generation == self.generation && ticket.region == self.region {
            Some(value)
        } else {
            debug!(
                "Discarding stale result fetched for {} (current region {})",
                ticket.region, self.region
            );
            None
        }
    }
}

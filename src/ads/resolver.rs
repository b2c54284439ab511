//! 广告解析
//!
//! 按 (区域, 版位) 取第一个投放中的广告。查找失败只记录日志，
//! 按"无结果"处理：有兜底内容则展示兜底，否则不展示任何东西。

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::errors::Result;
use crate::region::Region;

use migration::entities::ad;

/// 投放中广告的查询来源
#[async_trait]
pub trait AdSource: Send + Sync {
    async fn find_active(&self, region: Region, placement: &str) -> Result<Option<ad::Model>>;
}

/// 对外展示的广告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdView {
    pub id: i32,
    pub placement: String,
    pub title: String,
    pub image_url: String,
    pub link_url: String,
    /// 经过计数的跳转地址
    pub click_path: String,
}

impl AdView {
    pub fn from_model(model: ad::Model, region: Region) -> Self {
        Self {
            click_path: format!("/{}/ads/{}/click", region.code(), model.id),
            id: model.id,
            placement: model.placement,
            title: model.title,
            image_url: model.image_url,
            link_url: model.link_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    Ad(AdView),
    Fallback(String),
    Empty,
}

fn fallback_or_empty(fallback: Option<&str>) -> SlotOutcome {
    match fallback {
        Some(content) if !content.trim().is_empty() => SlotOutcome::Fallback(content.to_string()),
        _ => SlotOutcome::Empty,
    }
}

/// 解析一个广告位
pub async fn resolve_slot(
    source: &dyn AdSource,
    region: Region,
    placement: &str,
    fallback: Option<&str>,
) -> SlotOutcome {
    match source.find_active(region, placement).await {
        Ok(Some(model)) => SlotOutcome::Ad(AdView::from_model(model, region)),
        Ok(None) => fallback_or_empty(fallback),
        Err(e) => {
            warn!(
                "Ad lookup failed for {}/{}: {}, treating as no result",
                region, placement, e
            );
            fallback_or_empty(fallback)
        }
    }
}

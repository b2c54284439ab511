//! 广告位状态机
//!
//! `Loading → ShowingAd | ShowingFallback | Empty`
//!
//! 进入 `ShowingAd` 时通过遥测记录一次曝光，每次挂载只记录一次；
//! `render()` 是纯函数，重复渲染不产生任何副作用。
//! 区域或版位变化会回到 `Loading` 并视为新的挂载，
//! 变化前发起的加载结果会被丢弃。

use serde::Serialize;
use tracing::debug;

use super::counter::{AdTelemetry, MountId};
use super::resolver::{AdSource, AdView, SlotOutcome, resolve_slot};
use crate::region::Region;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    Loading,
    ShowingAd(AdView),
    ShowingFallback(String),
    Empty,
}

/// 渲染结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotView {
    Loading,
    Ad { ad: AdView },
    Fallback { content: String },
    Empty,
}

/// 加载开始时的快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub region: Region,
    pub placement: String,
    generation: u64,
}

#[derive(Debug)]
pub struct AdSlot {
    region: Region,
    placement: String,
    fallback: Option<String>,
    mount: MountId,
    state: SlotState,
    generation: u64,
    view_recorded: bool,
}

impl AdSlot {
    pub fn mount(region: Region, placement: impl Into<String>, fallback: Option<String>) -> Self {
        Self::with_mount_id(region, placement, fallback, MountId::new())
    }

    /// 使用调用方提供的挂载 id（HTTP 场景由前端生成）
    pub fn with_mount_id(
        region: Region,
        placement: impl Into<String>,
        fallback: Option<String>,
        mount: MountId,
    ) -> Self {
        Self {
            region,
            placement: placement.into(),
            fallback,
            mount,
            state: SlotState::Loading,
            generation: 0,
            view_recorded: false,
        }
    }

    pub fn state(&self) -> &SlotState {
        &self.state
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn placement(&self) -> &str {
        &self.placement
    }

    pub fn mount_id(&self) -> &MountId {
        &self.mount
    }

    pub fn render(&self) -> SlotView {
        match &self.state {
            SlotState::Loading => SlotView::Loading,
            SlotState::ShowingAd(ad) => SlotView::Ad { ad: ad.clone() },
            SlotState::ShowingFallback(content) => SlotView::Fallback {
                content: content.clone(),
            },
            SlotState::Empty => SlotView::Empty,
        }
    }

    pub fn set_region(&mut self, region: Region) {
        if region != self.region {
            self.region = region;
            self.remount();
        }
    }

    pub fn set_placement(&mut self, placement: impl Into<String>) {
        let placement = placement.into();
        if placement != self.placement {
            self.placement = placement;
            self.remount();
        }
    }

    fn remount(&mut self) {
        self.generation += 1;
        self.state = SlotState::Loading;
        self.mount = MountId::new();
        self.view_recorded = false;
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.state = SlotState::Loading;
        LoadTicket {
            region: self.region,
            placement: self.placement.clone(),
            generation: self.generation,
        }
    }

    /// 应用加载结果；区域或版位已变化时丢弃并返回 false
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        outcome: SlotOutcome,
        telemetry: &dyn AdTelemetry,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding ad result for {}/{} (slot now {}/{})",
                ticket.region, ticket.placement, self.region, self.placement
            );
            return false;
        }

        self.state = match outcome {
            SlotOutcome::Ad(ad) => SlotState::ShowingAd(ad),
            SlotOutcome::Fallback(content) => SlotState::ShowingFallback(content),
            SlotOutcome::Empty => SlotState::Empty,
        };

        if let SlotState::ShowingAd(ad) = &self.state
            && !self.view_recorded
        {
            telemetry.view(ad.id, &self.mount);
            self.view_recorded = true;
        }
        true
    }

    /// 完整加载一次
    pub async fn load(&mut self, source: &dyn AdSource, telemetry: &dyn AdTelemetry) -> bool {
        let ticket = self.begin_load();
        let outcome = resolve_slot(
            source,
            ticket.region,
            &ticket.placement,
            self.fallback.as_deref(),
        )
        .await;
        self.finish_load(ticket, outcome, telemetry)
    }

    /// 点击：计数不等待，返回跳转目标
    pub fn click(&self, telemetry: &dyn AdTelemetry) -> Option<&str> {
        match &self.state {
            SlotState::ShowingAd(ad) => {
                telemetry.click(ad.id);
                Some(&ad.link_url)
            }
            _ => None,
        }
    }
}

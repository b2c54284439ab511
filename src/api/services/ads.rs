//! 广告位与点击跳转

use std::sync::Arc;

use actix_web::{HttpResponse, http::header::LOCATION, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ads::{AdCounterManager, AdSlot, MountId, SlotView};
use crate::api::helpers::success_response;
use crate::context::RegionContext;
use crate::errors::Result;
use crate::storage::SeaOrmStorage;

use migration::entities::ad;

#[derive(Debug, Deserialize)]
pub struct PlacementPath {
    pub placement: String,
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    /// 兜底内容
    pub fallback: Option<String>,
    /// 前端为每次挂载生成的 id，缺省时视为新的挂载
    pub mount: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SlotResponse {
    pub mount: MountId,
    pub slot: SlotView,
}

/// GET /{region}/api/ads/{placement}
pub async fn get_slot(
    ctx: RegionContext,
    path: web::Path<PlacementPath>,
    query: web::Query<SlotQuery>,
    storage: web::Data<Arc<SeaOrmStorage>>,
    counters: web::Data<AdCounterManager>,
) -> HttpResponse {
    let SlotQuery { fallback, mount } = query.into_inner();
    let mount = mount
        .filter(|m| !m.trim().is_empty())
        .map(MountId::from)
        .unwrap_or_default();

    let mut slot = AdSlot::with_mount_id(ctx.region(), path.into_inner().placement, fallback, mount);
    let source: &SeaOrmStorage = &storage;
    slot.load(source, counters.get_ref()).await;

    success_response(SlotResponse {
        mount: slot.mount_id().clone(),
        slot: slot.render(),
    })
}

#[derive(Debug, Deserialize)]
pub struct ClickPath {
    pub id: i32,
}

/// GET /{region}/ads/{id}/click
///
/// 点击只写入缓冲区，不等待落盘。
pub async fn click(
    ctx: RegionContext,
    path: web::Path<ClickPath>,
    storage: web::Data<Arc<SeaOrmStorage>>,
    counters: web::Data<AdCounterManager>,
) -> Result<HttpResponse> {
    let ad = storage
        .scoped(ctx.region())
        .require::<ad::Entity>(path.id)
        .await?;

    counters.record_click(ad.id);
    debug!("Ad {} clicked in region {}", ad.id, ctx.region());

    Ok(HttpResponse::TemporaryRedirect()
        .insert_header((LOCATION, ad.link_url))
        .finish())
}

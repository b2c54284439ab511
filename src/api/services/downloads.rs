//! 留资下载与 newsletter 订阅

use std::sync::Arc;

use actix_governor::{Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_web::{HttpResponse, web};
use governor::middleware::NoOpMiddleware;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::helpers::success_response;
use crate::config::LeadsConfig;
use crate::context::RegionContext;
use crate::downloads::{AssetRef, GatedAsset};
use crate::errors::Result;
use crate::services::LeadService;
use crate::storage::ScopedRepository;
use crate::storage::SeaOrmStorage;

use migration::entities::{ebook, media_kit, technical_material};

/// 受控资产类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GatedKind {
    Ebooks,
    TechnicalMaterials,
    MediaKits,
}

#[derive(Debug, Deserialize)]
pub struct AssetPath {
    pub kind: GatedKind,
    pub id: i32,
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub email: String,
    /// 每次提交生成一次，重复提交共用同一结果
    pub submission_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsletterRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct NewsletterResponse {
    pub message: String,
}

/// 提交限流器：按连接 IP 计数
///
/// 配置非法（0 值）时退回默认限流参数。
pub fn lead_rate_limiter(config: &LeadsConfig) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let governor_config = GovernorConfigBuilder::default()
        .seconds_per_request(config.rate_limit_seconds)
        .burst_size(config.rate_limit_burst)
        .finish()
        .unwrap_or_else(|| {
            warn!(
                "Invalid lead rate limit ({}s, burst {}), using defaults",
                config.rate_limit_seconds, config.rate_limit_burst
            );
            GovernorConfig::default()
        });

    debug!(
        "Lead rate limiter created: 1 req/{}s, burst {}",
        config.rate_limit_seconds, config.rate_limit_burst
    );
    Governor::new(&governor_config)
}

/// 在当前区域内读取资产；其他区域的 id 视为不存在
pub async fn load_asset(repo: &ScopedRepository, kind: GatedKind, id: i32) -> Result<AssetRef> {
    let asset = match kind {
        GatedKind::Ebooks => repo.require::<ebook::Entity>(id).await?.asset_ref(),
        GatedKind::TechnicalMaterials => repo
            .require::<technical_material::Entity>(id)
            .await?
            .asset_ref(),
        GatedKind::MediaKits => repo.require::<media_kit::Entity>(id).await?.asset_ref(),
    };
    Ok(asset)
}

/// POST /{region}/api/downloads/{kind}/{id}
pub async fn request_download(
    ctx: RegionContext,
    path: web::Path<AssetPath>,
    body: web::Json<DownloadRequest>,
    storage: web::Data<Arc<SeaOrmStorage>>,
    leads: web::Data<LeadService>,
) -> Result<HttpResponse> {
    let repo = storage.scoped(ctx.region());
    let asset = load_asset(&repo, path.kind, path.id).await?;

    let grant = leads
        .request_download(ctx, asset, &body.email, body.submission_id.as_deref())
        .await?;
    Ok(success_response(grant))
}

/// POST /{region}/api/newsletter
pub async fn subscribe(
    ctx: RegionContext,
    body: web::Json<NewsletterRequest>,
    leads: web::Data<LeadService>,
) -> Result<HttpResponse> {
    leads.subscribe(ctx, &body.email).await?;
    Ok(success_response(NewsletterResponse {
        message: ctx.t("newsletter.success").to_string(),
    }))
}

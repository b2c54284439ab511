//! 管理接口：广告投放

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use tracing::info;

use crate::api::helpers::success_response;
use crate::api::types::{MessageResponse, Page};
use crate::context::RegionContext;
use crate::errors::{PortalError, Result};
use crate::storage::{ListQuery, SeaOrmStorage};
use crate::utils::validate_link;

use migration::entities::ad;

#[derive(Debug, Deserialize)]
pub struct IdPath {
    pub id: i32,
}

#[derive(Debug, Deserialize)]
pub struct NewAd {
    pub placement: String,
    pub title: String,
    pub image_url: String,
    pub link_url: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ToggleAd {
    pub active: bool,
}

impl NewAd {
    /// 校验并构造 ActiveModel；区域由仓储写入
    fn into_active_model(self) -> Result<ad::ActiveModel> {
        let placement = self.placement.trim().to_string();
        if placement.is_empty() {
            return Err(PortalError::validation("placement cannot be empty"));
        }
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(PortalError::validation("title cannot be empty"));
        }
        let image_url = validate_link(&self.image_url)
            .map_err(|e| PortalError::validation(format!("image_url: {}", e)))?;
        let link_url = validate_link(&self.link_url)
            .map_err(|e| PortalError::validation(format!("link_url: {}", e)))?;

        Ok(ad::ActiveModel {
            placement: Set(placement),
            title: Set(title),
            image_url: Set(image_url),
            link_url: Set(link_url),
            active: Set(self.active),
            view_count: Set(0),
            click_count: Set(0),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
    }
}

/// GET /{region}/admin/v1/ads
pub async fn list_ads(
    ctx: RegionContext,
    query: web::Query<ListQuery>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> Result<HttpResponse> {
    let repo = storage.scoped(ctx.region());
    let query = query.into_inner().clamped();
    let items = repo.list::<ad::Entity>(query).await?;
    let total = repo.count::<ad::Entity>().await?;
    Ok(success_response(Page {
        items,
        total,
        limit: query.limit,
        offset: query.offset,
    }))
}

/// POST /{region}/admin/v1/ads
pub async fn create_ad(
    ctx: RegionContext,
    body: web::Json<NewAd>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> Result<HttpResponse> {
    let model = body.into_inner().into_active_model()?;
    let created = storage.scoped(ctx.region()).create(model).await?;
    info!(
        "Ad {} created for placement '{}' in region {}",
        created.id,
        created.placement,
        ctx.region()
    );
    Ok(success_response(created))
}

/// PUT /{region}/admin/v1/ads/{id}/active
pub async fn toggle_ad(
    ctx: RegionContext,
    path: web::Path<IdPath>,
    body: web::Json<ToggleAd>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> Result<HttpResponse> {
    let model = ad::ActiveModel {
        active: Set(body.active),
        ..Default::default()
    };
    let updated = storage.scoped(ctx.region()).update(path.id, model).await?;
    info!(
        "Ad {} in region {} set active = {}",
        updated.id,
        ctx.region(),
        updated.active
    );
    Ok(success_response(updated))
}

/// DELETE /{region}/admin/v1/ads/{id}
pub async fn delete_ad(
    ctx: RegionContext,
    path: web::Path<IdPath>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> Result<HttpResponse> {
    storage
        .scoped(ctx.region())
        .delete::<ad::Entity>(path.id)
        .await?;
    info!("Ad {} deleted from region {}", path.id, ctx.region());
    Ok(success_response(MessageResponse {
        message: format!("Ad {} deleted", path.id),
    }))
}

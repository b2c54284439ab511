//! 管理接口：内容删除与区域迁移

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;

use crate::api::helpers::success_response;
use crate::api::services::content::{ContentKind, ItemPath, with_content_entity};
use crate::api::types::MessageResponse;
use crate::context::RegionContext;
use crate::errors::{PortalError, Result};
use crate::region::Region;
use crate::storage::SeaOrmStorage;

use migration::entities::{
    category, ebook, event, foundry, media_kit, news, supplier, technical_material,
};

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub target: String,
}

/// DELETE /{region}/admin/v1/content/{kind}/{id}
pub async fn delete_content(
    ctx: RegionContext,
    path: web::Path<ItemPath>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> Result<HttpResponse> {
    let repo = storage.scoped(ctx.region());
    with_content_entity!(path.kind, E => repo.delete::<E>(path.id).await)?;

    info!(
        "{:?} {} deleted from region {}",
        path.kind,
        path.id,
        ctx.region()
    );
    Ok(success_response(MessageResponse {
        message: format!("{} deleted", path.id),
    }))
}

/// POST /{region}/admin/v1/content/{kind}/{id}/region
pub async fn move_content(
    ctx: RegionContext,
    path: web::Path<ItemPath>,
    body: web::Json<MoveRequest>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> Result<HttpResponse> {
    let target = Region::from_code(&body.target).ok_or_else(|| {
        PortalError::unsupported_region(format!("Unsupported region: {}", body.target))
    })?;

    let repo = storage.scoped(ctx.region());
    with_content_entity!(path.kind, E => repo.reassign_region::<E>(path.id, target).await)?;

    Ok(success_response(MessageResponse {
        message: format!("{} moved to {}", path.id, target),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_request_parses() {
        let req: MoveRequest = serde_json::from_str(r#"{"target":"fr"}"#).unwrap();
        assert_eq!(Region::from_code(&req.target), Some(Region::Fr));
        assert_eq!(ContentKind::Events, serde_json::from_str("\"events\"").unwrap());
    }
}

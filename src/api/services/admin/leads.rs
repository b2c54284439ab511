//! 管理接口：留资查询、导出与删除

use std::sync::Arc;

use actix_web::{
    HttpResponse,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    web,
};
use serde::Deserialize;
use tracing::info;

use super::ads::IdPath;
use crate::api::helpers::{api_result, success_response};
use crate::api::types::MessageResponse;
use crate::context::RegionContext;
use crate::downloads::LeadSource;
use crate::errors::Result;
use crate::storage::{ListQuery, SeaOrmStorage};

use migration::entities::lead;

#[derive(Debug, Deserialize)]
pub struct LeadFilter {
    pub source: Option<LeadSource>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    ListQuery::default().limit
}

#[derive(Debug, Deserialize)]
pub struct ExportFilter {
    pub source: Option<LeadSource>,
}

/// GET /{region}/admin/v1/leads?source=&limit=&offset=
pub async fn list_leads(
    ctx: RegionContext,
    query: web::Query<LeadFilter>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> HttpResponse {
    let LeadFilter {
        source,
        limit,
        offset,
    } = query.into_inner();
    api_result(
        storage
            .list_leads(ctx.region(), source, ListQuery::new(limit, offset))
            .await,
    )
}

/// GET /{region}/admin/v1/leads/export?source=
pub async fn export_leads(
    ctx: RegionContext,
    query: web::Query<ExportFilter>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> Result<HttpResponse> {
    let mut buf = Vec::new();
    let count = storage
        .export_leads(ctx.region(), query.source, &mut buf)
        .await?;

    let filename = format!(
        "leads_{}_{}.csv",
        ctx.region(),
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    info!("Admin exported {} leads for region {}", count, ctx.region());

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/csv; charset=utf-8"))
        .insert_header((
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(buf))
}

/// DELETE /{region}/admin/v1/leads/{id}
pub async fn delete_lead(
    ctx: RegionContext,
    path: web::Path<IdPath>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> Result<HttpResponse> {
    storage
        .scoped(ctx.region())
        .delete::<lead::Entity>(path.id)
        .await?;
    info!("Lead {} deleted from region {}", path.id, ctx.region());
    Ok(success_response(MessageResponse {
        message: format!("Lead {} deleted", path.id),
    }))
}

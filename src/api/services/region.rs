//! 本地化表与区域切换

use std::collections::BTreeMap;

use actix_web::{HttpResponse, http::header::LOCATION, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::helpers::success_response;
use crate::context::RegionContext;
use crate::errors::{PortalError, Result};
use crate::i18n;
use crate::region::Region;
use crate::utils::is_site_path;

#[derive(Debug, Serialize)]
pub struct LocaleTable {
    pub region: Region,
    pub locale: &'static str,
    pub entries: BTreeMap<&'static str, &'static str>,
}

/// GET /{region}/api/i18n
pub async fn locale_table(ctx: RegionContext) -> HttpResponse {
    success_response(LocaleTable {
        region: ctx.region(),
        locale: ctx.locale(),
        entries: i18n::entries(ctx.region()),
    })
}

#[derive(Debug, Deserialize)]
pub struct SwitchPath {
    pub target: String,
}

#[derive(Debug, Deserialize)]
pub struct SwitchQuery {
    /// 当前页面路径（含查询串），缺省为当前区域首页
    pub path: Option<String>,
}

/// GET /{region}/switch/{target}?path=
///
/// 目标即当前区域时返回 204，不产生跳转。
pub async fn switch_region(
    ctx: RegionContext,
    path: web::Path<SwitchPath>,
    query: web::Query<SwitchQuery>,
) -> Result<HttpResponse> {
    let target = Region::from_code(&path.target).ok_or_else(|| {
        PortalError::unsupported_region(format!("Unsupported region: {}", path.target))
    })?;

    let current = query
        .path
        .as_deref()
        .filter(|p| is_site_path(p))
        .map(str::to_string)
        .unwrap_or_else(|| format!("/{}", ctx.region().code()));

    match ctx.change_region_path(&current, target) {
        None => Ok(HttpResponse::NoContent().finish()),
        Some(location) => {
            debug!("Switching region {} -> {}: {}", ctx.region(), target, location);
            Ok(HttpResponse::TemporaryRedirect()
                .insert_header((LOCATION, location))
                .finish())
        }
    }
}

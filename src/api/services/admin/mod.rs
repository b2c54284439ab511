//! Admin API 服务模块
//!
//! 所有端点都挂在 `/{region}/admin/v1` 下，受 `AdminAuth` 保护，
//! 并与公开接口一样只操作当前区域的数据。

mod ads;
mod content;
mod leads;

use actix_web::web;

use crate::api::middleware::AdminAuth;

pub use ads::{create_ad, delete_ad, list_ads, toggle_ad};
pub use content::{delete_content, move_content};
pub use leads::{delete_lead, export_leads, list_leads};

/// 管理路由 `/admin/v1`
///
/// 包含：
/// - GET/POST /ads，PUT /ads/{id}/active，DELETE /ads/{id}
/// - GET /leads，GET /leads/export，DELETE /leads/{id}
/// - DELETE /content/{kind}/{id}，POST /content/{kind}/{id}/region
pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/v1")
            .wrap(AdminAuth)
            .service(
                web::scope("/ads")
                    .route("", web::get().to(list_ads))
                    .route("", web::post().to(create_ad))
                    .route("/{id}/active", web::put().to(toggle_ad))
                    .route("/{id}", web::delete().to(delete_ad)),
            )
            .service(
                web::scope("/leads")
                    .route("", web::get().to(list_leads))
                    // 必须在 /{id} 之前
                    .route("/export", web::get().to(export_leads))
                    .route("/{id}", web::delete().to(delete_lead)),
            )
            .service(
                web::scope("/content")
                    .route("/{kind}/{id}", web::delete().to(delete_content))
                    .route("/{kind}/{id}/region", web::post().to(move_content)),
            ),
    );
}

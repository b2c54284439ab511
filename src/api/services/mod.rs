pub mod admin;
pub mod ads;
pub mod content;
pub mod downloads;
pub mod health;
pub mod region;

use actix_web::web;

use crate::api::middleware::RegionScope;
use crate::config::LeadsConfig;

pub use health::{AppStartTime, health_check};

/// 健康检查路由，不在区域作用域内
pub fn health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// 区域路由 `/{region}`
///
/// 包含：
/// - GET /api/i18n - 本地化表
/// - GET /api/ads/{placement} - 广告位
/// - POST /api/downloads/{kind}/{id} - 留资下载（限流）
/// - POST /api/newsletter - 订阅（限流）
/// - GET /api/{kind}, /api/{kind}/{id} - 内容列表与详情
/// - GET /busca - 搜索
/// - GET /ads/{id}/click - 广告点击跳转
/// - GET /switch/{target} - 切换区域
/// - /admin/v1/... - 管理接口
pub fn portal_routes(cfg: &mut web::ServiceConfig, leads: &LeadsConfig) {
    cfg.service(
        web::scope("/{region}")
            .wrap(RegionScope)
            .configure(admin::admin_routes)
            .service(
                web::scope("/api")
                    .route("/i18n", web::get().to(region::locale_table))
                    .route("/ads/{placement}", web::get().to(ads::get_slot))
                    .service(
                        web::scope("/downloads")
                            .wrap(downloads::lead_rate_limiter(leads))
                            .route("/{kind}/{id}", web::post().to(downloads::request_download)),
                    )
                    .service(
                        web::resource("/newsletter")
                            .wrap(downloads::lead_rate_limiter(leads))
                            .route(web::post().to(downloads::subscribe)),
                    )
                    // 通配路由放在最后
                    .route("/{kind}", web::get().to(content::list_content))
                    .route("/{kind}/{id}", web::get().to(content::get_content)),
            )
            .route("/busca", web::get().to(content::search))
            .route("/ads/{id}/click", web::get().to(ads::click))
            .route("/switch/{target}", web::get().to(region::switch_region)),
    );
}

//! 广告位 HTTP 集成测试

mod common;

use actix_web::http::{StatusCode, header::LOCATION};
use actix_web::test::{self, TestRequest};
use actix_web::App;
use sea_orm::EntityTrait;
use serde_json::Value;

use migration::entities::ad;
use regionportal::api::services::portal_routes;
use regionportal::config::LeadsConfig;

#[actix_rt::test]
async fn test_empty_placement_shows_fallback() {
    let env = common::setup().await;
    let app = test::init_service(
        App::new()
            .configure(|cfg| env.configure(cfg))
            .configure(|cfg| portal_routes(cfg, &LeadsConfig::default())),
    )
    .await;

    let req = TestRequest::get()
        .uri("/mx/api/ads/sidebar?fallback=Anuncie%20aqui")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["slot"]["state"], "fallback");
    assert_eq!(body["data"]["slot"]["content"], "Anuncie aqui");

    let req = TestRequest::get().uri("/mx/api/ads/sidebar").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["slot"]["state"], "empty");
}

#[actix_rt::test]
async fn test_ad_from_other_region_is_not_served() {
    let env = common::setup().await;
    env.insert_ad("br", "header", true).await;
    env.insert_ad("mx", "header", false).await;

    let app = test::init_service(
        App::new()
            .configure(|cfg| env.configure(cfg))
            .configure(|cfg| portal_routes(cfg, &LeadsConfig::default())),
    )
    .await;

    let req = TestRequest::get().uri("/mx/api/ads/header").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["slot"]["state"], "empty");

    let req = TestRequest::get().uri("/br/api/ads/header").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["slot"]["state"], "ad");
}

#[actix_rt::test]
async fn test_view_counted_once_per_mount() {
    let env = common::setup().await;
    let banner = env.insert_ad("fr", "header", true).await;

    let app = test::init_service(
        App::new()
            .configure(|cfg| env.configure(cfg))
            .configure(|cfg| portal_routes(cfg, &LeadsConfig::default())),
    )
    .await;

    // 同一挂载重复加载只算一次
    for _ in 0..3 {
        let req = TestRequest::get()
            .uri("/fr/api/ads/header?mount=m-1")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["mount"], "m-1");
        assert_eq!(body["data"]["slot"]["ad"]["id"], banner.id);
    }

    // 新挂载再算一次
    let req = TestRequest::get()
        .uri("/fr/api/ads/header?mount=m-2")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    env.counters.flush().await;

    let stored = ad::Entity::find_by_id(banner.id)
        .one(env.storage.get_db())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.view_count, 2);
    assert_eq!(stored.click_count, 0);
}

#[actix_rt::test]
async fn test_click_redirects_and_counts() {
    let env = common::setup().await;
    let banner = env.insert_ad("br", "footer", true).await;

    let app = test::init_service(
        App::new()
            .configure(|cfg| env.configure(cfg))
            .configure(|cfg| portal_routes(cfg, &LeadsConfig::default())),
    )
    .await;

    let req = TestRequest::get()
        .uri(&format!("/br/ads/{}/click", banner.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get(LOCATION).unwrap(),
        "https://sponsor.example.com/landing"
    );

    // 其他区域的 id 不存在
    let req = TestRequest::get()
        .uri(&format!("/mx/ads/{}/click", banner.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    env.counters.flush().await;
    let stored = ad::Entity::find_by_id(banner.id)
        .one(env.storage.get_db())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.click_count, 1);
}

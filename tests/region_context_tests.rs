//! 区域上下文与区域切换集成测试

mod common;

use actix_web::App;
use actix_web::http::{
    StatusCode,
    header::{CONTENT_LANGUAGE, LOCATION},
};
use actix_web::test::{self, TestRequest};
use actix_web::web;
use serde_json::Value;

use regionportal::api::services::{portal_routes, region::locale_table};
use regionportal::config::LeadsConfig;

#[actix_rt::test]
async fn test_route_without_region_scope_fails_loudly() {
    common::init_static_config();
    let app = test::init_service(App::new().route("/orphan", web::get().to(locale_table))).await;

    let req = TestRequest::get().uri("/orphan").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1031);
}

#[actix_rt::test]
async fn test_locale_table_and_content_language() {
    let env = common::setup().await;
    let app = test::init_service(
        App::new()
            .configure(|cfg| env.configure(cfg))
            .configure(|cfg| portal_routes(cfg, &LeadsConfig::default())),
    )
    .await;

    let req = TestRequest::get().uri("/mx/api/i18n").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(CONTENT_LANGUAGE).unwrap(), "es-MX");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["region"], "mx");
    assert_eq!(body["data"]["locale"], "es-MX");
    assert!(body["data"]["entries"].as_object().unwrap().len() > 10);
}

#[actix_rt::test]
async fn test_unsupported_segment_falls_back_to_primary() {
    let env = common::setup().await;
    let app = test::init_service(
        App::new()
            .configure(|cfg| env.configure(cfg))
            .configure(|cfg| portal_routes(cfg, &LeadsConfig::default())),
    )
    .await;

    let req = TestRequest::get().uri("/ar/api/i18n").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get(CONTENT_LANGUAGE).unwrap(), "pt-BR");
}

#[actix_rt::test]
async fn test_switch_region_redirects() {
    let env = common::setup().await;
    let app = test::init_service(
        App::new()
            .configure(|cfg| env.configure(cfg))
            .configure(|cfg| portal_routes(cfg, &LeadsConfig::default())),
    )
    .await;

    let req = TestRequest::get()
        .uri("/br/switch/mx?path=/br/noticias/12")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/mx/noticias/12");

    // 同区域不跳转
    let req = TestRequest::get().uri("/fr/switch/fr").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = TestRequest::get().uri("/br/switch/ar").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1032);
}

#[actix_rt::test]
async fn test_switch_ignores_external_path() {
    let env = common::setup().await;
    let app = test::init_service(
        App::new()
            .configure(|cfg| env.configure(cfg))
            .configure(|cfg| portal_routes(cfg, &LeadsConfig::default())),
    )
    .await;

    let req = TestRequest::get()
        .uri("/br/switch/fr?path=https://evil.example.com/br")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/fr");
}

#[actix_rt::test]
async fn test_content_listing_is_region_scoped() {
    let env = common::setup().await;
    env.insert_news("br", "Notícia BR").await;
    env.insert_news("fr", "Actualité FR").await;

    let app = test::init_service(
        App::new()
            .configure(|cfg| env.configure(cfg))
            .configure(|cfg| portal_routes(cfg, &LeadsConfig::default())),
    )
    .await;

    let req = TestRequest::get().uri("/fr/api/news").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["title"], "Actualité FR");
}

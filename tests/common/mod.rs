//! 集成测试公共设施：临时 SQLite 数据库与测试应用

#![allow(dead_code)]

use std::sync::{Arc, Once};

use actix_web::web;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use tempfile::TempDir;

use migration::entities::{ad, ebook, news, supplier};
use regionportal::ads::AdCounterManager;
use regionportal::config::{AdsConfig, LeadsConfig, init_config};
use regionportal::services::LeadService;
use regionportal::storage::SeaOrmStorage;

static INIT: Once = Once::new();

pub fn init_static_config() {
    INIT.call_once(|| {
        init_config();
    });
}

/// 每个测试独立的数据库；TempDir 需随测试存活
pub struct TestEnv {
    pub storage: Arc<SeaOrmStorage>,
    pub counters: AdCounterManager,
    pub leads: Arc<LeadService>,
    _dir: TempDir,
}

pub async fn setup() -> TestEnv {
    init_static_config();

    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("portal.db").display());
    let storage = Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite")
            .await
            .expect("Failed to create storage"),
    );

    let counters = AdCounterManager::from_config(storage.as_counter_sink(), &AdsConfig::default());
    let leads = Arc::new(LeadService::new(
        storage.as_lead_store(),
        &LeadsConfig::default(),
    ));

    TestEnv {
        storage,
        counters,
        leads,
        _dir: dir,
    }
}

impl TestEnv {
    /// 注册到 `App` 的共享数据
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(self.counters.clone()))
            .app_data(web::Data::from(self.leads.clone()));
    }

    pub async fn insert_news(&self, region: &str, title: &str) -> news::Model {
        news::ActiveModel {
            region: Set(region.to_string()),
            title: Set(title.to_string()),
            slug: Set(title.to_lowercase().replace(' ', "-")),
            summary: Set(String::new()),
            body: Set(String::new()),
            image_url: Set(None),
            category_id: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.storage.get_db())
        .await
        .expect("insert news")
    }

    pub async fn insert_ebook(&self, region: &str, title: &str) -> ebook::Model {
        ebook::ActiveModel {
            region: Set(region.to_string()),
            title: Set(title.to_string()),
            description: Set(String::new()),
            cover_url: Set(None),
            file_url: Set(format!("https://files.example.com/{}.pdf", region)),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.storage.get_db())
        .await
        .expect("insert ebook")
    }

    pub async fn insert_ad(&self, region: &str, placement: &str, active: bool) -> ad::Model {
        ad::ActiveModel {
            region: Set(region.to_string()),
            placement: Set(placement.to_string()),
            title: Set(format!("{} {}", region, placement)),
            image_url: Set("https://cdn.example.com/banner.png".to_string()),
            link_url: Set("https://sponsor.example.com/landing".to_string()),
            active: Set(active),
            view_count: Set(0),
            click_count: Set(0),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.storage.get_db())
        .await
        .expect("insert ad")
    }

    pub async fn insert_supplier(&self, region: &str, name: &str) -> supplier::Model {
        supplier::ActiveModel {
            region: Set(region.to_string()),
            name: Set(name.to_string()),
            description: Set(String::new()),
            website: Set(None),
            logo_url: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.storage.get_db())
        .await
        .expect("insert supplier")
    }
}

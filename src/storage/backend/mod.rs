//! SeaORM 存储后端
//!
//! 支持 SQLite、MySQL/MariaDB 与 PostgreSQL，启动时自动运行迁移。

mod ads;
mod connection;
mod counters;
mod leads;
pub mod retry;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::warn;

use super::scoped::ScopedRepository;
use crate::ads::CounterSink;
use crate::downloads::LeadStore;
use crate::errors::{PortalError, Result};
use crate::region::Region;

pub use connection::{connect_generic, connect_sqlite, infer_backend_from_url, run_migrations};

/// SeaORM 存储
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(PortalError::database_config("database_url is not set"));
        }

        let config = crate::config::get_config();
        let retry_config = retry::RetryConfig::from_database_config(&config.database);

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// 绑定到某个区域的仓储
    pub fn scoped(&self, region: Region) -> ScopedRepository {
        ScopedRepository::new(self.db.clone(), region, self.retry_config)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn ping(&self) -> Result<()> {
        connection::ping(&self.db).await
    }

    pub fn as_counter_sink(&self) -> Arc<dyn CounterSink> {
        Arc::new(self.clone())
    }

    pub fn as_lead_store(&self) -> Arc<dyn LeadStore> {
        Arc::new(self.clone())
    }
}

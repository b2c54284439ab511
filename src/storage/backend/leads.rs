//! 留资写入与导出

use std::io::Write;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveValue::Set, ColumnTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::info;

use super::SeaOrmStorage;
use super::retry;
use crate::downloads::{LeadSource, LeadStore, NewLead};
use crate::errors::Result;
use crate::region::Region;
use crate::storage::ListQuery;

use migration::entities::lead;

#[async_trait]
impl LeadStore for SeaOrmStorage {
    async fn insert_lead(&self, region: Region, new_lead: NewLead) -> Result<lead::Model> {
        let model = lead::ActiveModel {
            email: Set(new_lead.email),
            source: Set(new_lead.source.to_string()),
            asset_name: Set(new_lead.asset_name),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        // 区域由 ScopedRepository 写入
        self.scoped(region).create(model).await
    }
}

impl SeaOrmStorage {
    /// 区域内的留资，可按来源过滤，最新在前
    pub async fn list_leads(
        &self,
        region: Region,
        source: Option<LeadSource>,
        query: ListQuery,
    ) -> Result<Vec<lead::Model>> {
        let query = query.clamped();
        let repo = self.scoped(region);
        let db = &self.db;
        let rows = retry::with_retry("list_leads", self.retry_config, || async {
            let mut select = repo.select::<lead::Entity>();
            if let Some(source) = source {
                select = select.filter(lead::Column::Source.eq(source.to_string()));
            }
            select
                .order_by_desc(lead::Column::CreatedAt)
                .order_by_desc(lead::Column::Id)
                .limit(query.limit)
                .offset(query.offset)
                .all(db)
                .await
        })
        .await?;
        Ok(rows)
    }

    /// 以 CSV 导出区域内的全部留资（按时间正序），返回行数
    pub async fn export_leads<W: Write>(
        &self,
        region: Region,
        source: Option<LeadSource>,
        writer: W,
    ) -> Result<usize> {
        let repo = self.scoped(region);
        let db = &self.db;
        let rows = retry::with_retry("export_leads", self.retry_config, || async {
            let mut select = repo.select::<lead::Entity>();
            if let Some(source) = source {
                select = select.filter(lead::Column::Source.eq(source.to_string()));
            }
            select
                .order_by_asc(lead::Column::CreatedAt)
                .order_by_asc(lead::Column::Id)
                .all(db)
                .await
        })
        .await?;

        let mut wtr = csv::Writer::from_writer(writer);
        for row in &rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;

        info!("Exported {} leads for region {}", rows.len(), region);
        Ok(rows.len())
    }
}

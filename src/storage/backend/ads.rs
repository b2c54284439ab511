use async_trait::async_trait;
use sea_orm::{ColumnTrait, QueryFilter, QueryOrder};

use super::SeaOrmStorage;
use super::retry;
use crate::ads::AdSource;
use crate::errors::Result;
use crate::region::Region;

use migration::entities::ad;

#[async_trait]
impl AdSource for SeaOrmStorage {
    /// 同一版位有多条投放时取 id 最小的一条
    async fn find_active(&self, region: Region, placement: &str) -> Result<Option<ad::Model>> {
        let repo = self.scoped(region);
        let db = &self.db;
        let found = retry::with_retry("find_active_ad", self.retry_config, || async {
            repo.select::<ad::Entity>()
                .filter(ad::Column::Placement.eq(placement))
                .filter(ad::Column::Active.eq(true))
                .order_by_asc(ad::Column::Id)
                .one(db)
                .await
        })
        .await?;
        Ok(found)
    }
}

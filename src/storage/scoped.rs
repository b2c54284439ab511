//! 区域隔离的数据访问
//!
//! 所有按区域分区的实体都通过 `ScopedRepository` 访问：
//! - 读：查询在构造时就带上 `region = 当前区域`，调用方只能继续收窄
//! - 单条读取同时按 id 和区域过滤，跨区域 id 视为不存在
//! - 写：创建时强制写入当前区域，更新时区域列不可修改
//!
//! 唯一能改变记录区域的操作是 `reassign_region`，仅供管理接口使用。

use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use serde::Deserialize;
use tracing::{debug, warn};

use super::backend::retry::{self, RetryConfig};
use crate::errors::{PortalError, Result};
use crate::region::Region;

use migration::entities::{
    ad, category, ebook, event, foundry, lead, media_kit, news, supplier, technical_material,
};

/// 按区域分区的实体
pub trait RegionScoped: EntityTrait<Model: Sync> {
    /// 日志与错误信息中使用的实体名
    const KIND: &'static str;

    fn id_column() -> Self::Column;
    fn region_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
    /// 搜索匹配的文本列
    fn label_column() -> Self::Column;
}

macro_rules! impl_region_scoped {
    ($($module:ident => $kind:literal, $label:ident;)+) => {
        $(
            impl RegionScoped for $module::Entity {
                const KIND: &'static str = $kind;

                fn id_column() -> Self::Column {
                    $module::Column::Id
                }

                fn region_column() -> Self::Column {
                    $module::Column::Region
                }

                fn created_at_column() -> Self::Column {
                    $module::Column::CreatedAt
                }

                fn label_column() -> Self::Column {
                    $module::Column::$label
                }
            }
        )+
    };
}

impl_region_scoped! {
    news => "news", Title;
    ebook => "ebook", Title;
    technical_material => "technical material", Title;
    media_kit => "media kit", Title;
    supplier => "supplier", Name;
    foundry => "foundry", Name;
    event => "event", Title;
    category => "category", Name;
    ad => "ad", Title;
    lead => "lead", Email;
}

/// 分页参数
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

pub const MAX_PAGE_SIZE: u64 = 100;

fn default_limit() -> u64 {
    20
}

impl ListQuery {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }.clamped()
    }

    /// limit 限制在 1..=MAX_PAGE_SIZE
    pub fn clamped(self) -> Self {
        Self {
            limit: self.limit.clamp(1, MAX_PAGE_SIZE),
            offset: self.offset,
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn region_select<E: RegionScoped>(region: Region) -> Select<E> {
    E::find().filter(E::region_column().eq(region.code()))
}

/// 绑定到单个区域的仓储
#[derive(Clone)]
pub struct ScopedRepository {
    db: DatabaseConnection,
    region: Region,
    retry_config: RetryConfig,
}

impl ScopedRepository {
    pub(crate) fn new(db: DatabaseConnection, region: Region, retry_config: RetryConfig) -> Self {
        Self {
            db,
            region,
            retry_config,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// 已按当前区域过滤的查询，调用方只能在此基础上继续过滤
    pub fn select<E: RegionScoped>(&self) -> Select<E> {
        region_select::<E>(self.region)
    }

    /// 当前区域的列表，按创建时间倒序
    pub async fn list<E: RegionScoped>(&self, query: ListQuery) -> Result<Vec<E::Model>> {
        let query = query.clamped();
        let db = &self.db;
        let rows = retry::with_retry(E::KIND, self.retry_config, || async {
            self.select::<E>()
                .order_by_desc(E::created_at_column())
                .order_by_desc(E::id_column())
                .limit(query.limit)
                .offset(query.offset)
                .all(db)
                .await
        })
        .await?;

        debug!(
            "Listed {} {} rows for region {}",
            rows.len(),
            E::KIND,
            self.region
        );
        Ok(rows)
    }

    /// 当前区域的记录总数
    pub async fn count<E: RegionScoped>(&self) -> Result<u64> {
        let db = &self.db;
        let total = retry::with_retry(E::KIND, self.retry_config, || async {
            self.select::<E>().count(db).await
        })
        .await?;
        Ok(total)
    }

    /// 按 id 读取；记录属于其他区域时返回 None
    pub async fn get<E: RegionScoped>(&self, id: i32) -> Result<Option<E::Model>> {
        let db = &self.db;
        let row = retry::with_retry(E::KIND, self.retry_config, || async {
            self.select::<E>()
                .filter(E::id_column().eq(id))
                .one(db)
                .await
        })
        .await?;
        Ok(row)
    }

    /// 按 id 读取，不存在（或属于其他区域）时返回 NotFound
    pub async fn require<E: RegionScoped>(&self, id: i32) -> Result<E::Model> {
        self.get::<E>(id)
            .await?
            .ok_or_else(|| PortalError::not_found(format!("{} {} not found", E::KIND, id)))
    }

    /// 标签列模糊搜索
    pub async fn search<E: RegionScoped>(&self, term: &str, limit: u64) -> Result<Vec<E::Model>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = format!("%{}%", escape_like(term));
        let db = &self.db;
        let rows = retry::with_retry(E::KIND, self.retry_config, || async {
            self.select::<E>()
                .filter(E::label_column().like(LikeExpr::new(pattern.as_str()).escape('\\')))
                .order_by_desc(E::created_at_column())
                .limit(limit.clamp(1, MAX_PAGE_SIZE))
                .all(db)
                .await
        })
        .await?;
        Ok(rows)
    }

    /// 创建记录，区域列总是写入当前区域（覆盖调用方传入的值）
    pub async fn create<A>(&self, mut model: A) -> Result<<A::Entity as EntityTrait>::Model>
    where
        A: ActiveModelTrait + ActiveModelBehavior + Send + 'static,
        A::Entity: RegionScoped,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    {
        model.set(
            <A::Entity as RegionScoped>::region_column(),
            self.region.code().into(),
        );

        let db = &self.db;
        let created = retry::with_retry_if(
            <A::Entity as RegionScoped>::KIND,
            self.retry_config,
            retry::is_retryable_before_write,
            || {
                let model = model.clone();
                async move { model.insert(db).await }
            },
        )
        .await?;

        debug!(
            "Created {} in region {}",
            <A::Entity as RegionScoped>::KIND,
            self.region
        );
        Ok(created)
    }

    /// 更新当前区域内的记录；区域列与主键忽略调用方传入的值
    pub async fn update<A>(&self, id: i32, mut model: A) -> Result<<A::Entity as EntityTrait>::Model>
    where
        A: ActiveModelTrait + Send + 'static,
        A::Entity: RegionScoped,
    {
        model.not_set(<A::Entity as RegionScoped>::region_column());
        model.not_set(<A::Entity as RegionScoped>::id_column());

        if !model.is_changed() {
            return self.require::<A::Entity>(id).await;
        }

        let kind = <A::Entity as RegionScoped>::KIND;
        let db = &self.db;
        let result = retry::with_retry(kind, self.retry_config, || {
            let model = model.clone();
            async move {
                <A::Entity as EntityTrait>::update_many()
                    .set(model)
                    .filter(<A::Entity as RegionScoped>::id_column().eq(id))
                    .filter(<A::Entity as RegionScoped>::region_column().eq(self.region.code()))
                    .exec(db)
                    .await
            }
        })
        .await?;

        if result.rows_affected == 0 {
            return Err(PortalError::not_found(format!("{} {} not found", kind, id)));
        }
        self.require::<A::Entity>(id).await
    }

    /// 删除当前区域内的记录
    pub async fn delete<E: RegionScoped>(&self, id: i32) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry(E::KIND, self.retry_config, || async {
            E::delete_many()
                .filter(E::id_column().eq(id))
                .filter(E::region_column().eq(self.region.code()))
                .exec(db)
                .await
        })
        .await?;

        if result.rows_affected == 0 {
            return Err(PortalError::not_found(format!(
                "{} {} not found",
                E::KIND,
                id
            )));
        }
        Ok(())
    }

    /// 将当前区域的记录移动到 `target` 区域（管理操作）
    pub async fn reassign_region<E: RegionScoped>(&self, id: i32, target: Region) -> Result<()> {
        if target == self.region {
            self.require::<E>(id).await?;
            return Ok(());
        }

        let db = &self.db;
        let result = retry::with_retry(E::KIND, self.retry_config, || async {
            E::update_many()
                .col_expr(E::region_column(), Expr::value(target.code()))
                .filter(E::id_column().eq(id))
                .filter(E::region_column().eq(self.region.code()))
                .exec(db)
                .await
        })
        .await?;

        if result.rows_affected == 0 {
            return Err(PortalError::not_found(format!(
                "{} {} not found",
                E::KIND,
                id
            )));
        }

        warn!(
            "{} {} moved from region {} to {}",
            E::KIND,
            id,
            self.region,
            target
        );
        Ok(())
    }
}

/// 转义 LIKE 通配符，搜索词按字面匹配
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

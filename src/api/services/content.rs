//! 区域内容的列表、详情与搜索
//!
//! 所有查询都经由 `ScopedRepository`，其他区域的记录对这里不可见。

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::api::helpers::success_response;
use crate::api::types::Page;
use crate::context::RegionContext;
use crate::errors::{PortalError, Result};
use crate::storage::{ListQuery, RegionScoped, ScopedRepository, SeaOrmStorage};

use migration::entities::{
    category, ebook, event, foundry, media_kit, news, supplier, technical_material,
};

/// URL 中的内容类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    News,
    Ebooks,
    TechnicalMaterials,
    MediaKits,
    Suppliers,
    Foundries,
    Events,
    Categories,
}

/// 按内容类别选择实体类型执行 `$body`
macro_rules! with_content_entity {
    ($kind:expr, $entity:ident => $body:expr) => {
        match $kind {
            ContentKind::News => {
                type $entity = news::Entity;
                $body
            }
            ContentKind::Ebooks => {
                type $entity = ebook::Entity;
                $body
            }
            ContentKind::TechnicalMaterials => {
                type $entity = technical_material::Entity;
                $body
            }
            ContentKind::MediaKits => {
                type $entity = media_kit::Entity;
                $body
            }
            ContentKind::Suppliers => {
                type $entity = supplier::Entity;
                $body
            }
            ContentKind::Foundries => {
                type $entity = foundry::Entity;
                $body
            }
            ContentKind::Events => {
                type $entity = event::Entity;
                $body
            }
            ContentKind::Categories => {
                type $entity = category::Entity;
                $body
            }
        }
    };
}

pub(crate) use with_content_entity;

#[derive(Debug, Deserialize)]
pub struct KindPath {
    pub kind: ContentKind,
}

#[derive(Debug, Deserialize)]
pub struct ItemPath {
    pub kind: ContentKind,
    pub id: i32,
}

async fn list_page<E>(repo: &ScopedRepository, query: ListQuery) -> Result<HttpResponse>
where
    E: RegionScoped,
    E::Model: Serialize,
{
    let query = query.clamped();
    let items = repo.list::<E>(query).await?;
    let total = repo.count::<E>().await?;
    Ok(success_response(Page {
        items,
        total,
        limit: query.limit,
        offset: query.offset,
    }))
}

async fn item<E>(repo: &ScopedRepository, id: i32) -> Result<HttpResponse>
where
    E: RegionScoped,
    E::Model: Serialize,
{
    let model = repo.require::<E>(id).await?;
    Ok(success_response(model))
}

/// GET /{region}/api/{kind}
pub async fn list_content(
    ctx: RegionContext,
    path: web::Path<KindPath>,
    query: web::Query<ListQuery>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> Result<HttpResponse> {
    let repo = storage.scoped(ctx.region());
    let query = query.into_inner();
    trace!("Listing {:?} for region {}", path.kind, ctx.region());
    with_content_entity!(path.kind, E => list_page::<E>(&repo, query).await)
}

/// GET /{region}/api/{kind}/{id}
pub async fn get_content(
    ctx: RegionContext,
    path: web::Path<ItemPath>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> Result<HttpResponse> {
    let repo = storage.scoped(ctx.region());
    with_content_entity!(path.kind, E => item::<E>(&repo, path.id).await)
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// 每类结果的上限
const SEARCH_LIMIT: u64 = 10;

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub news: Vec<news::Model>,
    pub ebooks: Vec<ebook::Model>,
    pub technical_materials: Vec<technical_material::Model>,
    pub suppliers: Vec<supplier::Model>,
    pub foundries: Vec<foundry::Model>,
    pub events: Vec<event::Model>,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.news.len()
            + self.ebooks.len()
            + self.technical_materials.len()
            + self.suppliers.len()
            + self.foundries.len()
            + self.events.len()
    }
}

pub async fn search_all(repo: &ScopedRepository, term: &str) -> Result<SearchResults> {
    let term = term.trim();
    if term.chars().count() > 100 {
        return Err(PortalError::validation("Search term is too long"));
    }

    Ok(SearchResults {
        query: term.to_string(),
        news: repo.search::<news::Entity>(term, SEARCH_LIMIT).await?,
        ebooks: repo.search::<ebook::Entity>(term, SEARCH_LIMIT).await?,
        technical_materials: repo
            .search::<technical_material::Entity>(term, SEARCH_LIMIT)
            .await?,
        suppliers: repo.search::<supplier::Entity>(term, SEARCH_LIMIT).await?,
        foundries: repo.search::<foundry::Entity>(term, SEARCH_LIMIT).await?,
        events: repo.search::<event::Entity>(term, SEARCH_LIMIT).await?,
    })
}

/// GET /{region}/busca?q=
pub async fn search(
    ctx: RegionContext,
    query: web::Query<SearchQuery>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> Result<HttpResponse> {
    let repo = storage.scoped(ctx.region());
    let results = search_all(&repo, &query.q).await?;
    trace!(
        "Search '{}' in region {} matched {} items",
        results.query,
        ctx.region(),
        results.total()
    );
    Ok(success_response(results))
}

use sea_orm::entity::prelude::*;
use serde::Serialize;

/// 电子书（受控下载资产）
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "ebooks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub region: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub cover_url: Option<String>,
    /// 只在留资成功后下发
    #[serde(skip_serializing)]
    pub file_url: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

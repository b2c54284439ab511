//! 广告与留资表迁移

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 ads 表
        manager
            .create_table(
                Table::create()
                    .table(Ads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ads::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ads::Region).string_len(8).not_null())
                    .col(ColumnDef::new(Ads::Placement).string_len(64).not_null())
                    .col(ColumnDef::new(Ads::Title).string().not_null())
                    .col(ColumnDef::new(Ads::ImageUrl).text().not_null())
                    .col(ColumnDef::new(Ads::LinkUrl).text().not_null())
                    .col(
                        ColumnDef::new(Ads::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Ads::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Ads::ClickCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Ads::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 投放查询索引 (region, placement, active)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ads_region_placement")
                    .table(Ads::Table)
                    .col(Ads::Region)
                    .col(Ads::Placement)
                    .col(Ads::Active)
                    .to_owned(),
            )
            .await?;

        // 创建 leads 表
        manager
            .create_table(
                Table::create()
                    .table(Leads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Leads::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Leads::Email).string_len(320).not_null())
                    .col(ColumnDef::new(Leads::Region).string_len(8).not_null())
                    .col(ColumnDef::new(Leads::Source).string_len(32).not_null())
                    .col(ColumnDef::new(Leads::AssetName).string().null())
                    .col(
                        ColumnDef::new(Leads::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_leads_region_created")
                    .table(Leads::Table)
                    .col(Leads::Region)
                    .col(Leads::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_leads_region_created").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Leads::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_ads_region_placement").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ads::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Ads {
    Table,
    Id,
    Region,
    Placement,
    Title,
    ImageUrl,
    LinkUrl,
    Active,
    ViewCount,
    ClickCount,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Leads {
    Table,
    Id,
    Email,
    Region,
    Source,
    AssetName,
    CreatedAt,
}

//! 内容表迁移
//!
//! 所有内容表都带 `region` 列，并在 (region, created_at) 上建索引，
//! 供按区域分页列表使用。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn region_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).string_len(8).not_null().to_owned()
}

fn created_at_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

async fn create_region_index<T, C>(
    manager: &SchemaManager<'_>,
    name: &str,
    table: T,
    region: C,
    created_at: C,
) -> Result<(), DbErr>
where
    T: IntoIden + 'static,
    C: IntoIden + 'static,
{
    manager
        .create_index(
            Index::create()
                .if_not_exists()
                .name(name)
                .table(table)
                .col(region)
                .col(created_at)
                .to_owned(),
        )
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // news
        manager
            .create_table(
                Table::create()
                    .table(News::Table)
                    .if_not_exists()
                    .col(id_col(News::Id))
                    .col(region_col(News::Region))
                    .col(ColumnDef::new(News::Title).string().not_null())
                    .col(ColumnDef::new(News::Slug).string().not_null())
                    .col(ColumnDef::new(News::Summary).text().not_null())
                    .col(ColumnDef::new(News::Body).text().not_null())
                    .col(ColumnDef::new(News::ImageUrl).string().null())
                    .col(ColumnDef::new(News::CategoryId).integer().null())
                    .col(created_at_col(News::CreatedAt))
                    .to_owned(),
            )
            .await?;
        create_region_index(
            manager,
            "idx_news_region_created",
            News::Table,
            News::Region,
            News::CreatedAt,
        )
        .await?;

        // ebooks
        manager
            .create_table(
                Table::create()
                    .table(Ebooks::Table)
                    .if_not_exists()
                    .col(id_col(Ebooks::Id))
                    .col(region_col(Ebooks::Region))
                    .col(ColumnDef::new(Ebooks::Title).string().not_null())
                    .col(ColumnDef::new(Ebooks::Description).text().not_null())
                    .col(ColumnDef::new(Ebooks::CoverUrl).string().null())
                    .col(ColumnDef::new(Ebooks::FileUrl).text().not_null())
                    .col(created_at_col(Ebooks::CreatedAt))
                    .to_owned(),
            )
            .await?;
        create_region_index(
            manager,
            "idx_ebooks_region_created",
            Ebooks::Table,
            Ebooks::Region,
            Ebooks::CreatedAt,
        )
        .await?;

        // technical_materials
        manager
            .create_table(
                Table::create()
                    .table(TechnicalMaterials::Table)
                    .if_not_exists()
                    .col(id_col(TechnicalMaterials::Id))
                    .col(region_col(TechnicalMaterials::Region))
                    .col(ColumnDef::new(TechnicalMaterials::Title).string().not_null())
                    .col(
                        ColumnDef::new(TechnicalMaterials::Description)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TechnicalMaterials::FileUrl).text().not_null())
                    .col(created_at_col(TechnicalMaterials::CreatedAt))
                    .to_owned(),
            )
            .await?;
        create_region_index(
            manager,
            "idx_technical_materials_region_created",
            TechnicalMaterials::Table,
            TechnicalMaterials::Region,
            TechnicalMaterials::CreatedAt,
        )
        .await?;

        // media_kits
        manager
            .create_table(
                Table::create()
                    .table(MediaKits::Table)
                    .if_not_exists()
                    .col(id_col(MediaKits::Id))
                    .col(region_col(MediaKits::Region))
                    .col(ColumnDef::new(MediaKits::Title).string().not_null())
                    .col(ColumnDef::new(MediaKits::FileUrl).text().not_null())
                    .col(created_at_col(MediaKits::CreatedAt))
                    .to_owned(),
            )
            .await?;
        create_region_index(
            manager,
            "idx_media_kits_region_created",
            MediaKits::Table,
            MediaKits::Region,
            MediaKits::CreatedAt,
        )
        .await?;

        // suppliers
        manager
            .create_table(
                Table::create()
                    .table(Suppliers::Table)
                    .if_not_exists()
                    .col(id_col(Suppliers::Id))
                    .col(region_col(Suppliers::Region))
                    .col(ColumnDef::new(Suppliers::Name).string().not_null())
                    .col(ColumnDef::new(Suppliers::Description).text().not_null())
                    .col(ColumnDef::new(Suppliers::Website).string().null())
                    .col(ColumnDef::new(Suppliers::LogoUrl).string().null())
                    .col(created_at_col(Suppliers::CreatedAt))
                    .to_owned(),
            )
            .await?;
        create_region_index(
            manager,
            "idx_suppliers_region_created",
            Suppliers::Table,
            Suppliers::Region,
            Suppliers::CreatedAt,
        )
        .await?;

        // foundries
        manager
            .create_table(
                Table::create()
                    .table(Foundries::Table)
                    .if_not_exists()
                    .col(id_col(Foundries::Id))
                    .col(region_col(Foundries::Region))
                    .col(ColumnDef::new(Foundries::Name).string().not_null())
                    .col(ColumnDef::new(Foundries::City).string().null())
                    .col(ColumnDef::new(Foundries::Description).text().not_null())
                    .col(ColumnDef::new(Foundries::Website).string().null())
                    .col(created_at_col(Foundries::CreatedAt))
                    .to_owned(),
            )
            .await?;
        create_region_index(
            manager,
            "idx_foundries_region_created",
            Foundries::Table,
            Foundries::Region,
            Foundries::CreatedAt,
        )
        .await?;

        // events
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(id_col(Events::Id))
                    .col(region_col(Events::Region))
                    .col(ColumnDef::new(Events::Title).string().not_null())
                    .col(ColumnDef::new(Events::Location).string().not_null())
                    .col(
                        ColumnDef::new(Events::StartsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Events::Url).string().null())
                    .col(created_at_col(Events::CreatedAt))
                    .to_owned(),
            )
            .await?;
        create_region_index(
            manager,
            "idx_events_region_created",
            Events::Table,
            Events::Region,
            Events::CreatedAt,
        )
        .await?;

        // categories
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(id_col(Categories::Id))
                    .col(region_col(Categories::Region))
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::Slug).string().not_null())
                    .col(created_at_col(Categories::CreatedAt))
                    .to_owned(),
            )
            .await?;
        create_region_index(
            manager,
            "idx_categories_region_created",
            Categories::Table,
            Categories::Region,
            Categories::CreatedAt,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Foundries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Suppliers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MediaKits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TechnicalMaterials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ebooks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(News::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum News {
    Table,
    Id,
    Region,
    Title,
    Slug,
    Summary,
    Body,
    ImageUrl,
    CategoryId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Ebooks {
    Table,
    Id,
    Region,
    Title,
    Description,
    CoverUrl,
    FileUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TechnicalMaterials {
    Table,
    Id,
    Region,
    Title,
    Description,
    FileUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
enum MediaKits {
    Table,
    Id,
    Region,
    Title,
    FileUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Suppliers {
    Table,
    Id,
    Region,
    Name,
    Description,
    Website,
    LogoUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Foundries {
    Table,
    Id,
    Region,
    Name,
    City,
    Description,
    Website,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Region,
    Title,
    Location,
    StartsAt,
    Url,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Region,
    Name,
    Slug,
    CreatedAt,
}

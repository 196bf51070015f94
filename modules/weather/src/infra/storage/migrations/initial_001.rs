use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(City::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(City::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(City::Name).string_len(128).not_null())
                    .col(ColumnDef::new(City::Latitude).double().not_null())
                    .col(ColumnDef::new(City::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(City::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Temperature::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Temperature::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Temperature::CityId).integer().not_null())
                    .col(ColumnDef::new(Temperature::Min).integer().not_null())
                    .col(ColumnDef::new(Temperature::Max).integer().not_null())
                    .col(
                        ColumnDef::new(Temperature::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_temperature_city")
                            .from(Temperature::Table, Temperature::CityId)
                            .to(City::Table, City::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The forecast window scans by city and recency.
        manager
            .create_index(
                Index::create()
                    .name("idx_temperature_city_created_at")
                    .table(Temperature::Table)
                    .col(Temperature::CityId)
                    .col(Temperature::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Webhook::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Webhook::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Webhook::CityId).integer().not_null())
                    .col(ColumnDef::new(Webhook::CallbackUrl).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_webhook_city")
                            .from(Webhook::Table, Webhook::CityId)
                            .to(City::Table, City::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Webhook::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Temperature::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(City::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum City {
    Table,
    Id,
    Name,
    Latitude,
    Longitude,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Temperature {
    Table,
    Id,
    CityId,
    Min,
    Max,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Webhook {
    Table,
    Id,
    CityId,
    CallbackUrl,
}

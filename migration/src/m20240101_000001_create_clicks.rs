use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clicks::Table)
                    .if_not_exists()
                    .col(big_integer(Clicks::Id).auto_increment().primary_key())
                    .col(string(Clicks::ShortCode).not_null())
                    .col(timestamp_with_time_zone(Clicks::Timestamp).not_null())
                    .col(text(Clicks::UserAgent).not_null())
                    .col(string(Clicks::Ip).not_null())
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clicks_short_code")
                    .table(Clicks::Table)
                    .col(Clicks::ShortCode)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clicks::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Clicks {
    Table,
    Id,
    ShortCode,
    Timestamp,
    UserAgent,
    Ip,
}

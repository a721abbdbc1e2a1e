//! Create `servicio` table (top level of the services catalog).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Servicio::Table)
                    .if_not_exists()
                    .col(uuid(Servicio::Id).primary_key())
                    .col(string_len(Servicio::Name, 128).not_null())
                    .col(text_null(Servicio::Description))
                    .col(big_integer(Servicio::PriceCents).not_null().default(0))
                    .col(boolean(Servicio::Active).not_null().default(true))
                    .col(timestamp_with_time_zone(Servicio::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Servicio::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Servicio::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Servicio { Table, Id, Name, Description, PriceCents, Active, CreatedAt, UpdatedAt }

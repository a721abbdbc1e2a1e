//! Create `subservicio` table with FK to `servicio`.
//!
//! Deleting a servicio removes its subservicios.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subservicio::Table)
                    .if_not_exists()
                    .col(uuid(Subservicio::Id).primary_key())
                    .col(uuid(Subservicio::ServicioId).not_null())
                    .col(string_len(Subservicio::Name, 128).not_null())
                    .col(text_null(Subservicio::Description))
                    .col(big_integer(Subservicio::PriceCents).not_null().default(0))
                    .col(boolean(Subservicio::Active).not_null().default(true))
                    .col(timestamp_with_time_zone(Subservicio::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Subservicio::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subservicio_servicio")
                            .from(Subservicio::Table, Subservicio::ServicioId)
                            .to(Servicio::Table, Servicio::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Subservicio::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Subservicio { Table, Id, ServicioId, Name, Description, PriceCents, Active, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Servicio { Table, Id }

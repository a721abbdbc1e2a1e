use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Subservicio: lookups by parent
        manager
            .create_index(
                Index::create()
                    .name("idx_subservicio_servicio")
                    .table(Subservicio::Table)
                    .col(Subservicio::ServicioId)
                    .to_owned(),
            )
            .await?;

        // Catalog listings are ordered by name
        manager
            .create_index(
                Index::create()
                    .name("idx_servicio_name")
                    .table(Servicio::Table)
                    .col(Servicio::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_subservicio_servicio").table(Subservicio::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_servicio_name").table(Servicio::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Subservicio { Table, ServicioId }

#[derive(DeriveIden)]
enum Servicio { Table, Name }

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Configs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Configs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Configs::Name).string().not_null())
                    .col(
                        ColumnDef::new(Configs::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Configs::Number).integer().not_null())
                    .col(
                        ColumnDef::new(Configs::TimeBetweenCycles)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Configs::UpperLimit).integer().not_null())
                    .col(ColumnDef::new(Configs::InferiorLimit).integer().not_null())
                    .col(ColumnDef::new(Configs::UpperTime).integer().not_null())
                    .col(ColumnDef::new(Configs::InferiorTime).integer().not_null())
                    .col(
                        ColumnDef::new(Configs::DisableShutdown)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Configs::EnableOutput)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Configs::Temperature).double().not_null())
                    .col(ColumnDef::new(Configs::Time).double().not_null())
                    .col(ColumnDef::new(Configs::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Lookups by name back the `config(name:)` query
        manager
            .create_index(
                Index::create()
                    .name("idx_configs_name")
                    .table(Configs::Table)
                    .col(Configs::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Configs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Configs {
    Table,
    Id,
    Name,
    IsDefault,
    Number,
    TimeBetweenCycles,
    UpperLimit,
    InferiorLimit,
    UpperTime,
    InferiorTime,
    DisableShutdown,
    EnableOutput,
    Temperature,
    Time,
    CreatedAt,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // seq keeps insertion order; id is the client-visible key and may repeat
        manager
            .create_table(
                Table::create()
                    .table(Passwords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Passwords::Seq)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Passwords::Id).string().not_null())
                    .col(ColumnDef::new(Passwords::Website).string().not_null())
                    .col(ColumnDef::new(Passwords::Username).string().not_null())
                    .col(ColumnDef::new(Passwords::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_passwords_id")
                    .table(Passwords::Table)
                    .col(Passwords::Id)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Passwords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Passwords {
    Table,
    Seq,
    Id,
    Website,
    Username,
    Password,
}

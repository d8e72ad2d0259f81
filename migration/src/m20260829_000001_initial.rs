use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Name,
    AvatarUrl,
    Provider,
    ProviderId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Bets {
    Table,
    Id,
    UserId,
    Gender,
    Amount,
    TicketCount,
    PaymentMethod,
    IsPaid,
    CreatedAt,
}

/// 揭晓配置（单行表）
#[derive(DeriveIden)]
enum RevealConfigs {
    Table,
    Id,
    RevealedGender,
    IsRevealed,
    RevealDate,
    WinnerId,
    DadPrediction,
    MomPrediction,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Clues {
    Table,
    Id,
    Title,
    Description,
    ImageUrl,
    ClueType,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Symptoms {
    Table,
    Id,
    Category,
    BoyDescription,
    GirlDescription,
    CheckedGender,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // enums
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("gender"))
                    .values(vec![Alias::new("BOY"), Alias::new("GIRL")])
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("clue_type"))
                    .values(vec![
                        Alias::new("ULTRASOUND"),
                        Alias::new("SYMPTOM"),
                        Alias::new("OTHER"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Users::AvatarUrl).text().null())
                    .col(ColumnDef::new(Users::Provider).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Users::ProviderId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 一个外部账号只允许对应一个用户
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_provider_identity")
                    .table(Users::Table)
                    .col(Users::Provider)
                    .col(Users::ProviderId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Bets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bets::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Bets::Gender)
                            .custom(Alias::new("gender"))
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bets::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Bets::TicketCount)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Bets::PaymentMethod)
                            .string_len(64)
                            .not_null()
                            .default("bank_transfer"),
                    )
                    .col(
                        ColumnDef::new(Bets::IsPaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Bets::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bets_user")
                            .from(Bets::Table, Bets::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 每人一注：检查-插入之间的并发竞争由唯一索引兜底
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bets_user_unique")
                    .table(Bets::Table)
                    .col(Bets::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RevealConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RevealConfigs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RevealConfigs::RevealedGender)
                            .custom(Alias::new("gender"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RevealConfigs::IsRevealed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RevealConfigs::RevealDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    // 非拥有引用：用户不会被单独删除，不加外键
                    .col(ColumnDef::new(RevealConfigs::WinnerId).big_integer().null())
                    .col(
                        ColumnDef::new(RevealConfigs::DadPrediction)
                            .custom(Alias::new("gender"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RevealConfigs::MomPrediction)
                            .custom(Alias::new("gender"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RevealConfigs::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RevealConfigs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Clues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clues::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clues::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Clues::Description).text().null())
                    .col(ColumnDef::new(Clues::ImageUrl).text().null())
                    .col(
                        ColumnDef::new(Clues::ClueType)
                            .custom(Alias::new("clue_type"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Clues::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Clues::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Clues::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Symptoms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Symptoms::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Symptoms::Category)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Symptoms::BoyDescription)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Symptoms::GirlDescription)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Symptoms::CheckedGender)
                            .custom(Alias::new("gender"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Symptoms::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Symptoms::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Symptoms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Symptoms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RevealConfigs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("clue_type")).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("gender")).to_owned())
            .await?;
        Ok(())
    }
}

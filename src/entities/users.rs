use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    /// 身份提供方，目前只有 "google"
    pub provider: String,
    /// 提供方侧的稳定用户标识（Google 的 sub）
    pub provider_id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::bets::Entity")]
    Bet,
}

impl Related<super::bets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

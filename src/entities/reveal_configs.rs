use crate::models::Gender;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 揭晓配置单行表。`is_revealed` 与 `winner_id` 都是单向标志，
/// 只通过带条件的 UPDATE 置位，从不复位
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "reveal_configs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub revealed_gender: Option<Gender>,
    pub is_revealed: bool,
    pub reveal_date: Option<DateTime<Utc>>,
    /// 非拥有引用，不设外键
    pub winner_id: Option<i64>,
    pub dad_prediction: Option<Gender>,
    pub mom_prediction: Option<Gender>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

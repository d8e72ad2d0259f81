use crate::entities::bet_entity as bets;
use crate::models::Gender;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 单注固定金额（货币单位）
pub const FIXED_STAKE: i64 = 200;
/// 每注固定一张抽奖券
pub const TICKETS_PER_BET: i64 = 1;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBetRequest {
    pub gender: Gender,
    #[schema(example = "bank_transfer")]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BetResponse {
    pub id: i64,
    pub user_id: i64,
    pub gender: Gender,
    pub amount: i64,
    pub ticket_count: i64,
    pub payment_method: String,
    pub is_paid: bool,
    pub created_at: Option<DateTime<Utc>>,
    /// 冗余下注人信息，方便管理端展示
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

impl From<bets::Model> for BetResponse {
    fn from(bet: bets::Model) -> Self {
        Self {
            id: bet.id,
            user_id: bet.user_id,
            gender: bet.gender,
            amount: bet.amount,
            ticket_count: bet.ticket_count,
            payment_method: bet.payment_method,
            is_paid: bet.is_paid,
            created_at: bet.created_at,
            user_name: None,
            user_email: None,
        }
    }
}

impl BetResponse {
    pub fn with_owner(mut self, name: String, email: String) -> Self {
        self.user_name = Some(name);
        self.user_email = Some(email);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenderTotals {
    pub total_amount: i64,
    pub total_tickets: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BetStatsResponse {
    pub boy: GenderTotals,
    pub girl: GenderTotals,
    pub total_users: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub id: i64,
    pub name: String,
    pub avatar_url: Option<String>,
    /// 未下注的参与者为 null
    pub gender: Option<Gender>,
}

use crate::entities::reveal_config_entity as reveal_configs;
use crate::models::{Gender, WinnerProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevealRequest {
    pub gender: Gender,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePredictionsRequest {
    pub dad_prediction: Option<Gender>,
    pub mom_prediction: Option<Gender>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevealConfigResponse {
    pub id: i64,
    pub revealed_gender: Option<Gender>,
    pub is_revealed: bool,
    pub reveal_date: Option<DateTime<Utc>>,
    pub winner_id: Option<i64>,
    pub dad_prediction: Option<Gender>,
    pub mom_prediction: Option<Gender>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<reveal_configs::Model> for RevealConfigResponse {
    fn from(config: reveal_configs::Model) -> Self {
        Self {
            id: config.id,
            revealed_gender: config.revealed_gender,
            is_revealed: config.is_revealed,
            reveal_date: config.reveal_date,
            winner_id: config.winner_id,
            dad_prediction: config.dad_prediction,
            mom_prediction: config.mom_prediction,
            created_at: config.created_at,
            updated_at: config.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawWinnerResponse {
    pub winner: WinnerProfile,
    pub total_pool: i64,
    pub fee: i64,
    pub winner_prize: i64,
    pub total_participants: i64,
}

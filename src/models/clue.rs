use crate::entities::clue_entity as clues;
use crate::models::ClueType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClueRequest {
    #[schema(example = "第一次超音波")]
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub clue_type: ClueType,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClueRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub clue_type: Option<ClueType>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClueResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub clue_type: ClueType,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<clues::Model> for ClueResponse {
    fn from(clue: clues::Model) -> Self {
        Self {
            id: clue.id,
            title: clue.title,
            description: clue.description,
            image_url: clue.image_url,
            clue_type: clue.clue_type,
            sort_order: clue.sort_order,
            created_at: clue.created_at,
            updated_at: clue.updated_at,
        }
    }
}

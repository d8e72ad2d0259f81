use crate::database::DbPool;
use crate::entities::clue_entity as clues;
use crate::error::{AppError, AppResult};
use crate::models::{ClueResponse, CreateClueRequest, UpdateClueRequest};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, EntityTrait, IntoActiveModel, ModelTrait, QueryOrder,
    Set,
};

pub struct ClueService {
    pool: DbPool,
}

impl ClueService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 线索列表（公开），按 order 升序
    pub async fn list(&self) -> AppResult<Vec<ClueResponse>> {
        let list = clues::Entity::find()
            .order_by_asc(clues::Column::SortOrder)
            .all(self.pool.as_ref())
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn create(&self, request: CreateClueRequest) -> AppResult<ClueResponse> {
        if request.title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Title and clueType are required".to_string(),
            ));
        }

        let clue = clues::ActiveModel {
            title: Set(request.title),
            description: Set(request.description),
            image_url: Set(request.image_url),
            clue_type: Set(request.clue_type),
            sort_order: Set(request.sort_order.unwrap_or(0)),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        Ok(clue.into())
    }

    pub async fn update(&self, id: i64, request: UpdateClueRequest) -> AppResult<ClueResponse> {
        let clue = self.find_clue(id).await?;

        let mut am = clue.into_active_model();
        if let Some(title) = request.title {
            am.title = Set(title);
        }
        if let Some(description) = request.description {
            am.description = Set(Some(description));
        }
        if let Some(image_url) = request.image_url {
            am.image_url = Set(Some(image_url));
        }
        if let Some(clue_type) = request.clue_type {
            am.clue_type = Set(clue_type);
        }
        if let Some(sort_order) = request.sort_order {
            am.sort_order = Set(sort_order);
        }
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(self.pool.as_ref()).await?;

        Ok(updated.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let clue = self.find_clue(id).await?;
        clue.delete(self.pool.as_ref()).await?;
        Ok(())
    }

    // 统一先查再改，未知 id 一律 404
    async fn find_clue(&self, id: i64) -> AppResult<clues::Model> {
        clues::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Clue not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::models::ClueType;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn clue_model(id: i64, title: &str) -> clues::Model {
        clues::Model {
            id,
            title: title.to_string(),
            description: None,
            image_url: None,
            clue_type: ClueType::Ultrasound,
            sort_order: 0,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = ClueService::new(Arc::new(db))
            .create(CreateClueRequest {
                title: "   ".to_string(),
                description: None,
                image_url: None,
                clue_type: ClueType::Other,
                sort_order: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_unknown_clue_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<clues::Model>::new()])
            .into_connection();

        let err = ClueService::new(Arc::new(db))
            .update(
                99,
                UpdateClueRequest {
                    title: Some("x".to_string()),
                    description: None,
                    image_url: None,
                    clue_type: None,
                    sort_order: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_returns_clues() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![clue_model(1, "第一次超音波"), clue_model(2, "孕吐")]])
            .into_connection();

        let list = ClueService::new(Arc::new(db)).list().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].title, "第一次超音波");
    }
}

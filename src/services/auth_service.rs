use crate::database::DbPool;
use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::external::{GoogleAuthService, GoogleTokenInfo};
use crate::models::UserResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set,
};

const PROVIDER_GOOGLE: &str = "google";

pub struct AuthService {
    pool: DbPool,
    google: GoogleAuthService,
}

impl AuthService {
    pub fn new(pool: DbPool, google: GoogleAuthService) -> Self {
        Self { pool, google }
    }

    /// Google 登录：校验 ID token，按 (provider, sub) 查找用户，不存在则懒创建
    pub async fn login_with_google(&self, token: &str) -> AppResult<UserResponse> {
        if token.is_empty() {
            return Err(AppError::ValidationError("Token is required".to_string()));
        }

        let info = self.google.verify_id_token(token).await?;
        let user = self.find_or_create_user(info).await?;
        Ok(user.into())
    }

    pub async fn get_user(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(user.into())
    }

    async fn find_or_create_user(&self, info: GoogleTokenInfo) -> AppResult<users::Model> {
        let email = info
            .email
            .ok_or_else(|| AppError::AuthError("Invalid token payload".to_string()))?;

        let existing = users::Entity::find()
            .filter(users::Column::Provider.eq(PROVIDER_GOOGLE))
            .filter(users::Column::ProviderId.eq(info.sub.clone()))
            .one(self.pool.as_ref())
            .await?;

        if let Some(user) = existing {
            return Ok(user);
        }

        let created = users::ActiveModel {
            email: Set(email.clone()),
            name: Set(info.name.unwrap_or(email)),
            avatar_url: Set(info.picture),
            provider: Set(PROVIDER_GOOGLE.to_string()),
            provider_id: Set(info.sub),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        log::info!("New user registered via Google: {}", created.id);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn token_info(sub: &str) -> GoogleTokenInfo {
        GoogleTokenInfo {
            aud: "client-id".to_string(),
            sub: sub.to_string(),
            email: Some("guest@example.com".to_string()),
            name: Some("Guest".to_string()),
            picture: None,
        }
    }

    fn user_model(id: i64, sub: &str) -> users::Model {
        users::Model {
            id,
            email: "guest@example.com".to_string(),
            name: "Guest".to_string(),
            avatar_url: None,
            provider: "google".to_string(),
            provider_id: sub.to_string(),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    fn service(db: sea_orm::DatabaseConnection) -> AuthService {
        AuthService::new(
            Arc::new(db),
            GoogleAuthService::new(crate::config::GoogleConfig {
                client_id: "client-id".to_string(),
            }),
        )
    }

    #[tokio::test]
    async fn test_existing_user_is_reused() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model(7, "sub-7")]])
            .into_connection();

        let user = service(db)
            .find_or_create_user(token_info("sub-7"))
            .await
            .unwrap();
        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn test_user_created_lazily_on_first_login() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new(), vec![user_model(1, "sub-1")]])
            .into_connection();

        let user = service(db)
            .find_or_create_user(token_info("sub-1"))
            .await
            .unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.provider, "google");
    }

    #[tokio::test]
    async fn test_token_without_email_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let mut info = token_info("sub-2");
        info.email = None;

        let err = service(db).find_or_create_user(info).await.unwrap_err();
        assert!(matches!(err, AppError::AuthError(_)));
    }
}

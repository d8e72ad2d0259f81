use crate::database::DbPool;
use crate::entities::{bet_entity as bets, reveal_config_entity as reveal_configs, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::{
    DrawWinnerResponse, Gender, RevealConfigResponse, UpdatePredictionsRequest,
};
use crate::utils::{draw_index, prize_split};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};

pub struct RevealService {
    pool: DbPool,
}

impl RevealService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 读取揭晓状态，单例配置不存在时用默认值懒创建
    pub async fn reveal_status(&self) -> AppResult<RevealConfigResponse> {
        let config = self.ensure_config().await?;
        Ok(config.into())
    }

    /// 揭晓性别。单向转换：带条件的 UPDATE 保证并发下也只成功一次。
    pub async fn reveal(&self, gender: Gender) -> AppResult<RevealConfigResponse> {
        let config = self.ensure_config().await?;

        if config.is_revealed {
            return Err(AppError::StateConflict(
                "Gender already revealed".to_string(),
            ));
        }

        let now = Utc::now();
        let result = reveal_configs::Entity::update_many()
            // 枚举列必须带 CAST 赋值，裸参数会被 Postgres 以类型不匹配拒绝
            .col_expr(reveal_configs::Column::RevealedGender, gender.as_enum())
            .col_expr(reveal_configs::Column::IsRevealed, Expr::value(true))
            .col_expr(reveal_configs::Column::RevealDate, Expr::value(now))
            .col_expr(reveal_configs::Column::UpdatedAt, Expr::value(now))
            .filter(reveal_configs::Column::Id.eq(config.id))
            .filter(reveal_configs::Column::IsRevealed.eq(false))
            .exec(self.pool.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::StateConflict(
                "Gender already revealed".to_string(),
            ));
        }

        log::info!("Gender revealed: {}", gender);

        let updated = self.reload_config(config.id).await?;
        Ok(updated.into())
    }

    /// 抽出得奖者。前置条件：已揭晓、尚未开过奖。
    /// 奖池为猜对且已付款的注，每注一张签，等概率抽取；
    /// 奖金按全部已付款注的总额计算，扣 10% 手续费。
    pub async fn draw_winner(&self) -> AppResult<DrawWinnerResponse> {
        let config = self.ensure_config().await?;

        let revealed_gender = match (config.is_revealed, config.revealed_gender) {
            (true, Some(g)) => g,
            _ => {
                return Err(AppError::StateConflict(
                    "Gender must be revealed first".to_string(),
                ))
            }
        };
        if config.winner_id.is_some() {
            return Err(AppError::StateConflict("Winner already drawn".to_string()));
        }

        let eligible = bets::Entity::find()
            .filter(bets::Column::Gender.eq(revealed_gender))
            .filter(bets::Column::IsPaid.eq(true))
            .all(self.pool.as_ref())
            .await?;
        if eligible.is_empty() {
            return Err(AppError::StateConflict(
                "No valid bets for drawing".to_string(),
            ));
        }

        // 每注一张签，不按金额加权
        let index = draw_index(&mut rand::thread_rng(), eligible.len());
        let winner_id = eligible[index].user_id;

        // 条件更新：winner_id 只能从 null 置位一次
        let result = reveal_configs::Entity::update_many()
            .col_expr(reveal_configs::Column::WinnerId, Expr::value(winner_id))
            .col_expr(reveal_configs::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(reveal_configs::Column::Id.eq(config.id))
            .filter(reveal_configs::Column::WinnerId.is_null())
            .exec(self.pool.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::StateConflict("Winner already drawn".to_string()));
        }

        let winner = users::Entity::find_by_id(winner_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Winner not found".to_string()))?;

        // 奖池取全部已付款的注，与押哪边无关
        let paid = bets::Entity::find()
            .filter(bets::Column::IsPaid.eq(true))
            .all(self.pool.as_ref())
            .await?;
        let total_pool: i64 = paid.iter().map(|b| b.amount).sum();
        let (fee, winner_prize) = prize_split(total_pool);

        log::info!(
            "Winner drawn: user {} out of {} participants, prize {}",
            winner_id,
            eligible.len(),
            winner_prize
        );

        Ok(DrawWinnerResponse {
            winner: winner.into(),
            total_pool,
            fee,
            winner_prize,
            total_participants: eligible.len() as i64,
        })
    }

    /// 更新爸妈的预测。纯展示用途，不参与下注，也不受揭晓状态限制。
    pub async fn update_predictions(
        &self,
        request: UpdatePredictionsRequest,
    ) -> AppResult<RevealConfigResponse> {
        let config = self.ensure_config().await?;

        let mut am = config.into_active_model();
        am.dad_prediction = Set(request.dad_prediction);
        am.mom_prediction = Set(request.mom_prediction);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(self.pool.as_ref()).await?;

        Ok(updated.into())
    }

    async fn ensure_config(&self) -> Result<reveal_configs::Model, DbErr> {
        if let Some(config) = reveal_configs::Entity::find()
            .order_by_asc(reveal_configs::Column::Id)
            .one(self.pool.as_ref())
            .await?
        {
            return Ok(config);
        }
        reveal_configs::ActiveModel {
            is_revealed: Set(false),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await
    }

    async fn reload_config(&self, id: i64) -> AppResult<reveal_configs::Model> {
        reveal_configs::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Reveal config not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn config_model(
        is_revealed: bool,
        revealed_gender: Option<Gender>,
        winner_id: Option<i64>,
    ) -> reveal_configs::Model {
        reveal_configs::Model {
            id: 1,
            revealed_gender,
            is_revealed,
            reveal_date: if is_revealed { Some(Utc::now()) } else { None },
            winner_id,
            dad_prediction: None,
            mom_prediction: None,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    fn bet_model(id: i64, user_id: i64, gender: Gender, amount: i64) -> bets::Model {
        bets::Model {
            id,
            user_id,
            gender,
            amount,
            ticket_count: 1,
            payment_method: "bank_transfer".to_string(),
            is_paid: true,
            created_at: Some(Utc::now()),
        }
    }

    fn user_model(id: i64) -> users::Model {
        users::Model {
            id,
            email: format!("user{id}@example.com"),
            name: format!("User {id}"),
            avatar_url: None,
            provider: "google".to_string(),
            provider_id: format!("sub-{id}"),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_reveal_status_creates_config_lazily() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<reveal_configs::Model>::new()])
            .append_query_results([vec![config_model(false, None, None)]])
            .into_connection();

        let status = RevealService::new(Arc::new(db)).reveal_status().await.unwrap();
        assert!(!status.is_revealed);
        assert!(status.revealed_gender.is_none());
    }

    #[tokio::test]
    async fn test_reveal_is_one_way() {
        // 已揭晓的配置再次揭晓（换个性别也一样）必须失败
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![config_model(true, Some(Gender::Boy), None)]])
            .into_connection();

        let err = RevealService::new(Arc::new(db)).reveal(Gender::Girl).await.unwrap_err();
        assert!(matches!(err, AppError::StateConflict(_)));
    }

    #[tokio::test]
    async fn test_reveal_lost_race_maps_to_conflict() {
        // 预读未揭晓，但条件更新没有命中行：并发对手先揭晓了
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![config_model(false, None, None)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = RevealService::new(Arc::new(db)).reveal(Gender::Boy).await.unwrap_err();
        assert!(matches!(err, AppError::StateConflict(_)));
    }

    #[tokio::test]
    async fn test_reveal_sets_gender_and_date() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![config_model(false, None, None)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![config_model(true, Some(Gender::Girl), None)]])
            .into_connection();

        let config = RevealService::new(Arc::new(db)).reveal(Gender::Girl).await.unwrap();
        assert!(config.is_revealed);
        assert_eq!(config.revealed_gender, Some(Gender::Girl));
        assert!(config.reveal_date.is_some());
    }

    #[tokio::test]
    async fn test_reveal_update_casts_gender_to_enum() {
        // 揭晓 UPDATE 对 revealed_gender 的赋值必须带枚举 CAST
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![config_model(false, None, None)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![config_model(true, Some(Gender::Boy), None)]])
            .into_connection();

        let service = RevealService::new(Arc::new(db));
        service.reveal(Gender::Boy).await.unwrap();

        let log = Arc::try_unwrap(service.pool).unwrap().into_transaction_log();
        let update = format!("{:?}", log[1]);
        assert!(update.contains("UPDATE"), "{update}");
        assert!(update.contains("CAST"), "{update}");
        assert!(update.contains("gender"), "{update}");
    }

    #[tokio::test]
    async fn test_draw_requires_reveal_first() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![config_model(false, None, None)]])
            .into_connection();

        let err = RevealService::new(Arc::new(db)).draw_winner().await.unwrap_err();
        assert!(matches!(err, AppError::StateConflict(_)));
    }

    #[tokio::test]
    async fn test_draw_rejected_when_winner_already_drawn() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![config_model(true, Some(Gender::Boy), Some(42))]])
            .into_connection();

        let err = RevealService::new(Arc::new(db)).draw_winner().await.unwrap_err();
        assert!(matches!(err, AppError::StateConflict(_)));
    }

    #[tokio::test]
    async fn test_draw_rejected_with_empty_pool() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![config_model(true, Some(Gender::Boy), None)]])
            .append_query_results([Vec::<bets::Model>::new()])
            .into_connection();

        let err = RevealService::new(Arc::new(db)).draw_winner().await.unwrap_err();
        assert!(matches!(err, AppError::StateConflict(_)));
    }

    #[tokio::test]
    async fn test_draw_splits_pool_over_all_paid_bets() {
        // 合格奖池只有押 BOY 的一注，但奖金按全部已付款注(1000)计算
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![config_model(true, Some(Gender::Boy), None)]])
            .append_query_results([vec![bet_model(1, 7, Gender::Boy, 200)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![user_model(7)]])
            .append_query_results([vec![
                bet_model(1, 7, Gender::Boy, 200),
                bet_model(2, 8, Gender::Girl, 200),
                bet_model(3, 9, Gender::Girl, 200),
                bet_model(4, 10, Gender::Girl, 200),
                bet_model(5, 11, Gender::Girl, 200),
            ]])
            .into_connection();

        let result = RevealService::new(Arc::new(db)).draw_winner().await.unwrap();
        assert_eq!(result.winner.id, 7);
        assert_eq!(result.total_pool, 1000);
        assert_eq!(result.fee, 100);
        assert_eq!(result.winner_prize, 900);
        assert_eq!(result.fee + result.winner_prize, result.total_pool);
        assert_eq!(result.total_participants, 1);
    }

    #[tokio::test]
    async fn test_draw_lost_race_maps_to_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![config_model(true, Some(Gender::Boy), None)]])
            .append_query_results([vec![bet_model(1, 7, Gender::Boy, 200)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = RevealService::new(Arc::new(db)).draw_winner().await.unwrap_err();
        assert!(matches!(err, AppError::StateConflict(_)));
    }

    #[tokio::test]
    async fn test_update_predictions() {
        let mut updated = config_model(false, None, None);
        updated.dad_prediction = Some(Gender::Boy);
        updated.mom_prediction = Some(Gender::Girl);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![config_model(false, None, None)]])
            .append_query_results([vec![updated]])
            .into_connection();

        let config = RevealService::new(Arc::new(db))
            .update_predictions(UpdatePredictionsRequest {
                dad_prediction: Some(Gender::Boy),
                mom_prediction: Some(Gender::Girl),
            })
            .await
            .unwrap();
        assert_eq!(config.dad_prediction, Some(Gender::Boy));
        assert_eq!(config.mom_prediction, Some(Gender::Girl));
    }
}

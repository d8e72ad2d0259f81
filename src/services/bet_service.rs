use crate::database::DbPool;
use crate::entities::{bet_entity as bets, reveal_config_entity as reveal_configs, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::middlewares::AuthContext;
use crate::models::{
    BetResponse, BetStatsResponse, GenderTotals, ParticipantResponse, PlaceBetRequest,
    FIXED_STAKE, TICKETS_PER_BET,
};
use crate::models::Gender;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use std::collections::HashMap;

const DEFAULT_PAYMENT_METHOD: &str = "bank_transfer";

pub struct BetService {
    pool: DbPool,
}

impl BetService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 下注。按顺序校验：未揭晓、本人未下过注，然后落库。
    /// 检查-插入之间的并发竞争由 bets.user_id 唯一索引兜底，
    /// 撞唯一索引与先发现已有注返回同一个错误。
    pub async fn place_bet(
        &self,
        auth: &AuthContext,
        request: PlaceBetRequest,
    ) -> AppResult<BetResponse> {
        let config = reveal_configs::Entity::find().one(self.pool.as_ref()).await?;
        if config.map(|c| c.is_revealed).unwrap_or(false) {
            return Err(AppError::StateConflict(
                "Betting is closed - gender already revealed".to_string(),
            ));
        }

        let existing = bets::Entity::find()
            .filter(bets::Column::UserId.eq(auth.user_id))
            .one(self.pool.as_ref())
            .await?;
        if existing.is_some() {
            return Err(AppError::StateConflict(
                "You have already placed a bet".to_string(),
            ));
        }

        let bet = bets::ActiveModel {
            user_id: Set(auth.user_id),
            gender: Set(request.gender),
            amount: Set(FIXED_STAKE),
            ticket_count: Set(TICKETS_PER_BET),
            payment_method: Set(request
                .payment_method
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string())),
            is_paid: Set(false),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::StateConflict("You have already placed a bet".to_string())
            }
            _ => AppError::DatabaseError(e),
        })?;

        log::info!("Bet placed: user {} -> {}", auth.user_id, bet.gender);

        let owner = users::Entity::find_by_id(auth.user_id).one(self.pool.as_ref()).await?;
        let response = BetResponse::from(bet);
        Ok(match owner {
            Some(u) => response.with_owner(u.name, u.email),
            None => response,
        })
    }

    /// 当前用户的下注记录（倒序）
    pub async fn my_bets(&self, user_id: i64) -> AppResult<Vec<BetResponse>> {
        let list = bets::Entity::find()
            .filter(bets::Column::UserId.eq(user_id))
            .order_by_desc(bets::Column::CreatedAt)
            .all(self.pool.as_ref())
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 全部下注统计（含未付款），按性别汇总金额与注数
    pub async fn stats(&self) -> AppResult<BetStatsResponse> {
        let all = bets::Entity::find().all(self.pool.as_ref()).await?;

        let mut boy = GenderTotals {
            total_amount: 0,
            total_tickets: 0,
        };
        let mut girl = GenderTotals {
            total_amount: 0,
            total_tickets: 0,
        };
        for bet in &all {
            let totals = match bet.gender {
                Gender::Boy => &mut boy,
                Gender::Girl => &mut girl,
            };
            totals.total_amount += bet.amount;
            totals.total_tickets += bet.ticket_count;
        }

        let total_users = users::Entity::find().count(self.pool.as_ref()).await? as i64;

        Ok(BetStatsResponse {
            boy,
            girl,
            total_users,
        })
    }

    /// 公开参与者列表：每个用户连同其 0 或 1 笔下注，未下注 gender 为 null
    pub async fn participants(&self) -> AppResult<Vec<ParticipantResponse>> {
        let all_users = users::Entity::find().all(self.pool.as_ref()).await?;
        let all_bets = bets::Entity::find().all(self.pool.as_ref()).await?;

        let gender_by_user: HashMap<i64, Gender> =
            all_bets.into_iter().map(|b| (b.user_id, b.gender)).collect();

        Ok(all_users
            .into_iter()
            .map(|u| ParticipantResponse {
                gender: gender_by_user.get(&u.id).copied(),
                id: u.id,
                name: u.name,
                avatar_url: u.avatar_url,
            })
            .collect())
    }

    /// 管理端：全部下注记录，带下注人姓名与邮箱（倒序）
    pub async fn all_bets(&self) -> AppResult<Vec<BetResponse>> {
        let all_bets = bets::Entity::find()
            .order_by_desc(bets::Column::CreatedAt)
            .all(self.pool.as_ref())
            .await?;
        let all_users = users::Entity::find().all(self.pool.as_ref()).await?;

        let owners: HashMap<i64, (String, String)> = all_users
            .into_iter()
            .map(|u| (u.id, (u.name, u.email)))
            .collect();

        Ok(all_bets
            .into_iter()
            .map(|b| {
                let owner = owners.get(&b.user_id).cloned();
                let response = BetResponse::from(b);
                match owner {
                    Some((name, email)) => response.with_owner(name, email),
                    None => response,
                }
            })
            .collect())
    }

    /// 管理员确认付款。无条件置位，重复确认是无害的空操作。
    pub async fn confirm_payment(&self, bet_id: i64) -> AppResult<BetResponse> {
        let bet = bets::Entity::find_by_id(bet_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Bet not found".to_string()))?;

        let mut am = bet.into_active_model();
        am.is_paid = Set(true);
        let updated = am.update(self.pool.as_ref()).await?;

        Ok(updated.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn auth(user_id: i64) -> AuthContext {
        AuthContext {
            user_id,
            user_email: format!("user{user_id}@example.com"),
        }
    }

    fn config_model(is_revealed: bool) -> reveal_configs::Model {
        reveal_configs::Model {
            id: 1,
            revealed_gender: if is_revealed { Some(Gender::Boy) } else { None },
            is_revealed,
            reveal_date: None,
            winner_id: None,
            dad_prediction: None,
            mom_prediction: None,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    fn bet_model(id: i64, user_id: i64, gender: Gender, is_paid: bool) -> bets::Model {
        bets::Model {
            id,
            user_id,
            gender,
            amount: FIXED_STAKE,
            ticket_count: TICKETS_PER_BET,
            payment_method: "bank_transfer".to_string(),
            is_paid,
            created_at: Some(Utc::now()),
        }
    }

    fn user_model(id: i64, name: &str) -> users::Model {
        users::Model {
            id,
            email: format!("user{id}@example.com"),
            name: name.to_string(),
            avatar_url: None,
            provider: "google".to_string(),
            provider_id: format!("sub-{id}"),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    fn request(gender: Gender) -> PlaceBetRequest {
        PlaceBetRequest {
            gender,
            payment_method: None,
        }
    }

    #[tokio::test]
    async fn test_place_bet_rejected_after_reveal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![config_model(true)]])
            .into_connection();

        let err = BetService::new(Arc::new(db))
            .place_bet(&auth(1), request(Gender::Girl))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StateConflict(_)));
    }

    #[tokio::test]
    async fn test_place_bet_rejects_second_wager() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![config_model(false)]])
            .append_query_results([vec![bet_model(5, 1, Gender::Boy, false)]])
            .into_connection();

        let err = BetService::new(Arc::new(db))
            .place_bet(&auth(1), request(Gender::Girl))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StateConflict(_)));
    }

    #[tokio::test]
    async fn test_place_bet_uses_fixed_stake() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<reveal_configs::Model>::new()])
            .append_query_results([Vec::<bets::Model>::new()])
            .append_query_results([vec![bet_model(1, 1, Gender::Boy, false)]])
            .append_query_results([vec![user_model(1, "Guest")]])
            .into_connection();

        let bet = BetService::new(Arc::new(db))
            .place_bet(&auth(1), request(Gender::Boy))
            .await
            .unwrap();
        assert_eq!(bet.amount, 200);
        assert_eq!(bet.ticket_count, 1);
        assert!(!bet.is_paid);
        assert_eq!(bet.user_name.as_deref(), Some("Guest"));
    }

    #[tokio::test]
    async fn test_participants_project_null_without_bet() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model(1, "Alice"), user_model(2, "Bob")]])
            .append_query_results([vec![bet_model(1, 1, Gender::Boy, true)]])
            .into_connection();

        let list = BetService::new(Arc::new(db)).participants().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].gender, Some(Gender::Boy));
        assert_eq!(list[1].gender, None);
    }

    #[tokio::test]
    async fn test_stats_counts_unpaid_bets_too() {
        let count_row = vec![std::collections::BTreeMap::from([(
            "num_items",
            sea_orm::Value::BigInt(Some(3)),
        )])];
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                bet_model(1, 1, Gender::Boy, true),
                bet_model(2, 2, Gender::Boy, false),
                bet_model(3, 3, Gender::Girl, false),
            ]])
            .append_query_results([count_row])
            .into_connection();

        let stats = BetService::new(Arc::new(db)).stats().await.unwrap();
        assert_eq!(stats.boy.total_amount, 400);
        assert_eq!(stats.boy.total_tickets, 2);
        assert_eq!(stats.girl.total_amount, 200);
        assert_eq!(stats.girl.total_tickets, 1);
        assert_eq!(stats.total_users, 3);
    }

    #[tokio::test]
    async fn test_confirm_payment_is_idempotent() {
        // 对已付款的注再次确认：不报错，is_paid 保持 true
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![bet_model(9, 1, Gender::Boy, true)]])
            .append_query_results([vec![bet_model(9, 1, Gender::Boy, true)]])
            .into_connection();

        let bet = BetService::new(Arc::new(db)).confirm_payment(9).await.unwrap();
        assert!(bet.is_paid);
    }

    #[tokio::test]
    async fn test_confirm_payment_unknown_bet_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<bets::Model>::new()])
            .into_connection();

        let err = BetService::new(Arc::new(db)).confirm_payment(404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

use crate::middlewares::AuthContext;
use crate::models::*;
use crate::services::BetService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/bets",
    tag = "bets",
    request_body = PlaceBetRequest,
    responses(
        (status = 201, description = "下注成功", body = BetResponse),
        (status = 400, description = "已揭晓或已下过注"),
        (status = 401, description = "未登录")
    )
)]
/// 下注：固定 200 一注、每人一注，揭晓后关闭
pub async fn place_bet(
    bet_service: web::Data<BetService>,
    auth: AuthContext,
    request: web::Json<PlaceBetRequest>,
) -> Result<HttpResponse> {
    match bet_service.place_bet(&auth, request.into_inner()).await {
        Ok(bet) => Ok(HttpResponse::Created().json(json!({
            "message": "Bet created successfully",
            "bet": bet
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/bets/my-bets",
    tag = "bets",
    responses(
        (status = 200, description = "当前用户的下注记录", body = [BetResponse]),
        (status = 401, description = "未登录")
    )
)]
pub async fn my_bets(
    bet_service: web::Data<BetService>,
    auth: AuthContext,
) -> Result<HttpResponse> {
    match bet_service.my_bets(auth.user_id).await {
        Ok(bets) => Ok(HttpResponse::Ok().json(json!({ "bets": bets }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/bets/stats",
    tag = "bets",
    responses(
        (status = 200, description = "按性别汇总的下注统计", body = BetStatsResponse)
    )
)]
pub async fn stats(bet_service: web::Data<BetService>) -> Result<HttpResponse> {
    match bet_service.stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(stats)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/bets/participants",
    tag = "bets",
    responses(
        (status = 200, description = "公开参与者列表", body = [ParticipantResponse])
    )
)]
pub async fn participants(bet_service: web::Data<BetService>) -> Result<HttpResponse> {
    match bet_service.participants().await {
        Ok(participants) => Ok(HttpResponse::Ok().json(json!({ "participants": participants }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn bet_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bets")
            .route("", web::post().to(place_bet))
            .route("/my-bets", web::get().to(my_bets))
            .route("/stats", web::get().to(stats))
            .route("/participants", web::get().to(participants)),
    );
}

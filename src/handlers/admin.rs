use crate::middlewares::AdminContext;
use crate::models::*;
use crate::services::{BetService, RevealService};
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/admin/reveal-status",
    tag = "admin",
    responses(
        (status = 200, description = "当前揭晓状态（不存在时懒创建）", body = RevealConfigResponse)
    )
)]
/// 公开端点：前端首页也要靠它判断是否已揭晓
pub async fn reveal_status(reveal_service: web::Data<RevealService>) -> Result<HttpResponse> {
    match reveal_service.reveal_status().await {
        Ok(config) => Ok(HttpResponse::Ok().json(json!({ "config": config }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/reveal",
    tag = "admin",
    request_body = RevealRequest,
    responses(
        (status = 200, description = "揭晓成功", body = RevealConfigResponse),
        (status = 400, description = "已经揭晓过"),
        (status = 403, description = "非管理员")
    )
)]
pub async fn reveal(
    reveal_service: web::Data<RevealService>,
    _admin: AdminContext,
    request: web::Json<RevealRequest>,
) -> Result<HttpResponse> {
    match reveal_service.reveal(request.gender).await {
        Ok(config) => Ok(HttpResponse::Ok().json(json!({
            "message": "Gender revealed successfully",
            "config": config
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/draw-winner",
    tag = "admin",
    responses(
        (status = 200, description = "开奖成功", body = DrawWinnerResponse),
        (status = 400, description = "未揭晓、已开过奖或没有合格的注"),
        (status = 403, description = "非管理员")
    )
)]
/// 在猜对且已付款的注里等概率抽一位得主，并按全部已付款注结算奖金
pub async fn draw_winner(
    reveal_service: web::Data<RevealService>,
    _admin: AdminContext,
) -> Result<HttpResponse> {
    match reveal_service.draw_winner().await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({
            "message": "Winner drawn successfully",
            "winner": result.winner,
            "totalPool": result.total_pool,
            "fee": result.fee,
            "winnerPrize": result.winner_prize,
            "totalParticipants": result.total_participants
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/predictions",
    tag = "admin",
    request_body = UpdatePredictionsRequest,
    responses(
        (status = 200, description = "预测更新成功", body = RevealConfigResponse),
        (status = 403, description = "非管理员")
    )
)]
pub async fn update_predictions(
    reveal_service: web::Data<RevealService>,
    _admin: AdminContext,
    request: web::Json<UpdatePredictionsRequest>,
) -> Result<HttpResponse> {
    match reveal_service.update_predictions(request.into_inner()).await {
        Ok(config) => Ok(HttpResponse::Ok().json(json!({
            "message": "Predictions updated",
            "config": config
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/all-bets",
    tag = "admin",
    responses(
        (status = 200, description = "全部下注记录", body = [BetResponse]),
        (status = 403, description = "非管理员")
    )
)]
pub async fn all_bets(
    bet_service: web::Data<BetService>,
    _admin: AdminContext,
) -> Result<HttpResponse> {
    match bet_service.all_bets().await {
        Ok(bets) => Ok(HttpResponse::Ok().json(json!({ "bets": bets }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/confirm-payment/{bet_id}",
    tag = "admin",
    params(
        ("bet_id" = i64, Path, description = "下注记录 id")
    ),
    responses(
        (status = 200, description = "付款确认成功", body = BetResponse),
        (status = 403, description = "非管理员"),
        (status = 404, description = "下注记录不存在")
    )
)]
pub async fn confirm_payment(
    bet_service: web::Data<BetService>,
    _admin: AdminContext,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match bet_service.confirm_payment(path.into_inner()).await {
        Ok(bet) => Ok(HttpResponse::Ok().json(json!({
            "message": "Payment confirmed",
            "bet": bet
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/reveal-status", web::get().to(reveal_status))
            .route("/reveal", web::post().to(reveal))
            .route("/draw-winner", web::post().to(draw_winner))
            .route("/predictions", web::post().to(update_predictions))
            .route("/all-bets", web::get().to(all_bets))
            .route("/confirm-payment/{bet_id}", web::patch().to(confirm_payment)),
    );
}

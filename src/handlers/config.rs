use crate::config::Config;
use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use serde_json::json;

#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    responses(
        (status = 200, description = "前端启动所需的非敏感配置")
    )
)]
/// 只暴露非敏感配置：Google client id 与管理员邮箱列表
pub async fn public_config(config: web::Data<Config>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "googleClientId": config.google.client_id,
        "adminEmails": config.admin.admin_emails(),
    })))
}

pub async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

pub fn config_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/config", web::get().to(public_config));
}

use crate::middlewares::{auth::SESSION_USER_ID, set_session_identity};
use crate::models::*;
use crate::services::AuthService;
use actix_session::Session;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/auth/google",
    tag = "auth",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "登录成功", body = UserResponse),
        (status = 400, description = "缺少 token"),
        (status = 401, description = "token 校验失败")
    )
)]
/// Google 登录：用 ID token 换取 session cookie，首次登录时懒创建用户
pub async fn google_login(
    auth_service: web::Data<AuthService>,
    session: Session,
    request: web::Json<GoogleLoginRequest>,
) -> Result<HttpResponse> {
    match auth_service.login_with_google(&request.token).await {
        Ok(user) => {
            if let Err(e) = set_session_identity(&session, user.id, &user.email) {
                return Ok(e.error_response());
            }
            Ok(HttpResponse::Ok().json(json!({
                "message": "Login successful",
                "user": user
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "登出成功")
    )
)]
pub async fn logout(session: Session) -> Result<HttpResponse> {
    session.purge();
    Ok(HttpResponse::Ok().json(json!({ "message": "Logout successful" })))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "当前用户；匿名访问时 user 为 null", body = UserResponse),
        (status = 404, description = "session 指向的用户不存在")
    )
)]
/// 匿名访问不报 401，返回 {"user": null} 方便前端探测登录态
pub async fn me(auth_service: web::Data<AuthService>, session: Session) -> Result<HttpResponse> {
    let user_id = session.get::<i64>(SESSION_USER_ID).ok().flatten();

    match user_id {
        None => Ok(HttpResponse::Ok().json(json!({ "user": null }))),
        Some(id) => match auth_service.get_user(id).await {
            Ok(user) => Ok(HttpResponse::Ok().json(json!({ "user": user }))),
            Err(e) => Ok(e.error_response()),
        },
    }
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/google", web::post().to(google_login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}

use crate::config::Config;
use crate::error::AppError;
use actix_session::{Session, SessionExt};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

pub const SESSION_USER_ID: &str = "user_id";
pub const SESSION_USER_EMAIL: &str = "user_email";

/// 登录成功后写入 session 的身份信息
pub fn set_session_identity(session: &Session, user_id: i64, user_email: &str) -> Result<(), AppError> {
    session
        .insert(SESSION_USER_ID, user_id)
        .map_err(|e| AppError::InternalError(format!("Failed to write session: {e}")))?;
    session
        .insert(SESSION_USER_EMAIL, user_email)
        .map_err(|e| AppError::InternalError(format!("Failed to write session: {e}")))?;
    Ok(())
}

/// 显式的请求身份上下文，业务逻辑只依赖它而不读全局状态
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub user_email: String,
}

fn auth_from_request(req: &HttpRequest) -> Result<AuthContext, AppError> {
    let session = req.get_session();
    let user_id = session.get::<i64>(SESSION_USER_ID).ok().flatten();
    let user_email = session.get::<String>(SESSION_USER_EMAIL).ok().flatten();

    match (user_id, user_email) {
        (Some(user_id), Some(user_email)) => Ok(AuthContext {
            user_id,
            user_email,
        }),
        _ => Err(AppError::AuthError(
            "Unauthorized - Please login first".to_string(),
        )),
    }
}

impl FromRequest for AuthContext {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(auth_from_request(req))
    }
}

/// 管理员上下文：已登录且 session 邮箱出现在配置的白名单中
#[derive(Debug, Clone)]
pub struct AdminContext(pub AuthContext);

impl FromRequest for AdminContext {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = auth_from_request(req).and_then(|auth| {
            let config = req
                .app_data::<web::Data<Config>>()
                .ok_or_else(|| AppError::InternalError("Config not registered".to_string()))?;
            if config.admin.is_admin(&auth.user_email) {
                Ok(AdminContext(auth))
            } else {
                Err(AppError::Forbidden)
            }
        });
        ready(result)
    }
}

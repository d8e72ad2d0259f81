use crate::config::GoogleConfig;
use crate::error::{AppError, AppResult};
use reqwest::Client;
use serde::Deserialize;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// tokeninfo 端点返回的我们关心的字段
#[derive(Debug, Deserialize)]
pub struct GoogleTokenInfo {
    pub aud: String,
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// ID token 校验委托给 Google 的 tokeninfo 端点，
/// 本地只核对 audience 与必要字段
#[derive(Clone)]
pub struct GoogleAuthService {
    client: Client,
    config: GoogleConfig,
}

impl GoogleAuthService {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub async fn verify_id_token(&self, token: &str) -> AppResult<GoogleTokenInfo> {
        let response = self
            .client
            .get(TOKENINFO_URL)
            .query(&[("id_token", token)])
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::warn!("Google token verification rejected: {}", error_text);
            return Err(AppError::AuthError("Invalid token".to_string()));
        }

        let info: GoogleTokenInfo = response.json().await?;

        if info.aud != self.config.client_id {
            log::warn!("Google token audience mismatch: {}", info.aud);
            return Err(AppError::AuthError("Invalid token audience".to_string()));
        }

        if info.email.is_none() {
            return Err(AppError::AuthError("Invalid token payload".to_string()));
        }

        Ok(info)
    }
}

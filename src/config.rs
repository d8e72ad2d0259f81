use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub google: GoogleConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    /// 仅在 HTTPS 下发送 Cookie，生产环境应开启
    #[serde(default)]
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub client_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminConfig {
    /// 管理员邮箱白名单，逗号分隔
    #[serde(default)]
    pub emails: String,
}

impl AdminConfig {
    pub fn admin_emails(&self) -> Vec<String> {
        self.emails
            .split(',')
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect()
    }

    pub fn is_admin(&self, email: &str) -> bool {
        self.admin_emails().iter().any(|e| e == email)
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("解析配置文件失败: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // 数据库 URL 在无配置文件时必须提供
                let database_url = get_env("DATABASE_URL")
                    .ok_or("缺少 DATABASE_URL 环境变量，且未找到配置文件 config.toml")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 3000u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    session: SessionConfig {
                        secret: get_env("SESSION_SECRET").unwrap_or_else(|| {
                            "insecure-dev-session-secret-change-me-in-production".to_string()
                        }),
                        cookie_secure: get_env_parse("SESSION_COOKIE_SECURE", false),
                    },
                    google: GoogleConfig {
                        client_id: get_env("GOOGLE_CLIENT_ID").unwrap_or_default(),
                    },
                    admin: AdminConfig {
                        emails: get_env("ADMIN_EMAILS").unwrap_or_default(),
                    },
                }
            }
            Err(e) => {
                return Err(format!("无法读取配置文件 {config_path}: {e}").into());
            }
        };

        // 环境变量覆盖（文件存在时也生效）
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT") {
            if let Ok(p) = v.parse() {
                config.server.port = p;
            }
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS") {
            if let Ok(mc) = v.parse() {
                config.database.max_connections = mc;
            }
        }
        if let Ok(v) = env::var("SESSION_SECRET") {
            config.session.secret = v;
        }
        if let Ok(v) = env::var("SESSION_COOKIE_SECURE") {
            if let Ok(b) = v.parse() {
                config.session.cookie_secure = b;
            }
        }
        if let Ok(v) = env::var("GOOGLE_CLIENT_ID") {
            config.google.client_id = v;
        }
        if let Ok(v) = env::var("ADMIN_EMAILS") {
            config.admin.emails = v;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_emails_parsing() {
        let admin = AdminConfig {
            emails: "mom@example.com, dad@example.com ,,".to_string(),
        };
        assert_eq!(
            admin.admin_emails(),
            vec!["mom@example.com".to_string(), "dad@example.com".to_string()]
        );
        assert!(admin.is_admin("dad@example.com"));
        assert!(!admin.is_admin("guest@example.com"));
    }

    #[test]
    fn test_empty_allow_list_rejects_everyone() {
        let admin = AdminConfig::default();
        assert!(admin.admin_emails().is_empty());
        assert!(!admin.is_admin("anyone@example.com"));
    }
}

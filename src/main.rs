use actix_session::{config::PersistentSession, storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{time::Duration, Key};
use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use reveal_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    error::AppError,
    external::GoogleAuthService,
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 外部身份校验
    let google_auth = GoogleAuthService::new(config.google.clone());

    // 服务只构造一次，worker 间通过 Data 句柄共享
    let auth_service = web::Data::new(AuthService::new(pool.clone(), google_auth));
    let bet_service = web::Data::new(BetService::new(pool.clone()));
    let reveal_service = web::Data::new(RevealService::new(pool.clone()));
    let clue_service = web::Data::new(ClueService::new(pool.clone()));
    let symptom_service = web::Data::new(SymptomService::new(pool));

    // session cookie 密钥由配置的 secret 派生
    let session_key = Key::derive_from(config.session.secret.as_bytes());
    let cookie_secure = config.session.cookie_secure;

    let host = config.server.host.clone();
    let port = config.server.port;

    let app_config = web::Data::new(config);

    log::info!("Starting HTTP server at {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(cookie_secure)
                    .cookie_http_only(true)
                    .session_lifecycle(PersistentSession::default().session_ttl(Duration::days(7)))
                    .build(),
            )
            .app_data(app_config.clone())
            .app_data(auth_service.clone())
            .app_data(bet_service.clone())
            .app_data(reveal_service.clone())
            .app_data(clue_service.clone())
            .app_data(symptom_service.clone())
            // 请求体解析失败也返回统一的 {"error": ...}
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(err.to_string()).into()
            }))
            .configure(swagger_config)
            .route("/health", web::get().to(handlers::config::health))
            .service(
                web::scope("/api")
                    .configure(handlers::config_config)
                    .configure(handlers::auth_config)
                    .configure(handlers::bet_config)
                    .configure(handlers::clue_config)
                    .configure(handlers::admin_config)
                    .configure(handlers::symptom_config),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

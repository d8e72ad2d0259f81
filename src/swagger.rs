use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("id"))),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::google_login,
        handlers::auth::logout,
        handlers::auth::me,
        handlers::bet::place_bet,
        handlers::bet::my_bets,
        handlers::bet::stats,
        handlers::bet::participants,
        handlers::admin::reveal_status,
        handlers::admin::reveal,
        handlers::admin::draw_winner,
        handlers::admin::update_predictions,
        handlers::admin::all_bets,
        handlers::admin::confirm_payment,
        handlers::clue::list_clues,
        handlers::clue::create_clue,
        handlers::clue::update_clue,
        handlers::clue::delete_clue,
        handlers::symptom::list_symptoms,
        handlers::symptom::init_symptoms,
        handlers::symptom::create_symptom,
        handlers::symptom::update_symptom,
        handlers::symptom::toggle_symptom,
        handlers::symptom::delete_symptom,
        handlers::symptom::clear_symptoms,
        handlers::config::public_config,
    ),
    components(
        schemas(
            Gender,
            ClueType,
            GoogleLoginRequest,
            UserResponse,
            WinnerProfile,
            PlaceBetRequest,
            BetResponse,
            GenderTotals,
            BetStatsResponse,
            ParticipantResponse,
            RevealRequest,
            UpdatePredictionsRequest,
            RevealConfigResponse,
            DrawWinnerResponse,
            CreateClueRequest,
            UpdateClueRequest,
            ClueResponse,
            CreateSymptomRequest,
            UpdateSymptomRequest,
            ToggleSymptomRequest,
            SymptomResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Google 登录与 session 管理"),
        (name = "bets", description = "下注、统计与参与者"),
        (name = "admin", description = "揭晓、开奖与付款确认"),
        (name = "clues", description = "线索管理"),
        (name = "symptoms", description = "孕徵管理"),
        (name = "config", description = "公开配置"),
    ),
    info(
        title = "Gender Reveal Party API",
        version = "1.0.0",
        description = "性别揭晓派对下注后端 REST API"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

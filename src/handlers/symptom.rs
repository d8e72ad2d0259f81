use crate::middlewares::AdminContext;
use crate::models::*;
use crate::services::SymptomService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/symptoms",
    tag = "symptoms",
    responses(
        (status = 200, description = "孕徵列表", body = [SymptomResponse])
    )
)]
pub async fn list_symptoms(symptom_service: web::Data<SymptomService>) -> Result<HttpResponse> {
    match symptom_service.list().await {
        Ok(symptoms) => Ok(HttpResponse::Ok().json(json!({ "symptoms": symptoms }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/symptoms/init",
    tag = "symptoms",
    responses(
        (status = 201, description = "预设孕徵已写入", body = [SymptomResponse]),
        (status = 400, description = "已存在孕徵数据"),
        (status = 403, description = "非管理员")
    )
)]
/// 一键播种预设孕徵，已有数据时拒绝
pub async fn init_symptoms(
    symptom_service: web::Data<SymptomService>,
    _admin: AdminContext,
) -> Result<HttpResponse> {
    match symptom_service.seed_defaults().await {
        Ok(symptoms) => Ok(HttpResponse::Created().json(json!({
            "message": format!("Seeded {} default symptoms", symptoms.len()),
            "symptoms": symptoms
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/symptoms",
    tag = "symptoms",
    request_body = CreateSymptomRequest,
    responses(
        (status = 201, description = "创建成功", body = SymptomResponse),
        (status = 403, description = "非管理员")
    )
)]
pub async fn create_symptom(
    symptom_service: web::Data<SymptomService>,
    _admin: AdminContext,
    request: web::Json<CreateSymptomRequest>,
) -> Result<HttpResponse> {
    match symptom_service.create(request.into_inner()).await {
        Ok(symptom) => Ok(HttpResponse::Created().json(json!({
            "message": "Symptom created",
            "symptom": symptom
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/symptoms/{id}",
    tag = "symptoms",
    params(
        ("id" = i64, Path, description = "孕徵 id")
    ),
    request_body = UpdateSymptomRequest,
    responses(
        (status = 200, description = "更新成功", body = SymptomResponse),
        (status = 403, description = "非管理员"),
        (status = 404, description = "孕徵不存在")
    )
)]
pub async fn update_symptom(
    symptom_service: web::Data<SymptomService>,
    _admin: AdminContext,
    path: web::Path<i64>,
    request: web::Json<UpdateSymptomRequest>,
) -> Result<HttpResponse> {
    match symptom_service
        .update(path.into_inner(), request.into_inner())
        .await
    {
        Ok(symptom) => Ok(HttpResponse::Ok().json(json!({
            "message": "Symptom updated",
            "symptom": symptom
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/symptoms/toggle/{id}",
    tag = "symptoms",
    params(
        ("id" = i64, Path, description = "孕徵 id")
    ),
    request_body = ToggleSymptomRequest,
    responses(
        (status = 200, description = "勾选状态已切换", body = SymptomResponse),
        (status = 403, description = "非管理员"),
        (status = 404, description = "孕徵不存在")
    )
)]
pub async fn toggle_symptom(
    symptom_service: web::Data<SymptomService>,
    _admin: AdminContext,
    path: web::Path<i64>,
    request: web::Json<ToggleSymptomRequest>,
) -> Result<HttpResponse> {
    match symptom_service
        .toggle(path.into_inner(), request.into_inner())
        .await
    {
        Ok(symptom) => Ok(HttpResponse::Ok().json(json!({
            "message": "Symptom toggled",
            "symptom": symptom
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/symptoms/{id}",
    tag = "symptoms",
    params(
        ("id" = i64, Path, description = "孕徵 id")
    ),
    responses(
        (status = 200, description = "删除成功"),
        (status = 403, description = "非管理员"),
        (status = 404, description = "孕徵不存在")
    )
)]
pub async fn delete_symptom(
    symptom_service: web::Data<SymptomService>,
    _admin: AdminContext,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match symptom_service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "message": "Symptom deleted" }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/symptoms",
    tag = "symptoms",
    responses(
        (status = 200, description = "全部孕徵已清除"),
        (status = 403, description = "非管理员")
    )
)]
pub async fn clear_symptoms(
    symptom_service: web::Data<SymptomService>,
    _admin: AdminContext,
) -> Result<HttpResponse> {
    match symptom_service.clear().await {
        Ok(deleted) => Ok(HttpResponse::Ok().json(json!({
            "message": format!("Cleared {} symptoms", deleted)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn symptom_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/symptoms")
            .route("", web::get().to(list_symptoms))
            .route("/init", web::post().to(init_symptoms))
            .route("", web::post().to(create_symptom))
            .route("/toggle/{id}", web::patch().to(toggle_symptom))
            .route("/{id}", web::put().to(update_symptom))
            .route("/{id}", web::delete().to(delete_symptom))
            .route("", web::delete().to(clear_symptoms)),
    );
}

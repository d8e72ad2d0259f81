use crate::middlewares::AdminContext;
use crate::models::*;
use crate::services::ClueService;
use actix_web::{web, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/clues",
    tag = "clues",
    responses(
        (status = 200, description = "线索列表", body = [ClueResponse])
    )
)]
pub async fn list_clues(clue_service: web::Data<ClueService>) -> Result<HttpResponse> {
    match clue_service.list().await {
        Ok(clues) => Ok(HttpResponse::Ok().json(json!({ "clues": clues }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/clues",
    tag = "clues",
    request_body = CreateClueRequest,
    responses(
        (status = 201, description = "创建成功", body = ClueResponse),
        (status = 403, description = "非管理员")
    )
)]
pub async fn create_clue(
    clue_service: web::Data<ClueService>,
    _admin: AdminContext,
    request: web::Json<CreateClueRequest>,
) -> Result<HttpResponse> {
    match clue_service.create(request.into_inner()).await {
        Ok(clue) => Ok(HttpResponse::Created().json(json!({
            "message": "Clue created",
            "clue": clue
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/clues/{id}",
    tag = "clues",
    params(
        ("id" = i64, Path, description = "线索 id")
    ),
    request_body = UpdateClueRequest,
    responses(
        (status = 200, description = "更新成功", body = ClueResponse),
        (status = 403, description = "非管理员"),
        (status = 404, description = "线索不存在")
    )
)]
pub async fn update_clue(
    clue_service: web::Data<ClueService>,
    _admin: AdminContext,
    path: web::Path<i64>,
    request: web::Json<UpdateClueRequest>,
) -> Result<HttpResponse> {
    match clue_service
        .update(path.into_inner(), request.into_inner())
        .await
    {
        Ok(clue) => Ok(HttpResponse::Ok().json(json!({
            "message": "Clue updated",
            "clue": clue
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/clues/{id}",
    tag = "clues",
    params(
        ("id" = i64, Path, description = "线索 id")
    ),
    responses(
        (status = 200, description = "删除成功"),
        (status = 403, description = "非管理员"),
        (status = 404, description = "线索不存在")
    )
)]
pub async fn delete_clue(
    clue_service: web::Data<ClueService>,
    _admin: AdminContext,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match clue_service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "message": "Clue deleted" }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn clue_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/clues")
            .route("", web::get().to(list_clues))
            .route("", web::post().to(create_clue))
            .route("/{id}", web::put().to(update_clue))
            .route("/{id}", web::delete().to(delete_clue)),
    );
}

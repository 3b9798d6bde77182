// src/handlers/entregas.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    common::{
        error::AppError,
        extract::{IdPath, ValidatedJson, ValidatedQuery},
    },
    config::AppState,
    models::entrega::{
        AtualizarEntrega, AtualizarStatus, CriarEntrega, EntregasQuery, SubstituirEntrega,
    },
};

pub async fn create_entrega(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CriarEntrega>,
) -> Result<impl IntoResponse, AppError> {
    let entrega = app_state.entrega_service.create_entrega(payload).await?;
    Ok((StatusCode::CREATED, Json(entrega)))
}

// GET /entregas?status=EM_TRANSITO
pub async fn list_entregas(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<EntregasQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entregas = app_state.entrega_service.list_entregas(query.status).await?;
    Ok((StatusCode::OK, Json(entregas)))
}

pub async fn list_by_endereco(
    State(app_state): State<AppState>,
    IdPath(endereco_id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let entregas = app_state
        .entrega_service
        .list_by_endereco(endereco_id)
        .await?;
    Ok((StatusCode::OK, Json(entregas)))
}

pub async fn get_entrega(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let entrega = app_state.entrega_service.get_entrega(id).await?;
    Ok((StatusCode::OK, Json(entrega)))
}

pub async fn update_entrega(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<AtualizarEntrega>,
) -> Result<impl IntoResponse, AppError> {
    let entrega = app_state.entrega_service.update_entrega(id, payload).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "mensagem": "Entrega atualizada com sucesso", "entrega": entrega })),
    ))
}

pub async fn replace_entrega(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<SubstituirEntrega>,
) -> Result<impl IntoResponse, AppError> {
    let entrega = app_state.entrega_service.replace_entrega(id, payload).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "mensagem": "Entrega substituída com sucesso", "entrega": entrega })),
    ))
}

pub async fn update_status(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<AtualizarStatus>,
) -> Result<impl IntoResponse, AppError> {
    let entrega = app_state
        .entrega_service
        .update_status(id, payload.status)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "mensagem": "Status da entrega atualizado", "entrega": entrega })),
    ))
}

pub async fn delete_entrega(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    app_state.entrega_service.delete_entrega(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "mensagem": "Entrega excluída com sucesso" })),
    ))
}

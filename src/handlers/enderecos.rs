// src/handlers/enderecos.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    common::{
        error::AppError,
        extract::{IdPath, ValidatedJson},
    },
    config::AppState,
    models::endereco::{AtualizarEndereco, CriarEndereco, SubstituirEndereco},
};

pub async fn create_endereco(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CriarEndereco>,
) -> Result<impl IntoResponse, AppError> {
    let endereco = app_state.endereco_service.create_endereco(payload).await?;
    Ok((StatusCode::CREATED, Json(endereco)))
}

pub async fn list_enderecos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let enderecos = app_state.endereco_service.list_enderecos().await?;
    Ok((StatusCode::OK, Json(enderecos)))
}

pub async fn get_endereco(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let endereco = app_state.endereco_service.get_endereco(id).await?;
    Ok((StatusCode::OK, Json(endereco)))
}

// `clienteId` e `_id` no corpo são ignorados: o tipo do payload não os tem.
pub async fn update_endereco(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<AtualizarEndereco>,
) -> Result<impl IntoResponse, AppError> {
    let endereco = app_state.endereco_service.update_endereco(id, payload).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "mensagem": "Endereço atualizado com sucesso", "endereco": endereco })),
    ))
}

pub async fn replace_endereco(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<SubstituirEndereco>,
) -> Result<impl IntoResponse, AppError> {
    let endereco = app_state.endereco_service.replace_endereco(id, payload).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "mensagem": "Endereço substituído com sucesso", "endereco": endereco })),
    ))
}

pub async fn delete_endereco(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    app_state.endereco_service.delete_endereco(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "mensagem": "Endereço excluído com sucesso" })),
    ))
}

// src/handlers/clientes.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    common::{
        error::AppError,
        extract::{IdPath, ValidatedJson, ValidatedQuery},
    },
    config::AppState,
    models::{
        cliente::{AtualizarCliente, CriarCliente, SubstituirCliente},
        paginacao::PaginacaoQuery,
    },
};

pub async fn create_cliente(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CriarCliente>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.cliente_service.create_cliente(payload).await?;
    Ok((StatusCode::CREATED, Json(cliente)))
}

pub async fn list_clientes(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PaginacaoQuery>,
) -> Result<impl IntoResponse, AppError> {
    let clientes = app_state.cliente_service.list_clientes(query.into()).await?;
    Ok((StatusCode::OK, Json(clientes)))
}

pub async fn get_cliente(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.cliente_service.get_cliente(id).await?;
    Ok((StatusCode::OK, Json(cliente)))
}

pub async fn update_cliente(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<AtualizarCliente>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.cliente_service.update_cliente(id, payload).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "mensagem": "Cliente atualizado com sucesso", "cliente": cliente })),
    ))
}

pub async fn replace_cliente(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<SubstituirCliente>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.cliente_service.replace_cliente(id, payload).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "mensagem": "Cliente substituído com sucesso", "cliente": cliente })),
    ))
}

pub async fn delete_cliente(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    app_state.cliente_service.delete_cliente(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "mensagem": "Cliente excluído com sucesso" })),
    ))
}

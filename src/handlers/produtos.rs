// src/handlers/produtos.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    common::{
        error::AppError,
        extract::{IdPath, ValidatedJson, ValidatedQuery},
    },
    config::AppState,
    models::produto::{
        AlterarEstoque, AtualizarProduto, CriarProduto, ProdutosQuery, SubstituirProduto,
    },
};

pub async fn create_produto(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CriarProduto>,
) -> Result<impl IntoResponse, AppError> {
    let produto = app_state.produto_service.create_produto(payload).await?;
    Ok((StatusCode::CREATED, Json(produto)))
}

// GET /produtos?pagina=1&limite=10&emEstoque=true
pub async fn list_produtos(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ProdutosQuery>,
) -> Result<impl IntoResponse, AppError> {
    let produtos = app_state.produto_service.list_produtos(query.into()).await?;
    Ok((StatusCode::OK, Json(produtos)))
}

pub async fn get_produto(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let produto = app_state.produto_service.get_produto(id).await?;
    Ok((StatusCode::OK, Json(produto)))
}

pub async fn update_produto(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<AtualizarProduto>,
) -> Result<impl IntoResponse, AppError> {
    let produto = app_state.produto_service.update_produto(id, payload).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "mensagem": "Produto atualizado com sucesso", "produto": produto })),
    ))
}

pub async fn replace_produto(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<SubstituirProduto>,
) -> Result<impl IntoResponse, AppError> {
    let produto = app_state.produto_service.replace_produto(id, payload).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "mensagem": "Produto substituído com sucesso", "produto": produto })),
    ))
}

pub async fn delete_produto(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    app_state.produto_service.delete_produto(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "mensagem": "Produto excluído com sucesso" })),
    ))
}

pub async fn adjust_stock(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<AlterarEstoque>,
) -> Result<impl IntoResponse, AppError> {
    let produto = app_state
        .produto_service
        .adjust_stock(id, payload.quantidade)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "mensagem": "Estoque atualizado com sucesso", "produto": produto })),
    ))
}

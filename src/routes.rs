// src/routes.rs

use axum::{
    Json, Router,
    http::{Method, Uri},
    middleware as axum_middleware,
    routing::{get, patch},
};
use tower_http::trace::TraceLayer;

use crate::{common::error::AppError, config::AppState, handlers, middleware::auth::basic_auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    let cliente_routes = Router::new()
        .route(
            "/",
            get(handlers::clientes::list_clientes).post(handlers::clientes::create_cliente),
        )
        .route(
            "/{id}",
            get(handlers::clientes::get_cliente)
                .patch(handlers::clientes::update_cliente)
                .put(handlers::clientes::replace_cliente)
                .delete(handlers::clientes::delete_cliente),
        );

    let endereco_routes = Router::new()
        .route(
            "/",
            get(handlers::enderecos::list_enderecos).post(handlers::enderecos::create_endereco),
        )
        .route(
            "/{id}",
            get(handlers::enderecos::get_endereco)
                .patch(handlers::enderecos::update_endereco)
                .put(handlers::enderecos::replace_endereco)
                .delete(handlers::enderecos::delete_endereco),
        );

    let produto_routes = Router::new()
        .route(
            "/",
            get(handlers::produtos::list_produtos).post(handlers::produtos::create_produto),
        )
        .route(
            "/{id}",
            get(handlers::produtos::get_produto)
                .patch(handlers::produtos::update_produto)
                .put(handlers::produtos::replace_produto)
                .delete(handlers::produtos::delete_produto),
        )
        .route("/{id}/estoque", patch(handlers::produtos::adjust_stock));

    let entrega_routes = Router::new()
        .route(
            "/",
            get(handlers::entregas::list_entregas).post(handlers::entregas::create_entrega),
        )
        .route(
            "/{id}",
            get(handlers::entregas::get_entrega)
                .patch(handlers::entregas::update_entrega)
                .put(handlers::entregas::replace_entrega)
                .delete(handlers::entregas::delete_entrega),
        )
        .route("/{id}/status", patch(handlers::entregas::update_status))
        .route("/endereco/{endereco_id}", get(handlers::entregas::list_by_endereco));

    // Tudo sob /api passa pelo Basic auth
    let api_routes = Router::new()
        .nest("/clientes", cliente_routes)
        .nest("/enderecos", endereco_routes)
        .nest("/produtos", produto_routes)
        .nest("/entregas", entrega_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            basic_auth_guard,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", api_routes)
        .fallback(rota_nao_encontrada)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn root() -> Json<&'static str> {
    Json("API de Clientes, Endereços, Produtos e Entregas.")
}

async fn rota_nao_encontrada(method: Method, uri: Uri) -> AppError {
    AppError::not_found(format!("Rota não disponível: {} {}", method, uri.path()))
}

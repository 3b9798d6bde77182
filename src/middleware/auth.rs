// src/middleware/auth.rs

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};

use crate::{common::error::AppError, config::AppState};

// O middleware em si: toda rota sob /api exige o par de credenciais configurado.
pub async fn basic_auth_guard(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();

    if !headers.contains_key(axum::http::header::AUTHORIZATION) {
        return Err(AppError::unauthorized(
            "Credenciais de autenticação são necessárias",
        ));
    }

    let Some(Authorization(basic)) = headers.typed_get::<Authorization<Basic>>() else {
        return Err(AppError::unauthorized(
            "Formato de autenticação inválido. Use Basic Auth",
        ));
    };

    let credenciais = &app_state.credenciais;
    if basic.username() != credenciais.usuario || basic.password() != credenciais.senha {
        tracing::warn!("Tentativa de acesso com credenciais inválidas");
        return Err(AppError::unauthorized("Acesso não autorizado"));
    }

    Ok(next.run(request).await)
}

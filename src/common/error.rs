// src/common/error.rs

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Mensagem devolvida ao cliente para qualquer falha 5xx.
pub const MENSAGEM_ERRO_INTERNO: &str = "Ocorreu um erro interno no servidor.";

// Conjunto fechado de erros da aplicação. Os serviços levantam a variante
// específica no ponto em que detectam o problema; o `IntoResponse` abaixo é o
// único lugar que traduz para HTTP.
#[derive(Debug, Error)]
pub enum AppError {
    // 400: falha semântica (id referenciado ausente, quantidade inválida, ...)
    #[error("{}", .0.join(","))]
    BadRequest(Vec<String>),

    // 400: falha de formato detectada pelo `validator`
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(vec![message.into()])
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::BcryptError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Mensagem principal exposta ao cliente. Erros internos nunca vazam detalhes.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(_) => "Um ou mais campos são inválidos.".to_string(),
            e if e.status_code().is_server_error() => MENSAGEM_ERRO_INTERNO.to_string(),
            e => e.to_string(),
        }
    }

    /// Lista de detalhes (mensagens de validação, ids ausentes, ...).
    pub fn details(&self) -> Vec<String> {
        match self {
            AppError::BadRequest(messages) => messages.clone(),
            AppError::ValidationError(errors) => validation_messages(errors),
            e => vec![e.public_message()],
        }
    }
}

// Achata o `ValidationErrors` em mensagens legíveis, em ordem estável.
fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    messages.sort();
    messages
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            // O detalhe completo fica só no log do servidor.
            tracing::error!("Erro Interno do Servidor: {}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "Erro na requisição: {}", self);
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "message": self.public_message(),
            "errors": self.details(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        if matches!(self, AppError::Unauthorized(_)) {
            return (
                status,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Protected Route\"")],
                body,
            )
                .into_response();
        }

        (status, body).into_response()
    }
}

// src/models/entrega.rs

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::validacao::validate_positive;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "status_entrega", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum StatusEntrega {
    Pendente,   // "PENDENTE"
    EmTransito, // "EM_TRANSITO"
    Entregue,   // "ENTREGUE"
    Cancelada,  // "CANCELADA"
}

impl StatusEntrega {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusEntrega::Pendente => "PENDENTE",
            StatusEntrega::EmTransito => "EM_TRANSITO",
            StatusEntrega::Entregue => "ENTREGUE",
            StatusEntrega::Cancelada => "CANCELADA",
        }
    }

    /// Depois de ENTREGUE ou CANCELADA o conteúdo da entrega não muda mais.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StatusEntrega::Entregue | StatusEntrega::Cancelada)
    }
}

impl fmt::Display for StatusEntrega {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Entrega {
    pub uid: Uuid,
    pub id: i64,
    // Id sequencial do endereço (sem FK, como uma referência de documento)
    pub endereco_entrega_id: i64,
    pub status: StatusEntrega,
    pub data_prevista: DateTime<Utc>,
    pub data_entrega_real: Option<DateTime<Utc>>,
    pub valor_frete: Decimal,
    // Ids sequenciais dos produtos
    pub produtos_nesta_entrega_ids: Vec<i64>,
}

/// Conteúdo gravado na criação e na substituição. O status não faz parte:
/// nasce PENDENTE e só muda por atualização.
#[derive(Debug, Clone)]
pub struct DadosEntrega {
    pub endereco_entrega_id: i64,
    pub data_prevista: DateTime<Utc>,
    pub valor_frete: Decimal,
    pub produtos_nesta_entrega_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct AlteracaoEntrega {
    pub status: Option<StatusEntrega>,
    pub data_prevista: Option<DateTime<Utc>>,
    pub data_entrega_real: Option<DateTime<Utc>>,
    pub valor_frete: Option<Decimal>,
    pub produtos_nesta_entrega_ids: Option<Vec<i64>>,
}

// --- Payloads ---

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CriarEntrega {
    pub endereco_entrega_id: i64,
    pub data_prevista: DateTime<Utc>,
    #[validate(custom(function = "validate_positive"))]
    pub valor_frete: Decimal,
    #[validate(length(min = 1, message = "Informe ao menos um produto."))]
    pub produtos_nesta_entrega_ids: Vec<i64>,
}

pub type SubstituirEntrega = CriarEntrega;

impl From<CriarEntrega> for DadosEntrega {
    fn from(payload: CriarEntrega) -> Self {
        Self {
            endereco_entrega_id: payload.endereco_entrega_id,
            data_prevista: payload.data_prevista,
            valor_frete: payload.valor_frete,
            produtos_nesta_entrega_ids: payload.produtos_nesta_entrega_ids,
        }
    }
}

// PATCH: o endereço de entrega não muda por aqui.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarEntrega {
    pub status: Option<StatusEntrega>,
    pub data_prevista: Option<DateTime<Utc>>,
    pub data_entrega_real: Option<DateTime<Utc>>,
    #[validate(custom(function = "validate_positive"))]
    pub valor_frete: Option<Decimal>,
    #[validate(length(min = 1, message = "Informe ao menos um produto."))]
    pub produtos_nesta_entrega_ids: Option<Vec<i64>>,
}

impl From<AtualizarEntrega> for AlteracaoEntrega {
    fn from(payload: AtualizarEntrega) -> Self {
        Self {
            status: payload.status,
            data_prevista: payload.data_prevista,
            data_entrega_real: payload.data_entrega_real,
            valor_frete: payload.valor_frete,
            produtos_nesta_entrega_ids: payload.produtos_nesta_entrega_ids,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AtualizarStatus {
    pub status: StatusEntrega,
}

// GET /entregas?status=EM_TRANSITO
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EntregasQuery {
    pub status: Option<StatusEntrega>,
}

// --- View ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntregaView {
    pub id: i64,
    pub endereco_entrega_id: i64,
    pub status: StatusEntrega,
    pub data_prevista: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_entrega_real: Option<DateTime<Utc>>,
    pub valor_frete: Decimal,
    pub produtos_nesta_entrega_ids: Vec<i64>,
}

impl From<Entrega> for EntregaView {
    fn from(entrega: Entrega) -> Self {
        Self {
            id: entrega.id,
            endereco_entrega_id: entrega.endereco_entrega_id,
            status: entrega.status,
            data_prevista: entrega.data_prevista,
            data_entrega_real: entrega.data_entrega_real,
            valor_frete: entrega.valor_frete,
            produtos_nesta_entrega_ids: entrega.produtos_nesta_entrega_ids,
        }
    }
}

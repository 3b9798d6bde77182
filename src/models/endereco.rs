// src/models/endereco.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

pub const CLIENTE_JA_POSSUI_ENDERECO: &str = "Cliente já possui endereço.";

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Endereco {
    pub uid: Uuid,
    pub id: i64,
    pub cep: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    // Id opaco do cliente dono (único: no máximo um endereço por cliente)
    pub cliente_id: Uuid,
}

/// Campos gravados na criação e na substituição completa.
#[derive(Debug, Clone)]
pub struct DadosEndereco {
    pub cep: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cliente_id: Uuid,
}

// --- Payloads ---

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CriarEndereco {
    #[validate(length(min = 1, message = "O CEP é obrigatório."))]
    pub cep: String,
    #[validate(length(min = 1, message = "O logradouro é obrigatório."))]
    pub logradouro: String,
    #[validate(length(min = 1, message = "O número é obrigatório."))]
    pub numero: String,
    pub complemento: Option<String>,
    #[validate(length(min = 1, message = "O bairro é obrigatório."))]
    pub bairro: String,
    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    pub cidade: String,
    #[validate(length(min = 1, message = "O estado é obrigatório."))]
    pub estado: String,
    pub cliente_id: Uuid,
}

pub type SubstituirEndereco = CriarEndereco;

impl From<CriarEndereco> for DadosEndereco {
    fn from(payload: CriarEndereco) -> Self {
        Self {
            cep: payload.cep,
            logradouro: payload.logradouro,
            numero: payload.numero,
            complemento: payload.complemento,
            bairro: payload.bairro,
            cidade: payload.cidade,
            estado: payload.estado,
            cliente_id: payload.cliente_id,
        }
    }
}

// Atualização parcial. Não existe `cliente_id` aqui: o dono não muda por PATCH,
// e chaves desconhecidas no JSON são descartadas pelo serde.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AtualizarEndereco {
    #[validate(length(min = 1, message = "O CEP não pode ser vazio."))]
    pub cep: Option<String>,
    #[validate(length(min = 1, message = "O logradouro não pode ser vazio."))]
    pub logradouro: Option<String>,
    #[validate(length(min = 1, message = "O número não pode ser vazio."))]
    pub numero: Option<String>,
    pub complemento: Option<String>,
    #[validate(length(min = 1, message = "O bairro não pode ser vazio."))]
    pub bairro: Option<String>,
    #[validate(length(min = 1, message = "A cidade não pode ser vazia."))]
    pub cidade: Option<String>,
    #[validate(length(min = 1, message = "O estado não pode ser vazio."))]
    pub estado: Option<String>,
}

// --- View ---

// O endereço expõe o próprio id opaco, que é o valor de `enderecoId` no cliente.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnderecoView {
    #[serde(rename = "_id")]
    pub uid: Uuid,
    pub id: i64,
    pub cep: String,
    pub logradouro: String,
    pub numero: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cliente_id: Uuid,
}

impl From<Endereco> for EnderecoView {
    fn from(endereco: Endereco) -> Self {
        Self {
            uid: endereco.uid,
            id: endereco.id,
            cep: endereco.cep,
            logradouro: endereco.logradouro,
            numero: endereco.numero,
            complemento: endereco.complemento,
            bairro: endereco.bairro,
            cidade: endereco.cidade,
            estado: endereco.estado,
            cliente_id: endereco.cliente_id,
        }
    }
}

// src/models/cliente.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

pub const EMAIL_DUPLICADO: &str = "Email já cadastrado.";

// Representa um cliente vindo do banco de dados
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Cliente {
    // Id opaco, gerado pelo banco na inserção
    pub uid: Uuid,
    // Id sequencial, atribuído pela aplicação
    pub id: i64,
    pub nome: String,
    pub email: String,
    // Hash bcrypt; nunca sai em uma view
    pub senha: String,
    pub telefone: Option<String>,
    // Referência de volta para o endereço (1:1)
    pub endereco_id: Option<Uuid>,
    // Listas do cadastro do cliente. Começam vazias, nenhuma rota as altera e
    // a view não as expõe.
    pub produtos_ids: Vec<Uuid>,
    pub entregas_ids: Vec<Uuid>,
}

/// Campos gravados na criação e na substituição completa.
#[derive(Debug, Clone)]
pub struct DadosCliente {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub telefone: Option<String>,
}

/// Campos de uma atualização parcial. `None` mantém o valor atual.
#[derive(Debug, Clone, Default)]
pub struct AlteracaoCliente {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
    pub telefone: Option<String>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate)]
pub struct CriarCliente {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub senha: String,
    pub telefone: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AtualizarCliente {
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub nome: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "A senha não pode ser vazia."))]
    pub senha: Option<String>,
    pub telefone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubstituirCliente {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub senha: String,
    pub telefone: Option<String>,
}

// --- View ---

// O que a API devolve: sem senha e sem o id opaco.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteView {
    pub id: i64,
    pub nome: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endereco_id: Option<Uuid>,
}

impl From<Cliente> for ClienteView {
    fn from(cliente: Cliente) -> Self {
        Self {
            id: cliente.id,
            nome: cliente.nome,
            email: cliente.email,
            telefone: cliente.telefone,
            endereco_id: cliente.endereco_id,
        }
    }
}

// src/models/produto.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    paginacao::Paginacao,
    validacao::validate_not_negative,
};

pub const NOME_PRODUTO_DUPLICADO: &str = "Já existe um produto com este nome.";
pub const ESTOQUE_FORA_DO_LIMITE: &str = "Quantidade excede o limite de estoque.";

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Produto {
    pub uid: Uuid,
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: Decimal,
    // Nunca negativo (CHECK no banco + guarda no serviço)
    pub estoque: i32,
}

#[derive(Debug, Clone)]
pub struct DadosProduto {
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: Decimal,
    pub estoque: i32,
}

#[derive(Debug, Clone, Default)]
pub struct AlteracaoProduto {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub preco: Option<Decimal>,
    pub estoque: Option<i32>,
}

/// Filtro da listagem: só itens com estoque > 0, e a página pedida.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FiltroProdutos {
    pub em_estoque: bool,
    pub paginacao: Paginacao,
}

// --- Payloads ---

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CriarProduto {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    pub descricao: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub preco: Decimal,
    #[validate(range(min = 0, message = "O estoque não pode ser negativo."))]
    pub estoque: i32,
}

pub type SubstituirProduto = CriarProduto;

impl From<CriarProduto> for DadosProduto {
    fn from(payload: CriarProduto) -> Self {
        Self {
            nome: payload.nome,
            descricao: payload.descricao,
            preco: payload.preco,
            estoque: payload.estoque,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AtualizarProduto {
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub nome: Option<String>,
    pub descricao: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub preco: Option<Decimal>,
    #[validate(range(min = 0, message = "O estoque não pode ser negativo."))]
    pub estoque: Option<i32>,
}

impl From<AtualizarProduto> for AlteracaoProduto {
    fn from(payload: AtualizarProduto) -> Self {
        Self {
            nome: payload.nome,
            descricao: payload.descricao,
            preco: payload.preco,
            estoque: payload.estoque,
        }
    }
}

// PATCH /produtos/{id}/estoque: delta positivo repõe, negativo baixa.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AlterarEstoque {
    pub quantidade: i32,
}

// GET /produtos?pagina=1&limite=10&emEstoque=true
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProdutosQuery {
    #[validate(range(min = 1, message = "A página deve ser maior ou igual a 1."))]
    pub pagina: Option<u32>,
    #[validate(range(min = 1, max = 100, message = "O limite deve estar entre 1 e 100."))]
    pub limite: Option<u32>,
    #[serde(default)]
    pub em_estoque: bool,
}

impl From<ProdutosQuery> for FiltroProdutos {
    fn from(query: ProdutosQuery) -> Self {
        Self {
            em_estoque: query.em_estoque,
            paginacao: Paginacao::new(query.pagina, query.limite),
        }
    }
}

// --- View ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoView {
    pub id: i64,
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub preco: Decimal,
    pub estoque: i32,
}

impl From<Produto> for ProdutoView {
    fn from(produto: Produto) -> Self {
        Self {
            id: produto.id,
            nome: produto.nome,
            descricao: produto.descricao,
            preco: produto.preco,
            estoque: produto.estoque,
        }
    }
}

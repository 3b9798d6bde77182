// src/db/repository.rs
//
// Contratos de persistência. Os serviços só conhecem estes traits; o Postgres
// (produção) e o `MemoryStore` (testes) implementam todos eles.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        cliente::{AlteracaoCliente, Cliente, DadosCliente},
        endereco::{AtualizarEndereco, DadosEndereco, Endereco},
        entrega::{AlteracaoEntrega, DadosEntrega, Entrega, StatusEntrega},
        paginacao::Paginacao,
        produto::{AlteracaoProduto, DadosProduto, FiltroProdutos, Produto},
    },
};

/// Coleções que têm uma sequência própria de ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colecao {
    Clientes,
    Enderecos,
    Produtos,
    Entregas,
}

impl Colecao {
    pub fn sequence_name(&self) -> &'static str {
        match self {
            Colecao::Clientes => "clientes_id_seq",
            Colecao::Enderecos => "enderecos_id_seq",
            Colecao::Produtos => "produtos_id_seq",
            Colecao::Entregas => "entregas_id_seq",
        }
    }
}

// Gerador monotônico por coleção: ids começam em 1 e nunca são reaproveitados.
#[async_trait]
pub trait SequenceRepository: Send + Sync {
    async fn next_id(&self, colecao: Colecao) -> Result<i64, AppError>;
}

#[async_trait]
pub trait ClienteRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Cliente>, AppError>;
    async fn find_by_uid(&self, uid: Uuid) -> Result<Option<Cliente>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Cliente>, AppError>;
    async fn list(&self, paginacao: Paginacao) -> Result<Vec<Cliente>, AppError>;
    async fn create(&self, id: i64, dados: DadosCliente) -> Result<Cliente, AppError>;
    async fn update(&self, id: i64, alteracao: AlteracaoCliente) -> Result<Option<Cliente>, AppError>;
    async fn replace(&self, id: i64, dados: DadosCliente) -> Result<Option<Cliente>, AppError>;
    /// Remove o cliente e o endereço que ele possui.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait EnderecoRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Endereco>, AppError>;
    async fn find_by_cliente(&self, cliente_id: Uuid) -> Result<Option<Endereco>, AppError>;
    async fn list(&self) -> Result<Vec<Endereco>, AppError>;
    /// Grava o endereço e a referência `endereco_id` do cliente numa única unidade.
    async fn create_linked(&self, id: i64, dados: DadosEndereco) -> Result<Endereco, AppError>;
    async fn update(&self, id: i64, alteracao: AtualizarEndereco) -> Result<Option<Endereco>, AppError>;
    /// Substitui o conteúdo e move a referência de volta se o dono mudou.
    async fn replace_linked(&self, id: i64, dados: DadosEndereco) -> Result<Option<Endereco>, AppError>;
    /// Remove o endereço; a referência no cliente fica vazia junto.
    async fn delete_unlinking(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ProdutoRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Produto>, AppError>;
    async fn find_by_nome(&self, nome: &str) -> Result<Option<Produto>, AppError>;
    async fn list(&self, filtro: FiltroProdutos) -> Result<Vec<Produto>, AppError>;
    async fn create(&self, id: i64, dados: DadosProduto) -> Result<Produto, AppError>;
    async fn update(&self, id: i64, alteracao: AlteracaoProduto) -> Result<Option<Produto>, AppError>;
    async fn replace(&self, id: i64, dados: DadosProduto) -> Result<Option<Produto>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
    /// Incremento atômico do estoque. Resultado negativo é rejeitado.
    async fn adjust_stock(&self, id: i64, quantidade: i32) -> Result<Option<Produto>, AppError>;
}

#[async_trait]
pub trait EntregaRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Entrega>, AppError>;
    async fn list(&self, status: Option<StatusEntrega>) -> Result<Vec<Entrega>, AppError>;
    async fn list_by_endereco(&self, endereco_id: i64) -> Result<Vec<Entrega>, AppError>;
    async fn create(&self, id: i64, dados: DadosEntrega) -> Result<Entrega, AppError>;
    async fn update(&self, id: i64, alteracao: AlteracaoEntrega) -> Result<Option<Entrega>, AppError>;
    async fn replace(&self, id: i64, dados: DadosEntrega) -> Result<Option<Entrega>, AppError>;
    async fn update_status(
        &self,
        id: i64,
        status: StatusEntrega,
        data_entrega_real: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<Option<Entrega>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

/// Conjunto de repositórios que a raiz de composição entrega aos serviços.
#[derive(Clone)]
pub struct Repositorios {
    pub clientes: Arc<dyn ClienteRepository>,
    pub enderecos: Arc<dyn EnderecoRepository>,
    pub produtos: Arc<dyn ProdutoRepository>,
    pub entregas: Arc<dyn EntregaRepository>,
    pub sequencias: Arc<dyn SequenceRepository>,
}

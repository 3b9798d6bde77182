pub mod repository;
pub use repository::{
    ClienteRepository, Colecao, EnderecoRepository, EntregaRepository, ProdutoRepository,
    Repositorios, SequenceRepository,
};

pub mod cliente_repo;
pub mod endereco_repo;
pub mod entrega_repo;
pub mod produto_repo;
pub mod sequence_repo;

#[cfg(test)]
pub mod memory;

use std::sync::Arc;

use sqlx::PgPool;

impl Repositorios {
    /// Todos os repositórios sobre o mesmo pool do Postgres.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            clientes: Arc::new(cliente_repo::PgClienteRepository::new(pool.clone())),
            enderecos: Arc::new(endereco_repo::PgEnderecoRepository::new(pool.clone())),
            produtos: Arc::new(produto_repo::PgProdutoRepository::new(pool.clone())),
            entregas: Arc::new(entrega_repo::PgEntregaRepository::new(pool.clone())),
            sequencias: Arc::new(sequence_repo::PgSequenceRepository::new(pool)),
        }
    }
}

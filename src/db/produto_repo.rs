// src/db/produto_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::{db_utils::map_constraint_error, error::AppError},
    db::repository::ProdutoRepository,
    models::produto::{
        AlteracaoProduto, DadosProduto, FiltroProdutos, NOME_PRODUTO_DUPLICADO, Produto,
    },
};

const COLUNAS: &str = "uid, id, nome, descricao, preco, estoque";

#[derive(Clone)]
pub struct PgProdutoRepository {
    pool: PgPool,
}

impl PgProdutoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn nome_duplicado() -> AppError {
    AppError::conflict(NOME_PRODUTO_DUPLICADO)
}

#[async_trait]
impl ProdutoRepository for PgProdutoRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Produto>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM produtos WHERE id = $1");
        let produto = sqlx::query_as::<_, Produto>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(produto)
    }

    async fn find_by_nome(&self, nome: &str) -> Result<Option<Produto>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM produtos WHERE nome = $1");
        let produto = sqlx::query_as::<_, Produto>(&sql)
            .bind(nome)
            .fetch_optional(&self.pool)
            .await?;
        Ok(produto)
    }

    async fn list(&self, filtro: FiltroProdutos) -> Result<Vec<Produto>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUNAS} FROM produtos
            WHERE (NOT $1 OR estoque > 0)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#
        );
        let produtos = sqlx::query_as::<_, Produto>(&sql)
            .bind(filtro.em_estoque)
            .bind(filtro.paginacao.limit())
            .bind(filtro.paginacao.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(produtos)
    }

    async fn create(&self, id: i64, dados: DadosProduto) -> Result<Produto, AppError> {
        let sql = format!(
            r#"
            INSERT INTO produtos (id, nome, descricao, preco, estoque)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUNAS}
            "#
        );
        sqlx::query_as::<_, Produto>(&sql)
            .bind(id)
            .bind(&dados.nome)
            .bind(&dados.descricao)
            .bind(dados.preco)
            .bind(dados.estoque)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, nome_duplicado))
    }

    async fn update(
        &self,
        id: i64,
        alteracao: AlteracaoProduto,
    ) -> Result<Option<Produto>, AppError> {
        let sql = format!(
            r#"
            UPDATE produtos SET
                nome = COALESCE($2, nome),
                descricao = COALESCE($3, descricao),
                preco = COALESCE($4, preco),
                estoque = COALESCE($5, estoque)
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );
        sqlx::query_as::<_, Produto>(&sql)
            .bind(id)
            .bind(alteracao.nome)
            .bind(alteracao.descricao)
            .bind(alteracao.preco)
            .bind(alteracao.estoque)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, nome_duplicado))
    }

    async fn replace(&self, id: i64, dados: DadosProduto) -> Result<Option<Produto>, AppError> {
        let sql = format!(
            r#"
            UPDATE produtos SET nome = $2, descricao = $3, preco = $4, estoque = $5
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );
        sqlx::query_as::<_, Produto>(&sql)
            .bind(id)
            .bind(&dados.nome)
            .bind(&dados.descricao)
            .bind(dados.preco)
            .bind(dados.estoque)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, nome_duplicado))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM produtos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn adjust_stock(&self, id: i64, quantidade: i32) -> Result<Option<Produto>, AppError> {
        // Um único UPDATE: leitura e escrita não se intercalam com outra baixa.
        // Se o resultado ficar negativo o CHECK do banco rejeita.
        let sql = format!(
            "UPDATE produtos SET estoque = estoque + $2 WHERE id = $1 RETURNING {COLUNAS}"
        );
        sqlx::query_as::<_, Produto>(&sql)
            .bind(id)
            .bind(quantidade)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, nome_duplicado))
    }
}

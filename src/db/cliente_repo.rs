// src/db/cliente_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_constraint_error, error::AppError},
    db::repository::ClienteRepository,
    models::{
        cliente::{AlteracaoCliente, Cliente, DadosCliente, EMAIL_DUPLICADO},
        paginacao::Paginacao,
    },
};

const COLUNAS: &str =
    "uid, id, nome, email, senha, telefone, endereco_id, produtos_ids, entregas_ids";

#[derive(Clone)]
pub struct PgClienteRepository {
    pool: PgPool,
}

impl PgClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClienteRepository for PgClienteRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Cliente>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM clientes WHERE id = $1");
        let cliente = sqlx::query_as::<_, Cliente>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(cliente)
    }

    async fn find_by_uid(&self, uid: Uuid) -> Result<Option<Cliente>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM clientes WHERE uid = $1");
        let cliente = sqlx::query_as::<_, Cliente>(&sql)
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?;
        Ok(cliente)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Cliente>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM clientes WHERE email = $1");
        let cliente = sqlx::query_as::<_, Cliente>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(cliente)
    }

    async fn list(&self, paginacao: Paginacao) -> Result<Vec<Cliente>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM clientes ORDER BY id LIMIT $1 OFFSET $2");
        let clientes = sqlx::query_as::<_, Cliente>(&sql)
            .bind(paginacao.limit())
            .bind(paginacao.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(clientes)
    }

    async fn create(&self, id: i64, dados: DadosCliente) -> Result<Cliente, AppError> {
        let sql = format!(
            r#"
            INSERT INTO clientes (id, nome, email, senha, telefone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUNAS}
            "#
        );
        sqlx::query_as::<_, Cliente>(&sql)
            .bind(id)
            .bind(&dados.nome)
            .bind(&dados.email)
            .bind(&dados.senha)
            .bind(&dados.telefone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, || AppError::conflict(EMAIL_DUPLICADO)))
    }

    async fn update(
        &self,
        id: i64,
        alteracao: AlteracaoCliente,
    ) -> Result<Option<Cliente>, AppError> {
        // COALESCE: campo ausente mantém o valor gravado
        let sql = format!(
            r#"
            UPDATE clientes SET
                nome = COALESCE($2, nome),
                email = COALESCE($3, email),
                senha = COALESCE($4, senha),
                telefone = COALESCE($5, telefone)
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );
        sqlx::query_as::<_, Cliente>(&sql)
            .bind(id)
            .bind(alteracao.nome)
            .bind(alteracao.email)
            .bind(alteracao.senha)
            .bind(alteracao.telefone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, || AppError::conflict(EMAIL_DUPLICADO)))
    }

    async fn replace(&self, id: i64, dados: DadosCliente) -> Result<Option<Cliente>, AppError> {
        // Telefone ausente na substituição é apagado; referências ficam intactas.
        let sql = format!(
            r#"
            UPDATE clientes SET
                nome = $2, email = $3, senha = $4, telefone = $5
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );
        sqlx::query_as::<_, Cliente>(&sql)
            .bind(id)
            .bind(&dados.nome)
            .bind(&dados.email)
            .bind(&dados.senha)
            .bind(&dados.telefone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, || AppError::conflict(EMAIL_DUPLICADO)))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        // O endereço do cliente sai junto (ON DELETE CASCADE em enderecos.cliente_id)
        let result = sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

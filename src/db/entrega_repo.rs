// src/db/entrega_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::repository::EntregaRepository,
    models::entrega::{AlteracaoEntrega, DadosEntrega, Entrega, StatusEntrega},
};

const COLUNAS: &str = "uid, id, endereco_entrega_id, status, data_prevista, \
                       data_entrega_real, valor_frete, produtos_nesta_entrega_ids";

#[derive(Clone)]
pub struct PgEntregaRepository {
    pool: PgPool,
}

impl PgEntregaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntregaRepository for PgEntregaRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Entrega>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM entregas WHERE id = $1");
        let entrega = sqlx::query_as::<_, Entrega>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entrega)
    }

    async fn list(&self, status: Option<StatusEntrega>) -> Result<Vec<Entrega>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUNAS} FROM entregas
            WHERE ($1::status_entrega IS NULL OR status = $1)
            ORDER BY id
            "#
        );
        let entregas = sqlx::query_as::<_, Entrega>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(entregas)
    }

    async fn list_by_endereco(&self, endereco_id: i64) -> Result<Vec<Entrega>, AppError> {
        let sql = format!(
            "SELECT {COLUNAS} FROM entregas WHERE endereco_entrega_id = $1 ORDER BY id"
        );
        let entregas = sqlx::query_as::<_, Entrega>(&sql)
            .bind(endereco_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(entregas)
    }

    async fn create(&self, id: i64, dados: DadosEntrega) -> Result<Entrega, AppError> {
        let sql = format!(
            r#"
            INSERT INTO entregas
                (id, endereco_entrega_id, status, data_prevista, valor_frete, produtos_nesta_entrega_ids)
            VALUES ($1, $2, 'PENDENTE', $3, $4, $5)
            RETURNING {COLUNAS}
            "#
        );
        let entrega = sqlx::query_as::<_, Entrega>(&sql)
            .bind(id)
            .bind(dados.endereco_entrega_id)
            .bind(dados.data_prevista)
            .bind(dados.valor_frete)
            .bind(&dados.produtos_nesta_entrega_ids)
            .fetch_one(&self.pool)
            .await?;
        Ok(entrega)
    }

    async fn update(
        &self,
        id: i64,
        alteracao: AlteracaoEntrega,
    ) -> Result<Option<Entrega>, AppError> {
        let sql = format!(
            r#"
            UPDATE entregas SET
                status = COALESCE($2, status),
                data_prevista = COALESCE($3, data_prevista),
                data_entrega_real = COALESCE($4, data_entrega_real),
                valor_frete = COALESCE($5, valor_frete),
                produtos_nesta_entrega_ids = COALESCE($6, produtos_nesta_entrega_ids)
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );
        let entrega = sqlx::query_as::<_, Entrega>(&sql)
            .bind(id)
            .bind(alteracao.status)
            .bind(alteracao.data_prevista)
            .bind(alteracao.data_entrega_real)
            .bind(alteracao.valor_frete)
            .bind(alteracao.produtos_nesta_entrega_ids)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entrega)
    }

    async fn replace(&self, id: i64, dados: DadosEntrega) -> Result<Option<Entrega>, AppError> {
        // Status e data de entrega real não fazem parte do conteúdo substituível.
        let sql = format!(
            r#"
            UPDATE entregas SET
                endereco_entrega_id = $2,
                data_prevista = $3,
                valor_frete = $4,
                produtos_nesta_entrega_ids = $5
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );
        let entrega = sqlx::query_as::<_, Entrega>(&sql)
            .bind(id)
            .bind(dados.endereco_entrega_id)
            .bind(dados.data_prevista)
            .bind(dados.valor_frete)
            .bind(&dados.produtos_nesta_entrega_ids)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entrega)
    }

    async fn update_status(
        &self,
        id: i64,
        status: StatusEntrega,
        data_entrega_real: Option<DateTime<Utc>>,
    ) -> Result<Option<Entrega>, AppError> {
        let sql = format!(
            r#"
            UPDATE entregas SET
                status = $2,
                data_entrega_real = COALESCE(data_entrega_real, $3)
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );
        let entrega = sqlx::query_as::<_, Entrega>(&sql)
            .bind(id)
            .bind(status)
            .bind(data_entrega_real)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entrega)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM entregas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

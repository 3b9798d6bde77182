// src/db/endereco_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_constraint_error, error::AppError},
    db::repository::EnderecoRepository,
    models::endereco::{AtualizarEndereco, CLIENTE_JA_POSSUI_ENDERECO, DadosEndereco, Endereco},
};

const COLUNAS: &str =
    "uid, id, cep, logradouro, numero, complemento, bairro, cidade, estado, cliente_id";

#[derive(Clone)]
pub struct PgEnderecoRepository {
    pool: PgPool,
}

impl PgEnderecoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn link_cliente(
        tx: &mut Transaction<'_, Postgres>,
        cliente_id: Uuid,
        endereco_uid: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE clientes SET endereco_id = $2 WHERE uid = $1")
            .bind(cliente_id)
            .bind(endereco_uid)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    // Só limpa se a referência ainda apontar para este endereço.
    async fn unlink_cliente(
        tx: &mut Transaction<'_, Postgres>,
        cliente_id: Uuid,
        endereco_uid: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE clientes SET endereco_id = NULL WHERE uid = $1 AND endereco_id = $2")
            .bind(cliente_id)
            .bind(endereco_uid)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}

fn ja_possui_endereco() -> AppError {
    AppError::conflict(CLIENTE_JA_POSSUI_ENDERECO)
}

#[async_trait]
impl EnderecoRepository for PgEnderecoRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Endereco>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM enderecos WHERE id = $1");
        let endereco = sqlx::query_as::<_, Endereco>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(endereco)
    }

    async fn find_by_cliente(&self, cliente_id: Uuid) -> Result<Option<Endereco>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM enderecos WHERE cliente_id = $1");
        let endereco = sqlx::query_as::<_, Endereco>(&sql)
            .bind(cliente_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(endereco)
    }

    async fn list(&self) -> Result<Vec<Endereco>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM enderecos ORDER BY id");
        let enderecos = sqlx::query_as::<_, Endereco>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(enderecos)
    }

    async fn create_linked(&self, id: i64, dados: DadosEndereco) -> Result<Endereco, AppError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r#"
            INSERT INTO enderecos
                (id, cep, logradouro, numero, complemento, bairro, cidade, estado, cliente_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUNAS}
            "#
        );
        let endereco = sqlx::query_as::<_, Endereco>(&sql)
            .bind(id)
            .bind(&dados.cep)
            .bind(&dados.logradouro)
            .bind(&dados.numero)
            .bind(&dados.complemento)
            .bind(&dados.bairro)
            .bind(&dados.cidade)
            .bind(&dados.estado)
            .bind(dados.cliente_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_constraint_error(e, ja_possui_endereco))?;

        Self::link_cliente(&mut tx, endereco.cliente_id, endereco.uid).await?;

        tx.commit().await?;
        Ok(endereco)
    }

    async fn update(
        &self,
        id: i64,
        alteracao: AtualizarEndereco,
    ) -> Result<Option<Endereco>, AppError> {
        let sql = format!(
            r#"
            UPDATE enderecos SET
                cep = COALESCE($2, cep),
                logradouro = COALESCE($3, logradouro),
                numero = COALESCE($4, numero),
                complemento = COALESCE($5, complemento),
                bairro = COALESCE($6, bairro),
                cidade = COALESCE($7, cidade),
                estado = COALESCE($8, estado)
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );
        let endereco = sqlx::query_as::<_, Endereco>(&sql)
            .bind(id)
            .bind(alteracao.cep)
            .bind(alteracao.logradouro)
            .bind(alteracao.numero)
            .bind(alteracao.complemento)
            .bind(alteracao.bairro)
            .bind(alteracao.cidade)
            .bind(alteracao.estado)
            .fetch_optional(&self.pool)
            .await?;
        Ok(endereco)
    }

    async fn replace_linked(
        &self,
        id: i64,
        dados: DadosEndereco,
    ) -> Result<Option<Endereco>, AppError> {
        let mut tx = self.pool.begin().await?;

        let dono_anterior: Option<Uuid> =
            sqlx::query_scalar("SELECT cliente_id FROM enderecos WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(dono_anterior) = dono_anterior else {
            return Ok(None);
        };

        let sql = format!(
            r#"
            UPDATE enderecos SET
                cep = $2, logradouro = $3, numero = $4, complemento = $5,
                bairro = $6, cidade = $7, estado = $8, cliente_id = $9
            WHERE id = $1
            RETURNING {COLUNAS}
            "#
        );
        let endereco = sqlx::query_as::<_, Endereco>(&sql)
            .bind(id)
            .bind(&dados.cep)
            .bind(&dados.logradouro)
            .bind(&dados.numero)
            .bind(&dados.complemento)
            .bind(&dados.bairro)
            .bind(&dados.cidade)
            .bind(&dados.estado)
            .bind(dados.cliente_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_constraint_error(e, ja_possui_endereco))?;

        if dono_anterior != endereco.cliente_id {
            Self::unlink_cliente(&mut tx, dono_anterior, endereco.uid).await?;
            Self::link_cliente(&mut tx, endereco.cliente_id, endereco.uid).await?;
        }

        tx.commit().await?;
        Ok(Some(endereco))
    }

    async fn delete_unlinking(&self, id: i64) -> Result<bool, AppError> {
        // clientes.endereco_id é limpo pela FK (ON DELETE SET NULL)
        let result = sqlx::query("DELETE FROM enderecos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// src/db/sequence_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::repository::{Colecao, SequenceRepository},
};

// Uma SEQUENCE do Postgres por coleção: `nextval` é atômico entre conexões,
// então duas criações simultâneas nunca recebem o mesmo id.
#[derive(Clone)]
pub struct PgSequenceRepository {
    pool: PgPool,
}

impl PgSequenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SequenceRepository for PgSequenceRepository {
    async fn next_id(&self, colecao: Colecao) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar("SELECT nextval($1::text::regclass)")
            .bind(colecao.sequence_name())
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }
}

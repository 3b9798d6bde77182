// src/services/endereco_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClienteRepository, Colecao, EnderecoRepository, SequenceRepository},
    models::endereco::{
        AtualizarEndereco, CLIENTE_JA_POSSUI_ENDERECO, CriarEndereco, EnderecoView,
        SubstituirEndereco,
    },
};

#[derive(Clone)]
pub struct EnderecoService {
    enderecos: Arc<dyn EnderecoRepository>,
    clientes: Arc<dyn ClienteRepository>,
    sequencias: Arc<dyn SequenceRepository>,
}

fn endereco_nao_encontrado(id: i64) -> AppError {
    AppError::not_found(format!("Endereço com ID {} não encontrado.", id))
}

impl EnderecoService {
    pub fn new(
        enderecos: Arc<dyn EnderecoRepository>,
        clientes: Arc<dyn ClienteRepository>,
        sequencias: Arc<dyn SequenceRepository>,
    ) -> Self {
        Self {
            enderecos,
            clientes,
            sequencias,
        }
    }

    async fn ensure_cliente_existe(&self, cliente_id: Uuid) -> Result<(), AppError> {
        if self.clientes.find_by_uid(cliente_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Cliente com ID {} não encontrado.",
                cliente_id
            )));
        }
        Ok(())
    }

    pub async fn create_endereco(&self, payload: CriarEndereco) -> Result<EnderecoView, AppError> {
        self.ensure_cliente_existe(payload.cliente_id).await?;

        if self
            .enderecos
            .find_by_cliente(payload.cliente_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(CLIENTE_JA_POSSUI_ENDERECO));
        }

        let id = self.sequencias.next_id(Colecao::Enderecos).await?;
        let endereco = self.enderecos.create_linked(id, payload.into()).await?;

        tracing::info!("Endereço {} criado para o cliente {}", endereco.id, endereco.cliente_id);
        Ok(endereco.into())
    }

    pub async fn list_enderecos(&self) -> Result<Vec<EnderecoView>, AppError> {
        let enderecos = self.enderecos.list().await?;
        Ok(enderecos.into_iter().map(EnderecoView::from).collect())
    }

    pub async fn get_endereco(&self, id: i64) -> Result<EnderecoView, AppError> {
        self.enderecos
            .find_by_id(id)
            .await?
            .map(EnderecoView::from)
            .ok_or_else(|| endereco_nao_encontrado(id))
    }

    pub async fn update_endereco(
        &self,
        id: i64,
        payload: AtualizarEndereco,
    ) -> Result<EnderecoView, AppError> {
        self.enderecos
            .update(id, payload)
            .await?
            .map(EnderecoView::from)
            .ok_or_else(|| endereco_nao_encontrado(id))
    }

    pub async fn replace_endereco(
        &self,
        id: i64,
        payload: SubstituirEndereco,
    ) -> Result<EnderecoView, AppError> {
        let atual = self
            .enderecos
            .find_by_id(id)
            .await?
            .ok_or_else(|| endereco_nao_encontrado(id))?;

        self.ensure_cliente_existe(payload.cliente_id).await?;

        // Trocar de dono só é possível se o novo cliente ainda não tiver endereço
        if payload.cliente_id != atual.cliente_id
            && self
                .enderecos
                .find_by_cliente(payload.cliente_id)
                .await?
                .is_some()
        {
            return Err(AppError::conflict(CLIENTE_JA_POSSUI_ENDERECO));
        }

        self.enderecos
            .replace_linked(id, payload.into())
            .await?
            .map(EnderecoView::from)
            .ok_or_else(|| endereco_nao_encontrado(id))
    }

    pub async fn delete_endereco(&self, id: i64) -> Result<(), AppError> {
        if !self.enderecos.delete_unlinking(id).await? {
            return Err(endereco_nao_encontrado(id));
        }
        tracing::info!("Endereço {} removido", id);
        Ok(())
    }
}

// src/services/cliente_service.rs

use std::sync::Arc;

use bcrypt::hash;

use crate::{
    common::error::AppError,
    db::{ClienteRepository, Colecao, SequenceRepository},
    models::{
        cliente::{
            AlteracaoCliente, AtualizarCliente, ClienteView, CriarCliente, DadosCliente,
            EMAIL_DUPLICADO, SubstituirCliente,
        },
        paginacao::Paginacao,
    },
};

#[derive(Clone)]
pub struct ClienteService {
    clientes: Arc<dyn ClienteRepository>,
    sequencias: Arc<dyn SequenceRepository>,
    bcrypt_cost: u32,
}

impl ClienteService {
    pub fn new(
        clientes: Arc<dyn ClienteRepository>,
        sequencias: Arc<dyn SequenceRepository>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            clientes,
            sequencias,
            bcrypt_cost,
        }
    }

    // O bcrypt é CPU-bound: roda fora do executor assíncrono.
    async fn hash_senha(&self, senha: String) -> Result<String, AppError> {
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || hash(senha, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    async fn ensure_email_livre(&self, email: &str, id_atual: Option<i64>) -> Result<(), AppError> {
        if let Some(existente) = self.clientes.find_by_email(email).await? {
            if Some(existente.id) != id_atual {
                return Err(AppError::conflict(EMAIL_DUPLICADO));
            }
        }
        Ok(())
    }

    pub async fn create_cliente(&self, payload: CriarCliente) -> Result<ClienteView, AppError> {
        self.ensure_email_livre(&payload.email, None).await?;

        let senha = self.hash_senha(payload.senha).await?;
        let id = self.sequencias.next_id(Colecao::Clientes).await?;

        let cliente = self
            .clientes
            .create(
                id,
                DadosCliente {
                    nome: payload.nome,
                    email: payload.email,
                    senha,
                    telefone: payload.telefone,
                },
            )
            .await?;

        tracing::info!("Cliente {} criado", cliente.id);
        Ok(cliente.into())
    }

    pub async fn get_cliente(&self, id: i64) -> Result<ClienteView, AppError> {
        self.clientes
            .find_by_id(id)
            .await?
            .map(ClienteView::from)
            .ok_or_else(|| AppError::not_found(format!("Cliente com ID {} não encontrado.", id)))
    }

    pub async fn list_clientes(&self, paginacao: Paginacao) -> Result<Vec<ClienteView>, AppError> {
        let clientes = self.clientes.list(paginacao).await?;
        Ok(clientes.into_iter().map(ClienteView::from).collect())
    }

    pub async fn update_cliente(
        &self,
        id: i64,
        payload: AtualizarCliente,
    ) -> Result<ClienteView, AppError> {
        if let Some(email) = &payload.email {
            self.ensure_email_livre(email, Some(id)).await?;
        }

        let senha = match payload.senha {
            Some(senha) => Some(self.hash_senha(senha).await?),
            None => None,
        };

        let alteracao = AlteracaoCliente {
            nome: payload.nome,
            email: payload.email,
            senha,
            telefone: payload.telefone,
        };

        self.clientes
            .update(id, alteracao)
            .await?
            .map(ClienteView::from)
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Cliente com ID {} não encontrado para atualização.",
                    id
                ))
            })
    }

    pub async fn replace_cliente(
        &self,
        id: i64,
        payload: SubstituirCliente,
    ) -> Result<ClienteView, AppError> {
        if self.clientes.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Cliente com ID {} não encontrado para substituição.",
                id
            )));
        }
        self.ensure_email_livre(&payload.email, Some(id)).await?;

        let dados = DadosCliente {
            nome: payload.nome,
            email: payload.email,
            senha: self.hash_senha(payload.senha).await?,
            telefone: payload.telefone,
        };

        self.clientes
            .replace(id, dados)
            .await?
            .map(ClienteView::from)
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Cliente com ID {} não encontrado para substituição.",
                    id
                ))
            })
    }

    pub async fn delete_cliente(&self, id: i64) -> Result<(), AppError> {
        if !self.clientes.delete(id).await? {
            return Err(AppError::not_found(format!(
                "Cliente com ID {} não encontrado para deleção.",
                id
            )));
        }
        tracing::info!("Cliente {} removido", id);
        Ok(())
    }
}

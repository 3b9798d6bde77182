// src/services/produto_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::{Colecao, ProdutoRepository, SequenceRepository},
    models::produto::{
        AtualizarProduto, CriarProduto, ESTOQUE_FORA_DO_LIMITE, FiltroProdutos, NOME_PRODUTO_DUPLICADO,
        ProdutoView, SubstituirProduto,
    },
};

#[derive(Clone)]
pub struct ProdutoService {
    produtos: Arc<dyn ProdutoRepository>,
    sequencias: Arc<dyn SequenceRepository>,
}

fn produto_nao_encontrado(id: i64) -> AppError {
    AppError::not_found(format!("Produto com ID {} não encontrado.", id))
}

impl ProdutoService {
    pub fn new(
        produtos: Arc<dyn ProdutoRepository>,
        sequencias: Arc<dyn SequenceRepository>,
    ) -> Self {
        Self {
            produtos,
            sequencias,
        }
    }

    async fn ensure_nome_livre(&self, nome: &str, id_atual: Option<i64>) -> Result<(), AppError> {
        if let Some(existente) = self.produtos.find_by_nome(nome).await? {
            if Some(existente.id) != id_atual {
                return Err(AppError::conflict(NOME_PRODUTO_DUPLICADO));
            }
        }
        Ok(())
    }

    pub async fn create_produto(&self, payload: CriarProduto) -> Result<ProdutoView, AppError> {
        self.ensure_nome_livre(&payload.nome, None).await?;

        let id = self.sequencias.next_id(Colecao::Produtos).await?;
        let produto = self.produtos.create(id, payload.into()).await?;

        tracing::info!("Produto {} criado", produto.id);
        Ok(produto.into())
    }

    pub async fn get_produto(&self, id: i64) -> Result<ProdutoView, AppError> {
        self.produtos
            .find_by_id(id)
            .await?
            .map(ProdutoView::from)
            .ok_or_else(|| produto_nao_encontrado(id))
    }

    pub async fn list_produtos(&self, filtro: FiltroProdutos) -> Result<Vec<ProdutoView>, AppError> {
        let produtos = self.produtos.list(filtro).await?;
        Ok(produtos.into_iter().map(ProdutoView::from).collect())
    }

    pub async fn update_produto(
        &self,
        id: i64,
        payload: AtualizarProduto,
    ) -> Result<ProdutoView, AppError> {
        if let Some(nome) = &payload.nome {
            self.ensure_nome_livre(nome, Some(id)).await?;
        }

        self.produtos
            .update(id, payload.into())
            .await?
            .map(ProdutoView::from)
            .ok_or_else(|| produto_nao_encontrado(id))
    }

    pub async fn replace_produto(
        &self,
        id: i64,
        payload: SubstituirProduto,
    ) -> Result<ProdutoView, AppError> {
        self.ensure_nome_livre(&payload.nome, Some(id)).await?;

        self.produtos
            .replace(id, payload.into())
            .await?
            .map(ProdutoView::from)
            .ok_or_else(|| produto_nao_encontrado(id))
    }

    pub async fn delete_produto(&self, id: i64) -> Result<(), AppError> {
        if !self.produtos.delete(id).await? {
            return Err(produto_nao_encontrado(id));
        }
        tracing::info!("Produto {} removido", id);
        Ok(())
    }

    /// Soma `quantidade` ao estoque. Delta negativo é uma baixa e não pode
    /// deixar o estoque abaixo de zero.
    pub async fn adjust_stock(&self, id: i64, quantidade: i32) -> Result<ProdutoView, AppError> {
        if quantidade == 0 {
            return Err(AppError::bad_request("Quantidade deve ser diferente de zero."));
        }

        let atual = self
            .produtos
            .find_by_id(id)
            .await?
            .ok_or_else(|| produto_nao_encontrado(id))?;
        match atual.estoque.checked_add(quantidade) {
            None => return Err(AppError::bad_request(ESTOQUE_FORA_DO_LIMITE)),
            Some(novo) if novo < 0 => return Err(AppError::bad_request("Estoque insuficiente.")),
            Some(_) => {}
        }

        let produto = self
            .produtos
            .adjust_stock(id, quantidade)
            .await?
            .ok_or_else(|| produto_nao_encontrado(id))?;

        tracing::info!("Estoque do produto {} ajustado em {} (atual: {})", id, quantidade, produto.estoque);
        Ok(produto.into())
    }
}

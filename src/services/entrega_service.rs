// src/services/entrega_service.rs

use std::sync::Arc;

use chrono::Utc;

use crate::{
    common::error::AppError,
    db::{Colecao, EnderecoRepository, EntregaRepository, ProdutoRepository, SequenceRepository},
    models::entrega::{
        AtualizarEntrega, CriarEntrega, Entrega, EntregaView, StatusEntrega, SubstituirEntrega,
    },
};

#[derive(Clone)]
pub struct EntregaService {
    entregas: Arc<dyn EntregaRepository>,
    enderecos: Arc<dyn EnderecoRepository>,
    produtos: Arc<dyn ProdutoRepository>,
    sequencias: Arc<dyn SequenceRepository>,
}

fn entrega_nao_encontrada(id: i64) -> AppError {
    AppError::not_found(format!("Entrega com ID {} não encontrada.", id))
}

impl EntregaService {
    pub fn new(
        entregas: Arc<dyn EntregaRepository>,
        enderecos: Arc<dyn EnderecoRepository>,
        produtos: Arc<dyn ProdutoRepository>,
        sequencias: Arc<dyn SequenceRepository>,
    ) -> Self {
        Self {
            entregas,
            enderecos,
            produtos,
            sequencias,
        }
    }

    // ---
    // Verificações de referência
    // ---

    async fn ensure_endereco_existe(&self, endereco_id: i64) -> Result<(), AppError> {
        if self.enderecos.find_by_id(endereco_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Endereço de entrega com ID {} não encontrado.",
                endereco_id
            )));
        }
        Ok(())
    }

    // Um produto ausente é erro do payload, não da rota: 400 com o id.
    async fn ensure_produtos_existem(&self, produtos_ids: &[i64]) -> Result<(), AppError> {
        for &produto_id in produtos_ids {
            if self.produtos.find_by_id(produto_id).await?.is_none() {
                return Err(AppError::bad_request(format!(
                    "Produto com ID {} não encontrado.",
                    produto_id
                )));
            }
        }
        Ok(())
    }

    async fn find_editavel(&self, id: i64) -> Result<Entrega, AppError> {
        let entrega = self
            .entregas
            .find_by_id(id)
            .await?
            .ok_or_else(|| entrega_nao_encontrada(id))?;

        if entrega.status.is_terminal() {
            return Err(AppError::bad_request(format!(
                "Não é possível atualizar a entrega ID {}, status atual: {}.",
                id, entrega.status
            )));
        }
        Ok(entrega)
    }

    // ---
    // Operações
    // ---

    pub async fn create_entrega(&self, payload: CriarEntrega) -> Result<EntregaView, AppError> {
        self.ensure_endereco_existe(payload.endereco_entrega_id).await?;
        self.ensure_produtos_existem(&payload.produtos_nesta_entrega_ids)
            .await?;

        let id = self.sequencias.next_id(Colecao::Entregas).await?;
        let entrega = self.entregas.create(id, payload.into()).await?;

        tracing::info!(
            "Entrega {} criada para o endereço {}",
            entrega.id,
            entrega.endereco_entrega_id
        );
        Ok(entrega.into())
    }

    pub async fn get_entrega(&self, id: i64) -> Result<EntregaView, AppError> {
        self.entregas
            .find_by_id(id)
            .await?
            .map(EntregaView::from)
            .ok_or_else(|| entrega_nao_encontrada(id))
    }

    pub async fn list_entregas(
        &self,
        status: Option<StatusEntrega>,
    ) -> Result<Vec<EntregaView>, AppError> {
        let entregas = self.entregas.list(status).await?;
        Ok(entregas.into_iter().map(EntregaView::from).collect())
    }

    pub async fn list_by_endereco(&self, endereco_id: i64) -> Result<Vec<EntregaView>, AppError> {
        let entregas = self.entregas.list_by_endereco(endereco_id).await?;
        Ok(entregas.into_iter().map(EntregaView::from).collect())
    }

    pub async fn update_entrega(
        &self,
        id: i64,
        payload: AtualizarEntrega,
    ) -> Result<EntregaView, AppError> {
        self.find_editavel(id).await?;

        if let Some(produtos) = &payload.produtos_nesta_entrega_ids {
            self.ensure_produtos_existem(produtos).await?;
        }

        self.entregas
            .update(id, payload.into())
            .await?
            .map(EntregaView::from)
            .ok_or_else(|| entrega_nao_encontrada(id))
    }

    /// Substituição completa. Ao contrário do PATCH, vale também para
    /// entregas ENTREGUE ou CANCELADA; status e data real são mantidos.
    pub async fn replace_entrega(
        &self,
        id: i64,
        payload: SubstituirEntrega,
    ) -> Result<EntregaView, AppError> {
        if self.entregas.find_by_id(id).await?.is_none() {
            return Err(entrega_nao_encontrada(id));
        }
        self.ensure_endereco_existe(payload.endereco_entrega_id).await?;
        self.ensure_produtos_existem(&payload.produtos_nesta_entrega_ids)
            .await?;

        self.entregas
            .replace(id, payload.into())
            .await?
            .map(EntregaView::from)
            .ok_or_else(|| entrega_nao_encontrada(id))
    }

    /// Troca o status sem olhar o atual. Ao virar ENTREGUE, a data real de
    /// entrega é preenchida se ainda estiver vazia.
    pub async fn update_status(
        &self,
        id: i64,
        status: StatusEntrega,
    ) -> Result<EntregaView, AppError> {
        let data_entrega_real = (status == StatusEntrega::Entregue).then(Utc::now);

        let entrega = self
            .entregas
            .update_status(id, status, data_entrega_real)
            .await?
            .ok_or_else(|| entrega_nao_encontrada(id))?;

        tracing::info!("Entrega {} agora está {}", id, entrega.status);
        Ok(entrega.into())
    }

    pub async fn delete_entrega(&self, id: i64) -> Result<(), AppError> {
        if !self.entregas.delete(id).await? {
            return Err(entrega_nao_encontrada(id));
        }
        tracing::info!("Entrega {} removida", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    use super::*;
    use crate::{
        db::{ClienteRepository, memory::MemoryStore},
        models::{
            cliente::DadosCliente,
            endereco::DadosEndereco,
            produto::DadosProduto,
        },
    };

    fn service(store: &MemoryStore) -> EntregaService {
        let repos = store.repositorios();
        EntregaService::new(repos.entregas, repos.enderecos, repos.produtos, repos.sequencias)
    }

    // Cliente 1 com endereço 1, produtos 1 e 2.
    async fn cenario(store: &MemoryStore) {
        let cliente = ClienteRepository::create(
            store,
            1,
            DadosCliente {
                nome: "A".into(),
                email: "a@x.com".into(),
                senha: "hash".into(),
                telefone: None,
            },
        )
        .await
        .unwrap();

        store
            .create_linked(
                1,
                DadosEndereco {
                    cep: "50000-000".into(),
                    logradouro: "Rua A".into(),
                    numero: "10".into(),
                    complemento: None,
                    bairro: "Centro".into(),
                    cidade: "Recife".into(),
                    estado: "PE".into(),
                    cliente_id: cliente.uid,
                },
            )
            .await
            .unwrap();

        for (id, nome) in [(1, "Mouse"), (2, "Teclado")] {
            ProdutoRepository::create(
                store,
                id,
                DadosProduto {
                    nome: nome.into(),
                    descricao: None,
                    preco: Decimal::new(1000, 2),
                    estoque: 10,
                },
            )
            .await
            .unwrap();
        }
    }

    fn criar(endereco: i64, produtos: Vec<i64>) -> CriarEntrega {
        CriarEntrega {
            endereco_entrega_id: endereco,
            data_prevista: Utc.with_ymd_and_hms(2026, 11, 1, 12, 0, 0).unwrap(),
            valor_frete: Decimal::new(1590, 2),
            produtos_nesta_entrega_ids: produtos,
        }
    }

    #[tokio::test]
    async fn new_delivery_starts_pending() {
        let store = MemoryStore::new();
        cenario(&store).await;
        let service = service(&store);

        let view = service.create_entrega(criar(1, vec![1, 2])).await.unwrap();
        assert_eq!(view.id, 1);
        assert_eq!(view.status, StatusEntrega::Pendente);
        assert!(view.data_entrega_real.is_none());
    }

    #[tokio::test]
    async fn missing_product_is_a_bad_request_naming_the_id() {
        let store = MemoryStore::new();
        cenario(&store).await;
        let service = service(&store);

        let err = service.create_entrega(criar(1, vec![1, 77])).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.to_string(), "Produto com ID 77 não encontrado.");

        // Falha de validação não consome id
        let view = service.create_entrega(criar(1, vec![2])).await.unwrap();
        assert_eq!(view.id, 1);
    }

    #[tokio::test]
    async fn missing_address_is_not_found() {
        let store = MemoryStore::new();
        cenario(&store).await;
        let service = service(&store);

        let err = service.create_entrega(criar(9, vec![1])).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "Endereço de entrega com ID 9 não encontrado.");
    }

    #[tokio::test]
    async fn terminal_deliveries_reject_patch() {
        let store = MemoryStore::new();
        cenario(&store).await;
        let service = service(&store);
        let view = service.create_entrega(criar(1, vec![1])).await.unwrap();

        for status in [StatusEntrega::Entregue, StatusEntrega::Cancelada] {
            service.update_status(view.id, status).await.unwrap();
            let antes = service.get_entrega(view.id).await.unwrap();

            let patch = AtualizarEntrega {
                valor_frete: Some(Decimal::new(1, 0)),
                ..Default::default()
            };
            let err = service.update_entrega(view.id, patch).await.unwrap_err();
            assert_eq!(
                err.to_string(),
                format!(
                    "Não é possível atualizar a entrega ID {}, status atual: {}.",
                    view.id, status
                )
            );

            assert_eq!(service.get_entrega(view.id).await.unwrap(), antes);
        }
    }

    #[tokio::test]
    async fn terminal_deliveries_accept_put_and_keep_status() {
        let store = MemoryStore::new();
        cenario(&store).await;
        let service = service(&store);
        let view = service.create_entrega(criar(1, vec![1])).await.unwrap();

        for status in [StatusEntrega::Entregue, StatusEntrega::Cancelada] {
            let antes = service.update_status(view.id, status).await.unwrap();

            let substituida = service
                .replace_entrega(view.id, criar(1, vec![2]))
                .await
                .unwrap();
            assert_eq!(substituida.status, status);
            assert_eq!(substituida.data_entrega_real, antes.data_entrega_real);
            assert_eq!(substituida.produtos_nesta_entrega_ids, vec![2]);
        }

        // Referências continuam validadas
        let err = service
            .replace_entrega(view.id, criar(1, vec![99]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = service.replace_entrega(404, criar(1, vec![1])).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn status_can_leave_a_terminal_state() {
        let store = MemoryStore::new();
        cenario(&store).await;
        let service = service(&store);
        let view = service.create_entrega(criar(1, vec![1])).await.unwrap();

        service
            .update_status(view.id, StatusEntrega::Cancelada)
            .await
            .unwrap();
        let reaberta = service
            .update_status(view.id, StatusEntrega::EmTransito)
            .await
            .unwrap();
        assert_eq!(reaberta.status, StatusEntrega::EmTransito);
    }

    #[tokio::test]
    async fn delivered_status_stamps_the_real_date_once() {
        let store = MemoryStore::new();
        cenario(&store).await;
        let service = service(&store);
        let view = service.create_entrega(criar(1, vec![1])).await.unwrap();

        let entregue = service
            .update_status(view.id, StatusEntrega::Entregue)
            .await
            .unwrap();
        let carimbo = entregue.data_entrega_real.unwrap();

        let de_novo = service
            .update_status(view.id, StatusEntrega::Entregue)
            .await
            .unwrap();
        assert_eq!(de_novo.data_entrega_real, Some(carimbo));
    }

    #[tokio::test]
    async fn patch_validates_listed_products() {
        let store = MemoryStore::new();
        cenario(&store).await;
        let service = service(&store);
        let view = service.create_entrega(criar(1, vec![1])).await.unwrap();

        let patch = AtualizarEntrega {
            produtos_nesta_entrega_ids: Some(vec![3]),
            ..Default::default()
        };
        let err = service.update_entrega(view.id, patch).await.unwrap_err();
        assert_eq!(err.to_string(), "Produto com ID 3 não encontrado.");

        let patch = AtualizarEntrega {
            produtos_nesta_entrega_ids: Some(vec![1, 2]),
            status: Some(StatusEntrega::EmTransito),
            ..Default::default()
        };
        let atualizada = service.update_entrega(view.id, patch).await.unwrap();
        assert_eq!(atualizada.produtos_nesta_entrega_ids, vec![1, 2]);
        assert_eq!(atualizada.status, StatusEntrega::EmTransito);
    }

    #[tokio::test]
    async fn replace_keeps_status() {
        let store = MemoryStore::new();
        cenario(&store).await;
        let service = service(&store);
        let view = service.create_entrega(criar(1, vec![1])).await.unwrap();
        service
            .update_status(view.id, StatusEntrega::EmTransito)
            .await
            .unwrap();

        let substituida = service
            .replace_entrega(view.id, criar(1, vec![2]))
            .await
            .unwrap();
        assert_eq!(substituida.id, view.id);
        assert_eq!(substituida.status, StatusEntrega::EmTransito);
        assert_eq!(substituida.produtos_nesta_entrega_ids, vec![2]);
    }

    #[tokio::test]
    async fn lists_filter_by_status_and_address() {
        let store = MemoryStore::new();
        cenario(&store).await;
        let service = service(&store);
        service.create_entrega(criar(1, vec![1])).await.unwrap();
        let segunda = service.create_entrega(criar(1, vec![2])).await.unwrap();
        service
            .update_status(segunda.id, StatusEntrega::EmTransito)
            .await
            .unwrap();

        let em_transito = service
            .list_entregas(Some(StatusEntrega::EmTransito))
            .await
            .unwrap();
        assert_eq!(em_transito.len(), 1);
        assert_eq!(em_transito[0].id, segunda.id);

        assert_eq!(service.list_entregas(None).await.unwrap().len(), 2);
        assert_eq!(service.list_by_endereco(1).await.unwrap().len(), 2);
        assert!(service.list_by_endereco(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_delivery_is_not_found() {
        let store = MemoryStore::new();
        let service = service(&store);
        let err = service.delete_entrega(5).await.unwrap_err();
        assert_eq!(err.to_string(), "Entrega com ID 5 não encontrada.");
    }
}

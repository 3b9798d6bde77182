// src/db/memory.rs
//
// Backend em memória usado pelos testes de serviço e de rota. Reproduz as
// restrições do schema (unicidade, cascata, CHECK de estoque) para que os
// testes exercitem as mesmas respostas que o Postgres daria.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::repository::{
        ClienteRepository, Colecao, EnderecoRepository, EntregaRepository, ProdutoRepository,
        Repositorios, SequenceRepository,
    },
    models::{
        cliente::{AlteracaoCliente, Cliente, DadosCliente, EMAIL_DUPLICADO},
        endereco::{AtualizarEndereco, CLIENTE_JA_POSSUI_ENDERECO, DadosEndereco, Endereco},
        entrega::{AlteracaoEntrega, DadosEntrega, Entrega, StatusEntrega},
        paginacao::Paginacao,
        produto::{
            AlteracaoProduto, DadosProduto, ESTOQUE_FORA_DO_LIMITE, FiltroProdutos,
            NOME_PRODUTO_DUPLICADO, Produto,
        },
    },
};

#[derive(Default)]
struct Tabelas {
    clientes: Vec<Cliente>,
    enderecos: Vec<Endereco>,
    produtos: Vec<Produto>,
    entregas: Vec<Entrega>,
    sequencias: HashMap<Colecao, i64>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tabelas: Arc<Mutex<Tabelas>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositorios(&self) -> Repositorios {
        Repositorios {
            clientes: Arc::new(self.clone()),
            enderecos: Arc::new(self.clone()),
            produtos: Arc::new(self.clone()),
            entregas: Arc::new(self.clone()),
            sequencias: Arc::new(self.clone()),
        }
    }

    fn tabelas(&self) -> MutexGuard<'_, Tabelas> {
        self.tabelas.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn pagina<T: Clone>(itens: impl Iterator<Item = T>, paginacao: Paginacao) -> Vec<T> {
    itens
        .skip(paginacao.offset() as usize)
        .take(paginacao.limit() as usize)
        .collect()
}

#[async_trait]
impl SequenceRepository for MemoryStore {
    async fn next_id(&self, colecao: Colecao) -> Result<i64, AppError> {
        let mut tabelas = self.tabelas();
        let atual = tabelas.sequencias.entry(colecao).or_insert(0);
        *atual += 1;
        Ok(*atual)
    }
}

#[async_trait]
impl ClienteRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Cliente>, AppError> {
        Ok(self.tabelas().clientes.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_uid(&self, uid: Uuid) -> Result<Option<Cliente>, AppError> {
        Ok(self.tabelas().clientes.iter().find(|c| c.uid == uid).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Cliente>, AppError> {
        Ok(self.tabelas().clientes.iter().find(|c| c.email == email).cloned())
    }

    async fn list(&self, paginacao: Paginacao) -> Result<Vec<Cliente>, AppError> {
        let tabelas = self.tabelas();
        let mut clientes = tabelas.clientes.clone();
        clientes.sort_by_key(|c| c.id);
        Ok(pagina(clientes.into_iter(), paginacao))
    }

    async fn create(&self, id: i64, dados: DadosCliente) -> Result<Cliente, AppError> {
        let mut tabelas = self.tabelas();
        if tabelas.clientes.iter().any(|c| c.email == dados.email) {
            return Err(AppError::conflict(EMAIL_DUPLICADO));
        }
        let cliente = Cliente {
            uid: Uuid::new_v4(),
            id,
            nome: dados.nome,
            email: dados.email,
            senha: dados.senha,
            telefone: dados.telefone,
            endereco_id: None,
            produtos_ids: Vec::new(),
            entregas_ids: Vec::new(),
        };
        tabelas.clientes.push(cliente.clone());
        Ok(cliente)
    }

    async fn update(
        &self,
        id: i64,
        alteracao: AlteracaoCliente,
    ) -> Result<Option<Cliente>, AppError> {
        let mut tabelas = self.tabelas();
        if let Some(email) = &alteracao.email {
            if tabelas.clientes.iter().any(|c| &c.email == email && c.id != id) {
                return Err(AppError::conflict(EMAIL_DUPLICADO));
            }
        }
        let Some(cliente) = tabelas.clientes.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(nome) = alteracao.nome {
            cliente.nome = nome;
        }
        if let Some(email) = alteracao.email {
            cliente.email = email;
        }
        if let Some(senha) = alteracao.senha {
            cliente.senha = senha;
        }
        if let Some(telefone) = alteracao.telefone {
            cliente.telefone = Some(telefone);
        }
        Ok(Some(cliente.clone()))
    }

    async fn replace(&self, id: i64, dados: DadosCliente) -> Result<Option<Cliente>, AppError> {
        let mut tabelas = self.tabelas();
        if tabelas.clientes.iter().any(|c| c.email == dados.email && c.id != id) {
            return Err(AppError::conflict(EMAIL_DUPLICADO));
        }
        let Some(cliente) = tabelas.clientes.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        cliente.nome = dados.nome;
        cliente.email = dados.email;
        cliente.senha = dados.senha;
        cliente.telefone = dados.telefone;
        Ok(Some(cliente.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tabelas = self.tabelas();
        let Some(pos) = tabelas.clientes.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        let cliente = tabelas.clientes.remove(pos);
        tabelas.enderecos.retain(|e| e.cliente_id != cliente.uid);
        Ok(true)
    }
}

#[async_trait]
impl EnderecoRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Endereco>, AppError> {
        Ok(self.tabelas().enderecos.iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_cliente(&self, cliente_id: Uuid) -> Result<Option<Endereco>, AppError> {
        Ok(self
            .tabelas()
            .enderecos
            .iter()
            .find(|e| e.cliente_id == cliente_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Endereco>, AppError> {
        let mut enderecos = self.tabelas().enderecos.clone();
        enderecos.sort_by_key(|e| e.id);
        Ok(enderecos)
    }

    async fn create_linked(&self, id: i64, dados: DadosEndereco) -> Result<Endereco, AppError> {
        let mut tabelas = self.tabelas();
        if tabelas.enderecos.iter().any(|e| e.cliente_id == dados.cliente_id) {
            return Err(AppError::conflict(CLIENTE_JA_POSSUI_ENDERECO));
        }
        let Some(cliente) = tabelas.clientes.iter_mut().find(|c| c.uid == dados.cliente_id) else {
            return Err(AppError::not_found("Registro referenciado não encontrado."));
        };
        let endereco = Endereco {
            uid: Uuid::new_v4(),
            id,
            cep: dados.cep,
            logradouro: dados.logradouro,
            numero: dados.numero,
            complemento: dados.complemento,
            bairro: dados.bairro,
            cidade: dados.cidade,
            estado: dados.estado,
            cliente_id: dados.cliente_id,
        };
        cliente.endereco_id = Some(endereco.uid);
        tabelas.enderecos.push(endereco.clone());
        Ok(endereco)
    }

    async fn update(
        &self,
        id: i64,
        alteracao: AtualizarEndereco,
    ) -> Result<Option<Endereco>, AppError> {
        let mut tabelas = self.tabelas();
        let Some(endereco) = tabelas.enderecos.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        if let Some(cep) = alteracao.cep {
            endereco.cep = cep;
        }
        if let Some(logradouro) = alteracao.logradouro {
            endereco.logradouro = logradouro;
        }
        if let Some(numero) = alteracao.numero {
            endereco.numero = numero;
        }
        if let Some(complemento) = alteracao.complemento {
            endereco.complemento = Some(complemento);
        }
        if let Some(bairro) = alteracao.bairro {
            endereco.bairro = bairro;
        }
        if let Some(cidade) = alteracao.cidade {
            endereco.cidade = cidade;
        }
        if let Some(estado) = alteracao.estado {
            endereco.estado = estado;
        }
        Ok(Some(endereco.clone()))
    }

    async fn replace_linked(
        &self,
        id: i64,
        dados: DadosEndereco,
    ) -> Result<Option<Endereco>, AppError> {
        let mut tabelas = self.tabelas();
        if tabelas
            .enderecos
            .iter()
            .any(|e| e.cliente_id == dados.cliente_id && e.id != id)
        {
            return Err(AppError::conflict(CLIENTE_JA_POSSUI_ENDERECO));
        }
        if !tabelas.clientes.iter().any(|c| c.uid == dados.cliente_id) {
            return Err(AppError::not_found("Registro referenciado não encontrado."));
        }
        let Some(endereco) = tabelas.enderecos.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        let dono_anterior = endereco.cliente_id;
        endereco.cep = dados.cep;
        endereco.logradouro = dados.logradouro;
        endereco.numero = dados.numero;
        endereco.complemento = dados.complemento;
        endereco.bairro = dados.bairro;
        endereco.cidade = dados.cidade;
        endereco.estado = dados.estado;
        endereco.cliente_id = dados.cliente_id;
        let endereco = endereco.clone();

        if dono_anterior != endereco.cliente_id {
            for cliente in tabelas.clientes.iter_mut() {
                if cliente.uid == dono_anterior && cliente.endereco_id == Some(endereco.uid) {
                    cliente.endereco_id = None;
                }
                if cliente.uid == endereco.cliente_id {
                    cliente.endereco_id = Some(endereco.uid);
                }
            }
        }
        Ok(Some(endereco))
    }

    async fn delete_unlinking(&self, id: i64) -> Result<bool, AppError> {
        let mut tabelas = self.tabelas();
        let Some(pos) = tabelas.enderecos.iter().position(|e| e.id == id) else {
            return Ok(false);
        };
        let endereco = tabelas.enderecos.remove(pos);
        // Mesmo efeito do ON DELETE SET NULL em clientes.endereco_id
        for cliente in tabelas.clientes.iter_mut() {
            if cliente.endereco_id == Some(endereco.uid) {
                cliente.endereco_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl ProdutoRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Produto>, AppError> {
        Ok(self.tabelas().produtos.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_nome(&self, nome: &str) -> Result<Option<Produto>, AppError> {
        Ok(self.tabelas().produtos.iter().find(|p| p.nome == nome).cloned())
    }

    async fn list(&self, filtro: FiltroProdutos) -> Result<Vec<Produto>, AppError> {
        let mut produtos = self.tabelas().produtos.clone();
        produtos.sort_by_key(|p| p.id);
        let filtrados = produtos
            .into_iter()
            .filter(|p| !filtro.em_estoque || p.estoque > 0);
        Ok(pagina(filtrados, filtro.paginacao))
    }

    async fn create(&self, id: i64, dados: DadosProduto) -> Result<Produto, AppError> {
        let mut tabelas = self.tabelas();
        if tabelas.produtos.iter().any(|p| p.nome == dados.nome) {
            return Err(AppError::conflict(NOME_PRODUTO_DUPLICADO));
        }
        let produto = Produto {
            uid: Uuid::new_v4(),
            id,
            nome: dados.nome,
            descricao: dados.descricao,
            preco: dados.preco,
            estoque: dados.estoque,
        };
        tabelas.produtos.push(produto.clone());
        Ok(produto)
    }

    async fn update(
        &self,
        id: i64,
        alteracao: AlteracaoProduto,
    ) -> Result<Option<Produto>, AppError> {
        let mut tabelas = self.tabelas();
        if let Some(nome) = &alteracao.nome {
            if tabelas.produtos.iter().any(|p| &p.nome == nome && p.id != id) {
                return Err(AppError::conflict(NOME_PRODUTO_DUPLICADO));
            }
        }
        let Some(produto) = tabelas.produtos.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(nome) = alteracao.nome {
            produto.nome = nome;
        }
        if let Some(descricao) = alteracao.descricao {
            produto.descricao = Some(descricao);
        }
        if let Some(preco) = alteracao.preco {
            produto.preco = preco;
        }
        if let Some(estoque) = alteracao.estoque {
            produto.estoque = estoque;
        }
        Ok(Some(produto.clone()))
    }

    async fn replace(&self, id: i64, dados: DadosProduto) -> Result<Option<Produto>, AppError> {
        let mut tabelas = self.tabelas();
        if tabelas.produtos.iter().any(|p| p.nome == dados.nome && p.id != id) {
            return Err(AppError::conflict(NOME_PRODUTO_DUPLICADO));
        }
        let Some(produto) = tabelas.produtos.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        produto.nome = dados.nome;
        produto.descricao = dados.descricao;
        produto.preco = dados.preco;
        produto.estoque = dados.estoque;
        Ok(Some(produto.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tabelas = self.tabelas();
        let antes = tabelas.produtos.len();
        tabelas.produtos.retain(|p| p.id != id);
        Ok(tabelas.produtos.len() < antes)
    }

    async fn adjust_stock(&self, id: i64, quantidade: i32) -> Result<Option<Produto>, AppError> {
        let mut tabelas = self.tabelas();
        let Some(produto) = tabelas.produtos.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        let Some(novo) = produto.estoque.checked_add(quantidade) else {
            return Err(AppError::bad_request(ESTOQUE_FORA_DO_LIMITE));
        };
        if novo < 0 {
            return Err(AppError::bad_request("Estoque insuficiente."));
        }
        produto.estoque = novo;
        Ok(Some(produto.clone()))
    }
}

#[async_trait]
impl EntregaRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Entrega>, AppError> {
        Ok(self.tabelas().entregas.iter().find(|e| e.id == id).cloned())
    }

    async fn list(&self, status: Option<StatusEntrega>) -> Result<Vec<Entrega>, AppError> {
        let mut entregas: Vec<Entrega> = self
            .tabelas()
            .entregas
            .iter()
            .filter(|e| status.is_none_or(|s| e.status == s))
            .cloned()
            .collect();
        entregas.sort_by_key(|e| e.id);
        Ok(entregas)
    }

    async fn list_by_endereco(&self, endereco_id: i64) -> Result<Vec<Entrega>, AppError> {
        let mut entregas: Vec<Entrega> = self
            .tabelas()
            .entregas
            .iter()
            .filter(|e| e.endereco_entrega_id == endereco_id)
            .cloned()
            .collect();
        entregas.sort_by_key(|e| e.id);
        Ok(entregas)
    }

    async fn create(&self, id: i64, dados: DadosEntrega) -> Result<Entrega, AppError> {
        let entrega = Entrega {
            uid: Uuid::new_v4(),
            id,
            endereco_entrega_id: dados.endereco_entrega_id,
            status: StatusEntrega::Pendente,
            data_prevista: dados.data_prevista,
            data_entrega_real: None,
            valor_frete: dados.valor_frete,
            produtos_nesta_entrega_ids: dados.produtos_nesta_entrega_ids,
        };
        self.tabelas().entregas.push(entrega.clone());
        Ok(entrega)
    }

    async fn update(
        &self,
        id: i64,
        alteracao: AlteracaoEntrega,
    ) -> Result<Option<Entrega>, AppError> {
        let mut tabelas = self.tabelas();
        let Some(entrega) = tabelas.entregas.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        if let Some(status) = alteracao.status {
            entrega.status = status;
        }
        if let Some(data_prevista) = alteracao.data_prevista {
            entrega.data_prevista = data_prevista;
        }
        if let Some(data_entrega_real) = alteracao.data_entrega_real {
            entrega.data_entrega_real = Some(data_entrega_real);
        }
        if let Some(valor_frete) = alteracao.valor_frete {
            entrega.valor_frete = valor_frete;
        }
        if let Some(produtos) = alteracao.produtos_nesta_entrega_ids {
            entrega.produtos_nesta_entrega_ids = produtos;
        }
        Ok(Some(entrega.clone()))
    }

    async fn replace(&self, id: i64, dados: DadosEntrega) -> Result<Option<Entrega>, AppError> {
        let mut tabelas = self.tabelas();
        let Some(entrega) = tabelas.entregas.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        entrega.endereco_entrega_id = dados.endereco_entrega_id;
        entrega.data_prevista = dados.data_prevista;
        entrega.valor_frete = dados.valor_frete;
        entrega.produtos_nesta_entrega_ids = dados.produtos_nesta_entrega_ids;
        Ok(Some(entrega.clone()))
    }

    async fn update_status(
        &self,
        id: i64,
        status: StatusEntrega,
        data_entrega_real: Option<DateTime<Utc>>,
    ) -> Result<Option<Entrega>, AppError> {
        let mut tabelas = self.tabelas();
        let Some(entrega) = tabelas.entregas.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        entrega.status = status;
        if entrega.data_entrega_real.is_none() {
            entrega.data_entrega_real = data_entrega_real;
        }
        Ok(Some(entrega.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tabelas = self.tabelas();
        let antes = tabelas.entregas.len();
        tabelas.entregas.retain(|e| e.id != id);
        Ok(tabelas.entregas.len() < antes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sequences_are_independent_per_collection() {
        let store = MemoryStore::new();
        assert_eq!(store.next_id(Colecao::Clientes).await.unwrap(), 1);
        assert_eq!(store.next_id(Colecao::Clientes).await.unwrap(), 2);
        assert_eq!(store.next_id(Colecao::Produtos).await.unwrap(), 1);
    }
}

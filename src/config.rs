// src/config.rs

use std::{env, time::Duration};

use anyhow::Context;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    db::Repositorios,
    services::{ClienteService, EnderecoService, EntregaService, ProdutoService},
};

const USUARIO_PADRAO: &str = "UsuarioValido";
const SENHA_PADRAO: &str = "SenhaValida";

/// Par usuário/senha aceito pelo guard de Basic auth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credenciais {
    pub usuario: String,
    pub senha: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub credenciais: Credenciais,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Recebe a fonte das variáveis para os testes não mexerem no ambiente do processo.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        let port = parse_or(&lookup, "PORT", 3000u16)?;
        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 5u32)?;
        let acquire_secs = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 3u64)?;
        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            anyhow::bail!("BCRYPT_COST deve estar entre 4 e 31, recebido {}", bcrypt_cost);
        }

        let credenciais = match (lookup("API_USUARIO"), lookup("API_SENHA")) {
            (Some(usuario), Some(senha)) => Credenciais { usuario, senha },
            _ => {
                tracing::warn!(
                    "⚠️ API_USUARIO/API_SENHA não definidas; usando as credenciais padrão."
                );
                Credenciais {
                    usuario: USUARIO_PADRAO.to_string(),
                    senha: SENHA_PADRAO.to_string(),
                }
            }
        };

        Ok(Self {
            database_url,
            port,
            db_max_connections,
            db_acquire_timeout: Duration::from_secs(acquire_secs),
            credenciais,
            bcrypt_cost,
        })
    }

    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.db_max_connections)
            .acquire_timeout(self.db_acquire_timeout)
            .connect(&self.database_url)
            .await?;
        Ok(pool)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, padrao: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} inválida: {:?}", key, raw)),
        None => Ok(padrao),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub cliente_service: ClienteService,
    pub endereco_service: EnderecoService,
    pub produto_service: ProdutoService,
    pub entrega_service: EntregaService,
    pub credenciais: Credenciais,
}

impl AppState {
    // --- Monta o gráfico de dependências ---
    pub fn new(repos: Repositorios, credenciais: Credenciais, bcrypt_cost: u32) -> Self {
        let cliente_service =
            ClienteService::new(repos.clientes.clone(), repos.sequencias.clone(), bcrypt_cost);
        let endereco_service = EnderecoService::new(
            repos.enderecos.clone(),
            repos.clientes.clone(),
            repos.sequencias.clone(),
        );
        let produto_service = ProdutoService::new(repos.produtos.clone(), repos.sequencias.clone());
        let entrega_service = EntregaService::new(
            repos.entregas,
            repos.enderecos,
            repos.produtos,
            repos.sequencias,
        );

        Self {
            cliente_service,
            endereco_service,
            produto_service,
            entrega_service,
            credenciais,
        }
    }

    pub fn from_pool(pool: PgPool, config: &Config) -> Self {
        Self::new(
            Repositorios::postgres(pool),
            config.credenciais.clone(),
            config.bcrypt_cost,
        )
    }

    #[cfg(test)]
    pub fn in_memory(store: &crate::db::memory::MemoryStore) -> Self {
        Self::new(
            store.repositorios(),
            Credenciais {
                usuario: USUARIO_PADRAO.to_string(),
                senha: SENHA_PADRAO.to_string(),
            },
            4,
        )
    }
}

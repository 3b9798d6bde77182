//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;

use crate::config::{AppState, Config};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // RUST_LOG controla o nível; sem ele, `info`.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("🔥 Configuração inválida: {:#}", e);
            std::process::exit(1);
        }
    };

    let db_pool = match config.connect().await {
        Ok(pool) => {
            tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
            pool
        }
        Err(e) => {
            tracing::error!("🔥 Falha ao conectar ao banco de dados: {:?}", e);
            std::process::exit(1);
        }
    };

    // Faz o app rodar as migrações do SQLx na inicialização
    if let Err(e) = sqlx::migrate!().run(&db_pool).await {
        tracing::error!("🔥 Falha ao rodar as migrações do banco de dados: {:?}", e);
        std::process::exit(1);
    }
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app_state = AppState::from_pool(db_pool, &config);
    let app = routes::build_router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("🔥 Falha ao iniciar o listener TCP em {}: {:?}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("🚀 Servidor escutando em {}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("🔥 Erro no servidor Axum: {:?}", e);
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Falha ao instalar o handler de Ctrl+C: {:?}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Falha ao instalar o handler de SIGTERM: {:?}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Sinal de encerramento recebido, finalizando conexões.");
}

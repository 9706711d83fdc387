use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bluewater_backend::auth::{JwtConfig, JwtService};
use bluewater_backend::rest::{app, AppState};
use bluewater_backend::storage::{JsonConnection, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir =
        std::env::var("BLUEWATER_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    info!("opening data directory {data_dir}");
    let conn = JsonConnection::new(&data_dir)?;
    let store = Store::open(&conn)?;

    let jwt = JwtService::new(&JwtConfig::from_env());
    let state = AppState::new(store, jwt);
    state.accounts.seed_if_empty()?;

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}

//! HTTP API over the blog service.

pub mod routes;
mod state;
pub mod v1;

use std::net::{IpAddr, Ipv4Addr};

use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use state::AppState;

use crate::db::Database;

pub const DEFAULT_PORT: u16 = 3737;

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}")]
    #[diagnostic(code(blog::api::bind), help("Is another process using the port?"))]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error")]
    #[diagnostic(code(blog::api::serve))]
    Serve(#[source] std::io::Error),
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server with the given configuration and database
pub async fn run<D: Database + 'static>(config: Config, db: D) -> Result<(), ServerError> {
    let app = routes::create_router(AppState::new(db)).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await.map_err(ServerError::Serve)?;
    Ok(())
}

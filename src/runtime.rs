//! Runtime services and shared state for the empty-agent.

use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    interaction,
    router::Router,
    service::{host, reply::connector::ConnectorReplyChannel},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the configuration and the frozen routing table.
/// It is trivially cloneable.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The agent's activity router.
    pub router: Router,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        let router = interaction::register(&config)?;

        info!("Registered {} activity handlers.", router.len());

        Ok(Self { config, router })
    }

    /// Bind the activity endpoint and serve until Ctrl-C.
    pub async fn start(&self) -> Void {
        let connector = ConnectorReplyChannel::new(&self.config)?;
        let listener = TcpListener::bind(self.config.bind_address()).await?;

        host::serve(listener, host::app(self.router.clone(), connector), shutdown_signal()).await
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl-C, shutting down ...");
    }
}

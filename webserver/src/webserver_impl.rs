//! Main webserver implementation
//!
//! This module contains the main WebServer struct that wires the stores into
//! the Axum router and runs it until a shutdown signal arrives.

use axum::{Router, routing::get};
use shared::{Component, component_info, logging};
use std::net::SocketAddr;
use tokio::sync::mpsc;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::web::handlers::api;

pub struct WebServer {
    state: WebServerState,
    shutdown_tx: mpsc::Sender<()>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl WebServer {
    pub fn new(state: WebServerState) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        Self {
            state,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Sender that stops `run` gracefully
    pub fn get_shutdown_sender(&self) -> mpsc::Sender<()> {
        self.shutdown_tx.clone()
    }

    pub fn state(&self) -> &WebServerState {
        &self.state
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Serve until the shutdown sender fires, then flush the stores
    pub async fn run(self, addr: SocketAddr) -> WebServerResult<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| WebServerError::ServerStartupFailed {
                address: addr.to_string(),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        component_info!(Component::WebServer, "🌐 Listening on http://{}", local_addr);

        let router = self.build_router();
        let Self { state, mut shutdown_rx, .. } = self;

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        logging::log_shutdown(Component::WebServer, "flushing tallies and feedback rules");
        state.shutdown().await;
        Ok(())
    }
}

/// Routes of the service, independent of any listener
pub fn build_router(state: WebServerState) -> Router {
    Router::new()
        .route("/", get(api::home).fallback(api::method_not_allowed))
        .route(
            "/primes/:number",
            get(api::lookup_prime).fallback(api::primes_method_not_allowed),
        )
        .route("/history", get(api::history).fallback(api::method_not_allowed))
        .route("/history/", get(api::history).fallback(api::method_not_allowed))
        .route(
            "/messages",
            get(api::get_messages)
                .post(api::post_messages)
                .fallback(api::method_not_allowed),
        )
        .route(
            "/messages/",
            get(api::get_messages)
                .post(api::post_messages)
                .fallback(api::method_not_allowed),
        )
        .fallback(api::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .into_inner(),
        )
        .with_state(state)
}

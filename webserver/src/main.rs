//! WebServer entry point
//!
//! Loads the stores from the data directory and serves the HTTP API until Ctrl+C.

use clap::Parser;
use shared::{
    Component, component_debug, component_info,
    logging::{self, LogConfig},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tally::FileRepository;
use tokio::signal;

use webserver::{WebServer, WebServerError, WebServerResult, WebServerState};

/// Prime lookup service with repeat-count feedback
#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Answers whether a number is prime and remembers who keeps asking")]
struct Args {
    /// Interface to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port for HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Directory holding the history and messages documents
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory for server.log and http.log (stdout only when empty)
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    let args = Args::parse();

    let log_dir = (!args.log_dir.as_os_str().is_empty()).then(|| args.log_dir.clone());
    logging::init_tracing(&LogConfig::new(log_dir, args.log_level.clone()))?;

    logging::log_startup(Component::WebServer, "prime lookup service");
    component_debug!(Component::WebServer, "Arguments: {:?}", args);

    let http_addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| WebServerError::config(format!("Invalid bind address: {}", e)))?;

    let repository = FileRepository::initialize(&args.data_dir).await?;
    component_info!(
        Component::Repository,
        "📂 Using data directory {}",
        repository.root().display()
    );

    let state = WebServerState::load(repository).await.inspect_err(|e| {
        logging::log_error(Component::WebServer, "Loading stores", e);
    })?;

    let webserver = WebServer::new(state);

    // Set up graceful shutdown
    let shutdown_sender = webserver.get_shutdown_sender();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                logging::log_shutdown(Component::WebServer, "Received Ctrl+C signal");
                let _ = shutdown_sender.send(()).await;
            }
            Err(err) => {
                logging::log_error(Component::WebServer, "Signal handling", &err);
            }
        }
    });

    webserver.run(http_addr).await?;

    logging::log_success(Component::WebServer, "WebServer stopped gracefully");
    Ok(())
}

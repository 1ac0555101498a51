mod config;
mod output;

use anyhow::Context;
use domain::{AppCommand, StoreEvent};
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Settings;
use session::Session;
use storage::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    // stdout 只输出事件 JSON，日志走 stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::new().context("Failed to load configuration")?;
    let session_config = settings.session_config();

    let store = Store::seeded(&settings.store_config());
    info!("Seeded store for local user {}", store.local_user());

    let (tx_cmd, rx_cmd) = mpsc::channel(session_config.command_buffer);
    let (tx_events, rx_events) = broadcast::channel(session_config.event_buffer);
    let cancel_token = CancellationToken::new();

    let worker = tokio::spawn(session::start(
        session_config,
        Session::new(store),
        rx_cmd,
        tx_events,
        cancel_token.clone(),
    ));
    let printer = tokio::spawn(print_events(rx_events));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                handle_line(&tx_cmd, line).await;
            },
            _ = &mut shutdown => {
                cancel_token.cancel();
                break;
            },
        }
    }

    drop(tx_cmd);
    let session = worker
        .await
        .context("Session loop panicked")?
        .context("Session loop failed")?;
    printer.await.context("Event printer panicked")?;

    println!("{}", output::summary(&session, domain::ids::now_millis()));
    Ok(())
}

async fn handle_line(tx: &mpsc::Sender<session::CommandEnvelope>, line: &str) {
    let cmd: AppCommand = match serde_json::from_str(line) {
        Ok(cmd) => cmd,
        Err(e) => {
            warn!("Unparseable command: {}", e);
            println!("{}", serde_json::json!({ "error": e.to_string(), "line": line }));
            return;
        }
    };
    let name = cmd.name();
    if let Err(e) = session::dispatch(tx, cmd).await {
        println!("{}", serde_json::json!({ "error": e.to_string(), "command": name }));
    }
}

async fn print_events(rx: broadcast::Receiver<StoreEvent>) {
    let mut stream = BroadcastStream::new(rx);
    while let Some(result) = stream.next().await {
        match result {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!("Event serialization error: {}", e),
            },
            Err(lagged) => warn!("Event printer lagged: {}", lagged),
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        },
    }
}

mod attachments;
mod driver;
mod handlers;
pub mod navigation;
mod state;
mod traits;
pub mod view;

pub use attachments::{is_accepted, mime_for, read_attachment, PendingAttachment, PendingInput};
pub use driver::EventLoopDriver;
pub use state::{ReaderView, Session};
pub use traits::Driver;

use domain::{AppCommand, StoreEvent};
use storage::StoreError;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("attachment error: {0}")]
    Attachment(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session loop closed")]
    Closed,
}

// --- 信封：命令 + 结果回传通道 ---
pub struct CommandEnvelope {
    pub cmd: AppCommand,
    pub resp: oneshot::Sender<Result<(), SessionError>>,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub command_buffer: usize,
    pub event_buffer: usize,
    pub max_attachment_bytes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            command_buffer: 100,
            event_buffer: 100,
            max_attachment_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Sends `cmd` to the loop and waits for it to be applied.
pub async fn dispatch(tx: &mpsc::Sender<CommandEnvelope>, cmd: AppCommand) -> Result<(), SessionError> {
    let (resp, rx) = oneshot::channel();
    tx.send(CommandEnvelope { cmd, resp })
        .await
        .map_err(|_| SessionError::Closed)?;
    rx.await.map_err(|_| SessionError::Closed)?
}

pub async fn start(
    config: SessionConfig,
    session: Session,
    rx: mpsc::Receiver<CommandEnvelope>,
    tx_events: broadcast::Sender<StoreEvent>,
    cancel_token: CancellationToken,
) -> anyhow::Result<Session> {
    let driver: Box<dyn Driver> = Box::new(EventLoopDriver::new(config));
    driver.run(session, rx, tx_events, cancel_token).await
}

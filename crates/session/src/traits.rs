use crate::{CommandEnvelope, Session};
use anyhow::Result;
use async_trait::async_trait;
use domain::StoreEvent;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait Driver: Send + Sync {
    /// Consumes commands until the channel closes or `cancel` fires, then
    /// hands the final session state back.
    async fn run(
        &self,
        session: Session,
        rx_cmd: mpsc::Receiver<CommandEnvelope>,
        tx_events: broadcast::Sender<StoreEvent>,
        cancel: CancellationToken,
    ) -> Result<Session>;
}

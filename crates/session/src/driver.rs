use anyhow::Result;
use async_trait::async_trait;
use domain::{AppCommand, StoreEvent};
use std::path::PathBuf;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::attachments::{read_attachment, PendingAttachment};
use crate::traits::Driver;
use crate::{CommandEnvelope, Session, SessionConfig, SessionError};

/// Single consumer applying commands in arrival order.
pub struct EventLoopDriver {
    config: SessionConfig,
}

impl EventLoopDriver {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Driver for EventLoopDriver {
    async fn run(
        &self,
        mut session: Session,
        mut rx_cmd: mpsc::Receiver<CommandEnvelope>,
        tx_events: broadcast::Sender<StoreEvent>,
        cancel: CancellationToken,
    ) -> Result<Session> {
        // 文件读取在独立任务中完成，结果经此通道回到主循环
        let (tx_file, mut rx_file) =
            mpsc::channel::<std::result::Result<PendingAttachment, SessionError>>(8);
        let max_bytes = self.config.max_attachment_bytes;

        info!("Session loop started");
        loop {
            tokio::select! {
                cmd_opt = rx_cmd.recv() => {
                    let envelope = match cmd_opt {
                        Some(e) => e,
                        None => break,
                    };

                    let CommandEnvelope { cmd, resp } = envelope;
                    let name = cmd.name();

                    let result = match cmd {
                        AppCommand::AttachFile { path } => {
                            let tx = tx_file.clone();
                            let path = PathBuf::from(path);
                            tokio::spawn(async move {
                                let loaded = read_attachment(&path, max_bytes).await;
                                let _ = tx.send(loaded).await;
                            });
                            Ok(Vec::new())
                        }
                        other => session.apply(other),
                    };

                    match result {
                        Ok(events) => {
                            debug!(command = name, events = events.len(), "command applied");
                            for ev in events {
                                let _ = tx_events.send(ev);
                            }
                            let _ = resp.send(Ok(()));
                        }
                        Err(e) => {
                            warn!("Command {} rejected: {}", name, e);
                            let _ = resp.send(Err(e));
                        }
                    }
                },
                Some(loaded) = rx_file.recv() => {
                    match loaded {
                        Ok(attachment) => {
                            let _ = tx_events.send(StoreEvent::AttachmentReady {
                                mime: attachment.mime.clone(),
                                bytes: attachment.bytes,
                            });
                            session.pending.set(attachment);
                        }
                        Err(e) => warn!("Attachment dropped: {}", e),
                    }
                },
                _ = cancel.cancelled() => break,
            }
        }

        info!("Session loop stopped");
        Ok(session)
    }
}

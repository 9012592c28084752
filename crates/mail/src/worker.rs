//! Background mail worker.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::delivery::MailTransport;
use crate::message::MailMessage;

/// Drains the mail queue into a transport.
pub struct MailWorker {
    transport: Arc<dyn MailTransport>,
}

impl MailWorker {
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// Run until every sender is dropped or `cancel` fires.
    ///
    /// On cancellation the channel is closed to new messages and whatever is
    /// already buffered is still delivered. Delivery failures are logged and
    /// the message is discarded.
    pub async fn run(&self, mut receiver: mpsc::Receiver<MailMessage>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Mail worker cancelled, draining queue");
                    receiver.close();
                    while let Some(message) = receiver.recv().await {
                        self.deliver(&message).await;
                    }
                    break;
                }
                next = receiver.recv() => match next {
                    Some(message) => self.deliver(&message).await,
                    None => {
                        tracing::info!("Mail queue closed, worker shutting down");
                        break;
                    }
                },
            }
        }
    }

    async fn deliver(&self, message: &MailMessage) {
        if let Err(e) = self.transport.send(message).await {
            tracing::error!(error = %e, to = %message.to, subject = %message.subject, "Failed to send mail");
        }
    }
}

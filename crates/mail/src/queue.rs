//! Bounded mail hand-off.
//!
//! Request handlers must never wait on mail, so [`MailQueue::enqueue`] uses
//! `try_send`: when the buffer is full the message is dropped and a warning
//! is logged.

use tokio::sync::mpsc;

use crate::message::MailMessage;

/// Default number of messages buffered between handlers and the worker.
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum MailQueueError {
    #[error("Mail queue is full")]
    Full,

    #[error("Mail queue is closed")]
    Closed,
}

/// Cloneable sending half of the mail channel.
#[derive(Debug, Clone)]
pub struct MailQueue {
    sender: mpsc::Sender<MailMessage>,
}

impl MailQueue {
    /// Create a queue with room for `capacity` messages, returning the
    /// receiver the worker drains.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<MailMessage>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Messages buffered and not yet picked up by the worker.
    pub fn backlog(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }

    /// Hand a message to the worker without waiting.
    pub fn enqueue(&self, message: MailMessage) -> Result<(), MailQueueError> {
        match self.sender.try_send(message) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(message)) => {
                tracing::warn!(to = %message.to, subject = %message.subject, "Mail queue full, message dropped");
                Err(MailQueueError::Full)
            }
            Err(mpsc::error::TrySendError::Closed(message)) => {
                tracing::warn!(to = %message.to, subject = %message.subject, "Mail queue closed, message dropped");
                Err(MailQueueError::Closed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(n: usize) -> MailMessage {
        MailMessage::new(
            format!("guest{n}@example.com"),
            "reservations@bookings.local",
            "Reservation confirmation",
            "<p>Thanks</p>",
        )
    }

    #[tokio::test]
    async fn enqueued_messages_reach_the_receiver() {
        let (queue, mut rx) = MailQueue::new(4);
        queue.enqueue(msg(1)).unwrap();
        assert_eq!(queue.backlog(), 1);
        let received = rx.recv().await.unwrap();
        assert_eq!(received.to, "guest1@example.com");
        assert_eq!(queue.backlog(), 0);
    }

    #[test]
    fn full_queue_rejects_without_blocking() {
        let (queue, _rx) = MailQueue::new(2);
        queue.enqueue(msg(1)).unwrap();
        queue.enqueue(msg(2)).unwrap();
        assert!(matches!(queue.enqueue(msg(3)), Err(MailQueueError::Full)));
        assert_eq!(queue.backlog(), 2);
    }

    #[test]
    fn dropped_receiver_reports_closed() {
        let (queue, rx) = MailQueue::new(2);
        drop(rx);
        assert!(matches!(queue.enqueue(msg(1)), Err(MailQueueError::Closed)));
    }
}

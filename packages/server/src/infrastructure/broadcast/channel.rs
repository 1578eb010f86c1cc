//! Broadcaster backed by `tokio::sync::broadcast`.
//!
//! Slow receivers get `RecvError::Lagged` and then resume from the oldest
//! value still retained, instead of jumping to the newest one like the ring
//! queue does.

use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::domain::{Broadcaster, ReceiveError, Subscription, broadcast::QueueError};

pub struct ChannelBroadcaster<T> {
    sender: broadcast::Sender<T>,
}

impl<T: Clone + Send + 'static> ChannelBroadcaster<T> {
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::ZeroCapacity);
        }
        let (sender, _) = broadcast::channel(capacity);
        Ok(Self { sender })
    }
}

impl<T: Clone + Send + Sync + 'static> Broadcaster<T> for ChannelBroadcaster<T> {
    fn publish(&self, value: T) {
        // send() only fails when there are no receivers; nothing to deliver then.
        let _ = self.sender.send(value);
    }

    fn subscribe(&self) -> Box<dyn Subscription<T>> {
        Box::new(ChannelSubscription {
            receiver: self.sender.subscribe(),
        })
    }

    fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

pub struct ChannelSubscription<T> {
    receiver: broadcast::Receiver<T>,
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> Subscription<T> for ChannelSubscription<T> {
    async fn receive(&mut self) -> Result<T, ReceiveError> {
        match self.receiver.recv().await {
            Ok(value) => Ok(value),
            Err(RecvError::Lagged(skipped)) => Err(ReceiveError::Lagged { skipped }),
            Err(RecvError::Closed) => Err(ReceiveError::Closed),
        }
    }
}

//! Broadcast interfaces: one ordered event stream fanned out to many subscribers.
//!
//! Sessions and the game loop only see these traits, so the backing queue can
//! be swapped without touching them.

use async_trait::async_trait;
use thiserror::Error;

/// Queue construction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("broadcast queue capacity must be greater than zero")]
    ZeroCapacity,
}

/// Errors returned by [`Subscription::receive`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReceiveError {
    /// The subscriber fell more than the queue capacity behind and its backlog was dropped
    #[error("subscriber lagged behind by {skipped} messages")]
    Lagged { skipped: u64 },

    /// No more values will ever be published
    #[error("broadcast queue closed")]
    Closed,
}

/// Producer side of the broadcast queue. Publishing never blocks.
pub trait Broadcaster<T>: Send + Sync {
    fn publish(&self, value: T);

    /// Start receiving values published from now on (no history is replayed)
    fn subscribe(&self) -> Box<dyn Subscription<T>>;

    /// Number of live subscriptions
    fn subscriber_count(&self) -> usize;
}

/// Consumer side of the broadcast queue: a private read position in the stream.
#[async_trait]
pub trait Subscription<T: Send>: Send + Sync {
    /// Wait for the next value in publish order
    async fn receive(&mut self) -> Result<T, ReceiveError>;
}

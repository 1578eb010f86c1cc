//! Broadcaster implementations.
//!
//! - `ring`: fixed-capacity ring buffer with per-subscriber cursors (default)
//! - `channel`: thin wrapper over `tokio::sync::broadcast`

pub mod channel;
pub mod ring;

use std::sync::Arc;

pub use channel::ChannelBroadcaster;
pub use ring::RingBroadcastQueue;

use crate::{
    config::QueueBackend,
    domain::{Broadcaster, Pixel, broadcast::QueueError},
};

/// Build the pixel broadcaster selected by configuration
pub fn build_pixel_broadcaster(
    backend: QueueBackend,
    capacity: usize,
) -> Result<Arc<dyn Broadcaster<Pixel>>, QueueError> {
    let broadcaster: Arc<dyn Broadcaster<Pixel>> = match backend {
        QueueBackend::Ring => Arc::new(RingBroadcastQueue::new(capacity)?),
        QueueBackend::Broadcast => Arc::new(ChannelBroadcaster::new(capacity)?),
    };
    Ok(broadcaster)
}

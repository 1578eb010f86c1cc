//! Game loop: the single writer that applies broadcast pixels to the canvas.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use crate::domain::{Broadcaster, CanvasRepository, Pixel, ReceiveError, Subscription};

/// How long the stream has to stay quiet before a stopping loop gives up draining
const DRAIN_IDLE: Duration = Duration::from_millis(50);

/// Consumes the pixel stream and paints every event onto the shared canvas.
///
/// The subscription is taken in [`GameLoop::new`], so nothing published after
/// construction is missed even if the task starts later.
pub struct GameLoop {
    subscription: Box<dyn Subscription<Pixel>>,
    repository: Arc<dyn CanvasRepository>,
}

impl GameLoop {
    pub fn new(
        broadcaster: &dyn Broadcaster<Pixel>,
        repository: Arc<dyn CanvasRepository>,
    ) -> Self {
        Self {
            subscription: broadcaster.subscribe(),
            repository,
        }
    }

    /// Run until the broadcaster is closed
    pub async fn run(self) {
        self.run_until(std::future::pending()).await
    }

    /// Run until the broadcaster is closed or `stop` resolves.
    ///
    /// After `stop` resolves, pixels that are already published keep being
    /// applied until the stream stays idle for [`DRAIN_IDLE`].
    pub async fn run_until<F>(mut self, stop: F)
    where
        F: Future<Output = ()> + Send,
    {
        tracing::info!("Game loop started");
        tokio::pin!(stop);
        loop {
            let received = tokio::select! {
                received = self.subscription.receive() => received,
                _ = &mut stop => break,
            };
            if !self.apply(received).await {
                tracing::info!("Game loop stopped");
                return;
            }
        }

        let mut drained: u64 = 0;
        while let Ok(received) =
            tokio::time::timeout(DRAIN_IDLE, self.subscription.receive()).await
        {
            let is_pixel = received.is_ok();
            if !self.apply(received).await {
                break;
            }
            if is_pixel {
                drained += 1;
            }
        }
        tracing::info!(drained, "Game loop stopped");
    }

    /// Returns `false` once the stream is closed
    async fn apply(&self, received: Result<Pixel, ReceiveError>) -> bool {
        match received {
            Ok(pixel) => {
                self.repository.paint(pixel).await;
                true
            }
            Err(ReceiveError::Lagged { skipped }) => {
                // The canvas misses these pixels; keep applying what comes next.
                tracing::warn!(skipped, "Game loop fell behind the pixel stream");
                true
            }
            Err(ReceiveError::Closed) => false,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub fn spawn_until<F>(self, stop: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(self.run_until(stop))
    }
}

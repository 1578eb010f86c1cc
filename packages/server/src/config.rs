//! Server configuration.

use std::{path::PathBuf, time::Duration};

use reqwest::Url;
use thiserror::Error;

use crate::domain::Dimensions;

/// Which broadcaster implementation fans out pixel events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum QueueBackend {
    /// Ring buffer with per-subscriber cursors
    #[default]
    Ring,
    /// `tokio::sync::broadcast` channel
    Broadcast,
}

/// Configuration errors, reported at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("canvas width and height must be greater than zero (got {width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("queue capacity must be greater than zero")]
    ZeroQueueCapacity,

    #[error("persistence interval must be greater than zero")]
    ZeroPersistInterval,
}

/// Everything needed to start the canvas server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub width: u32,
    pub height: u32,
    pub queue_capacity: usize,
    pub queue_backend: QueueBackend,
    pub cooldown: Duration,
    /// Snapshot file; persistence is disabled when absent
    pub snapshot_path: Option<PathBuf>,
    pub persist_interval: Duration,
    /// Remote authorization service; the development authenticator is used when absent
    pub auth_endpoint: Option<Url>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            width: 500,
            height: 250,
            queue_capacity: 1 << 20,
            queue_backend: QueueBackend::Ring,
            cooldown: Duration::from_secs(10),
            snapshot_path: None,
            persist_interval: Duration::from_secs(60),
            auth_endpoint: None,
        }
    }
}

impl ServerConfig {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        if self.snapshot_path.is_some() && self.persist_interval.is_zero() {
            return Err(ConfigError::ZeroPersistInterval);
        }
        Ok(())
    }
}

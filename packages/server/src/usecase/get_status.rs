//! UseCase: サーバー状態の取得

use std::{sync::Arc, time::Duration};

use crate::domain::{Broadcaster, Dimensions, Pixel};

/// サーバー状態（`/api/status` のレスポンスの元になる）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    pub dimensions: Dimensions,
    pub cooldown: Duration,
    /// ゲームループを含む、現在の購読者数
    pub subscribers: usize,
    /// 起動時刻（Unix ミリ秒）
    pub started_at: i64,
}

/// サーバー状態取得のユースケース
pub struct GetStatusUseCase {
    dimensions: Dimensions,
    cooldown: Duration,
    broadcaster: Arc<dyn Broadcaster<Pixel>>,
    started_at: i64,
}

impl GetStatusUseCase {
    pub fn new(
        dimensions: Dimensions,
        cooldown: Duration,
        broadcaster: Arc<dyn Broadcaster<Pixel>>,
        started_at: i64,
    ) -> Self {
        Self {
            dimensions,
            cooldown,
            broadcaster,
            started_at,
        }
    }

    pub fn execute(&self) -> ServerStatus {
        ServerStatus {
            dimensions: self.dimensions,
            cooldown: self.cooldown,
            subscribers: self.broadcaster.subscriber_count(),
            started_at: self.started_at,
        }
    }
}

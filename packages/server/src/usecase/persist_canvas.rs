//! UseCase: キャンバスの永続化
//!
//! 現在のキャンバスをエンコードして SnapshotStore に保存します。
//! 定期保存タスクとシャットダウン時の最終保存の両方から呼ばれます。

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::domain::{CanvasCodec, CanvasRepository, SnapshotStore};

use super::error::PersistError;

/// キャンバス永続化のユースケース
pub struct PersistCanvasUseCase {
    repository: Arc<dyn CanvasRepository>,
    codec: Arc<dyn CanvasCodec>,
    store: Arc<dyn SnapshotStore>,
}

impl PersistCanvasUseCase {
    /// 新しい PersistCanvasUseCase を作成
    pub fn new(
        repository: Arc<dyn CanvasRepository>,
        codec: Arc<dyn CanvasCodec>,
        store: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            repository,
            codec,
            store,
        }
    }

    /// スナップショットを 1 回保存し、書き込んだバイト数を返す
    pub async fn execute(&self) -> Result<usize, PersistError> {
        let bytes = self.repository.export(self.codec.clone()).await?;
        self.store.save(&bytes).await?;
        Ok(bytes.len())
    }

    /// `period` ごとに保存するタスクを起動する
    ///
    /// 保存に失敗してもタスクは止めず、次の周期で再試行する。
    pub fn spawn_periodic(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // 最初の tick は即座に完了するので読み捨てる
            interval.tick().await;

            loop {
                interval.tick().await;
                match self.execute().await {
                    Ok(size) => tracing::debug!(size, "Canvas snapshot saved"),
                    Err(e) => tracing::error!(error = %e, "Failed to save canvas snapshot"),
                }
            }
        })
    }
}

//! UseCase: 起動時のキャンバス復元
//!
//! 保存済みスナップショットがあればそれを読み込み、なければ白紙のキャンバスを作ります。
//! スナップショットが壊れている・寸法が違う場合も起動は止めず、白紙から始めます。

use std::sync::Arc;

use crate::domain::{Canvas, CanvasCodec, CanvasError, Dimensions, SnapshotStore};

/// キャンバス復元のユースケース
pub struct RestoreCanvasUseCase {
    codec: Arc<dyn CanvasCodec>,
    store: Option<Arc<dyn SnapshotStore>>,
}

impl RestoreCanvasUseCase {
    /// 新しい RestoreCanvasUseCase を作成（`store` が `None` なら常に白紙）
    pub fn new(codec: Arc<dyn CanvasCodec>, store: Option<Arc<dyn SnapshotStore>>) -> Self {
        Self { codec, store }
    }

    /// `dimensions` のキャンバスを用意する
    ///
    /// エラーになるのは寸法そのものが不正な場合だけ。
    pub async fn execute(&self, dimensions: Dimensions) -> Result<Canvas, CanvasError> {
        if let Some(canvas) = self.load_snapshot(dimensions).await {
            return Ok(canvas);
        }
        Canvas::new(dimensions.width, dimensions.height)
    }

    async fn load_snapshot(&self, dimensions: Dimensions) -> Option<Canvas> {
        let store = self.store.as_ref()?;

        let bytes = match store.load().await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::info!("No canvas snapshot found, starting from a blank canvas");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read canvas snapshot, starting from a blank canvas");
                return None;
            }
        };

        let canvas = match self.codec.decode(&bytes) {
            Ok(canvas) => canvas,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to decode canvas snapshot, starting from a blank canvas");
                return None;
            }
        };

        if canvas.dimensions() != dimensions {
            let e = CanvasError::DimensionMismatch {
                expected: dimensions,
                actual: canvas.dimensions(),
            };
            tracing::warn!(error = %e, "Ignoring canvas snapshot");
            return None;
        }

        tracing::info!(%dimensions, size = bytes.len(), "Canvas restored from snapshot");
        Some(canvas)
    }
}

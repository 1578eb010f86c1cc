//! InMemory Canvas Repository 実装
//!
//! ドメイン層が定義する CanvasRepository trait の具体的な実装。
//! プロセス内のキャンバス 1 枚を `RwLock` で保護して保持します。
//!
//! - 書き込み（paint）はゲームループからのみ呼ばれ、排他ロックを取る
//! - スナップショットの書き出しは共有ロックの下で複製だけを取り、
//!   エンコードはロックを離してからブロッキングスレッドで行う

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    Canvas, CanvasCodec, CanvasRepository, CodecError, Dimensions, Pixel,
};

/// インメモリ Canvas Repository 実装
pub struct InMemoryCanvasRepository {
    /// 寸法はロックなしで参照できるようにキャッシュしておく
    dimensions: Dimensions,
    canvas: RwLock<Canvas>,
}

impl InMemoryCanvasRepository {
    /// 新しい InMemoryCanvasRepository を作成
    pub fn new(canvas: Canvas) -> Self {
        Self {
            dimensions: canvas.dimensions(),
            canvas: RwLock::new(canvas),
        }
    }

    /// 現在のキャンバスの複製を返す（テスト・デバッグ用）
    pub async fn snapshot(&self) -> Canvas {
        self.canvas.read().await.clone()
    }
}

#[async_trait]
impl CanvasRepository for InMemoryCanvasRepository {
    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    async fn paint(&self, pixel: Pixel) {
        let mut canvas = self.canvas.write().await;
        canvas.paint(pixel);
    }

    async fn export(&self, codec: Arc<dyn CanvasCodec>) -> Result<Vec<u8>, CodecError> {
        let canvas = self.canvas.read().await.clone();
        tokio::task::spawn_blocking(move || codec.encode(&canvas))
            .await
            .map_err(|e| CodecError::Encode(format!("encoder task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Color, Position},
        infrastructure::codec::PngCanvasCodec,
    };
    use std::{
        sync::atomic::{AtomicBool, Ordering},
        time::Duration,
    };

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryCanvasRepository の paint / export
    // - 書き込み中でない限り export が並行に実行できること
    // - エンコード中もロックを保持せず paint が待たされないこと
    //
    // 【なぜこのテストが必要か】
    // - Repository はゲームループとセッションが共有するキャンバスの唯一の窓口
    // - 新規接続時のスナップショットが最新の状態を反映している必要がある
    // ========================================

    fn create_test_repository(width: u32, height: u32) -> InMemoryCanvasRepository {
        InMemoryCanvasRepository::new(Canvas::new(width, height).unwrap())
    }

    #[tokio::test]
    async fn test_dimensions_are_cached() {
        // テスト項目: 寸法がキャンバスの寸法と一致する
        // given (前提条件):
        let repository = create_test_repository(7, 3);

        // when (操作):
        let dimensions = repository.dimensions();

        // then (期待する結果):
        assert_eq!(dimensions, Dimensions::new(7, 3));
    }

    #[tokio::test]
    async fn test_paint_is_visible_in_export() {
        // テスト項目: paint した結果が export したスナップショットに反映される
        // given (前提条件):
        let repository = create_test_repository(4, 4);
        let codec = Arc::new(PngCanvasCodec::new());
        let blue = Color::new(0, 0, 255);

        // when (操作):
        repository
            .paint(Pixel::new(Position::new(3, 0), blue))
            .await;
        let bytes = repository.export(codec.clone()).await.unwrap();

        // then (期待する結果):
        let decoded = codec.decode(&bytes).unwrap();
        assert_eq!(decoded.color_at(Position::new(3, 0)), Some(blue));
        assert_eq!(decoded, repository.snapshot().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_exports_and_paints() {
        // テスト項目: paint と export を並行に実行しても全ての paint が反映される
        // given (前提条件):
        let repository = Arc::new(create_test_repository(16, 16));
        let codec = Arc::new(PngCanvasCodec::new());

        // when (操作):
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let repository = repository.clone();
                let codec = codec.clone();
                tokio::spawn(async move {
                    for _ in 0..10 {
                        repository.export(codec.clone()).await.unwrap();
                    }
                })
            })
            .collect();
        let writer = {
            let repository = repository.clone();
            tokio::spawn(async move {
                for x in 0..16 {
                    repository
                        .paint(Pixel::new(Position::new(x, x), Color::new(0, 0, 0)))
                        .await;
                }
            })
        };
        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }

        // then (期待する結果):
        let canvas = repository.snapshot().await;
        for x in 0..16 {
            assert_eq!(
                canvas.color_at(Position::new(x, x)),
                Some(Color::new(0, 0, 0))
            );
        }
    }

    /// エンコードに時間がかかる codec（開始したことを通知する）
    struct SlowCodec {
        started: Arc<AtomicBool>,
    }

    impl CanvasCodec for SlowCodec {
        fn encode(&self, _canvas: &Canvas) -> Result<Vec<u8>, CodecError> {
            self.started.store(true, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(300));
            Ok(Vec::new())
        }

        fn decode(&self, _bytes: &[u8]) -> Result<Canvas, CodecError> {
            Err(CodecError::Decode("not supported".to_string()))
        }

        fn content_type(&self) -> &'static str {
            "application/octet-stream"
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_paint_is_not_blocked_by_slow_export() {
        // テスト項目: エンコード中でも paint がロック待ちにならない
        // given (前提条件):
        let repository = Arc::new(create_test_repository(4, 4));
        let started = Arc::new(AtomicBool::new(false));
        let codec = Arc::new(SlowCodec {
            started: started.clone(),
        });
        let export = {
            let repository = repository.clone();
            tokio::spawn(async move { repository.export(codec).await })
        };
        while !started.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        // when (操作):
        let blue = Color::new(0, 0, 255);
        let painted = tokio::time::timeout(
            Duration::from_millis(100),
            repository.paint(Pixel::new(Position::new(1, 1), blue)),
        )
        .await;

        // then (期待する結果):
        assert!(painted.is_ok());
        assert_eq!(
            repository.snapshot().await.color_at(Position::new(1, 1)),
            Some(blue)
        );
        assert!(export.await.unwrap().is_ok());
    }
}

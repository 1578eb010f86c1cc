//! UseCase: 現在のキャンバス画像を取得

use std::sync::Arc;

use crate::domain::{CanvasCodec, CanvasRepository, CodecError};

/// キャンバス取得のユースケース（HTTP からのダウンロード用）
pub struct GetCanvasUseCase {
    repository: Arc<dyn CanvasRepository>,
    codec: Arc<dyn CanvasCodec>,
}

impl GetCanvasUseCase {
    pub fn new(repository: Arc<dyn CanvasRepository>, codec: Arc<dyn CanvasCodec>) -> Self {
        Self { repository, codec }
    }

    /// エンコード済みの画像と Content-Type を返す
    pub async fn execute(&self) -> Result<(Vec<u8>, &'static str), CodecError> {
        let bytes = self.repository.export(self.codec.clone()).await?;
        Ok((bytes, self.codec.content_type()))
    }
}

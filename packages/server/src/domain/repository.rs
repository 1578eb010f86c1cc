//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;

use super::{
    codec::CanvasCodec,
    error::{CodecError, StorageError},
    value_object::{Dimensions, Pixel},
};

/// Canvas Repository trait
///
/// 共有キャンバスへのアクセスをまとめたインターフェース。
/// 書き込み（paint）はゲームループだけが行い、スナップショットの書き出しは
/// どのセッションからでも並行に呼ばれる。
#[async_trait]
pub trait CanvasRepository: Send + Sync {
    /// キャンバスの寸法（生存期間中は不変）
    fn dimensions(&self) -> Dimensions;

    /// ピクセルを 1 つ塗る
    async fn paint(&self, pixel: Pixel);

    /// 現在のキャンバスを codec でエンコードしたスナップショットを返す
    ///
    /// エンコードはロックを離してからブロッキングスレッドで行う。
    async fn export(&self, codec: Arc<dyn CanvasCodec>) -> Result<Vec<u8>, CodecError>;
}

/// Snapshot Store trait
///
/// エンコード済みスナップショットの永続化先。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// 保存済みのスナップショットを読み込む（存在しない場合は `None`）
    async fn load(&self) -> Result<Option<Vec<u8>>, StorageError>;

    /// スナップショットを保存する
    async fn save(&self, bytes: &[u8]) -> Result<(), StorageError>;
}

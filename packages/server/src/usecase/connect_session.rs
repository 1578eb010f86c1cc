//! UseCase: セッション接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectSessionUseCase::authenticate() と open() メソッド
//!
//! ### なぜこのテストが必要か
//! - 認証に失敗したクライアントにはセッションを作らない
//! - 新しいセッションは購読開始後のスナップショットを受け取る必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：認証成功、スナップショット取得
//! - 異常系：Cookie なし、認証失敗
//! - エッジケース：スナップショット取得と同時に publish された値も取りこぼさない

use std::sync::Arc;

use crate::domain::{
    Authenticator, Broadcaster, CanvasCodec, CanvasRepository, Pixel, SessionToken, Subscription,
    UserId,
};

use super::error::ConnectError;

/// Everything a freshly opened session needs before streaming starts
pub struct SessionStart {
    /// Receives every pixel published after the session opened
    pub subscription: Box<dyn Subscription<Pixel>>,
    /// Encoded canvas to send as the first frame
    pub snapshot: Vec<u8>,
}

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    authenticator: Arc<dyn Authenticator>,
    repository: Arc<dyn CanvasRepository>,
    codec: Arc<dyn CanvasCodec>,
    broadcaster: Arc<dyn Broadcaster<Pixel>>,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        repository: Arc<dyn CanvasRepository>,
        codec: Arc<dyn CanvasCodec>,
        broadcaster: Arc<dyn Broadcaster<Pixel>>,
    ) -> Self {
        Self {
            authenticator,
            repository,
            codec,
            broadcaster,
        }
    }

    /// 接続してきたクライアントを認証する
    ///
    /// # Returns
    ///
    /// * `Ok(UserId)` - 認証成功
    /// * `Err(ConnectError)` - Cookie がない、または認証に失敗
    pub async fn authenticate(&self, token: Option<SessionToken>) -> Result<UserId, ConnectError> {
        let token = token.ok_or(ConnectError::MissingCredentials)?;
        self.authenticator
            .authenticate(&token)
            .await
            .ok_or(ConnectError::Unauthorized)
    }

    /// 購読を開始し、初期スナップショットを取得する
    ///
    /// 購読をスナップショットより先に開始するため、スナップショット取得中に
    /// publish されたピクセルもストリーム側で必ず受け取れる（重複は同じ色の上書きになるだけ）。
    pub async fn open(&self) -> Result<SessionStart, ConnectError> {
        let subscription = self.broadcaster.subscribe();
        let snapshot = self.repository.export(self.codec.clone()).await?;
        Ok(SessionStart {
            subscription,
            snapshot,
        })
    }
}

//! UseCase: ピクセル塗り処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PaintPixelUseCase::admit()（クールダウン判定）と execute()（範囲チェックと publish）
//!
//! ### なぜこのテストが必要か
//! - クールダウン中のリクエストは黙って捨てられ、ブロードキャストされない
//! - 範囲外のピクセルはセッションを終了させるプロトコル違反として扱う
//! - キャンバスへの書き込みはここでは行わず、publish だけを行う
//!
//! ### どのような状況を想定しているか
//! - 正常系：範囲内のピクセルが publish される
//! - 異常系：クールダウン中、範囲外
//! - エッジケース：キャンバスの端ちょうど（x = W - 1 と x = W）

use std::sync::Arc;

use crate::domain::{Broadcaster, CooldownDecision, CooldownGate, Dimensions, Pixel, UserId};

use super::error::PaintError;

/// ピクセル塗りのユースケース
pub struct PaintPixelUseCase {
    broadcaster: Arc<dyn Broadcaster<Pixel>>,
    cooldown: Arc<CooldownGate>,
    dimensions: Dimensions,
}

impl PaintPixelUseCase {
    /// 新しい PaintPixelUseCase を作成
    pub fn new(
        broadcaster: Arc<dyn Broadcaster<Pixel>>,
        cooldown: Arc<CooldownGate>,
        dimensions: Dimensions,
    ) -> Self {
        Self {
            broadcaster,
            cooldown,
            dimensions,
        }
    }

    /// クールダウンを判定する
    ///
    /// ペイロードのパースより先に呼ぶことで、連打されたリクエストを安く捨てられる。
    pub fn admit(&self, user_id: UserId) -> Result<(), PaintError> {
        match self.cooldown.attempt(user_id) {
            CooldownDecision::Accepted => Ok(()),
            CooldownDecision::Denied { remaining } => Err(PaintError::CoolingDown { remaining }),
        }
    }

    /// 範囲チェックを行い、ピクセルを publish する
    ///
    /// キャンバスへの反映はゲームループが非同期に行う。
    pub fn execute(&self, pixel: Pixel) -> Result<(), PaintError> {
        if !self.dimensions.contains(pixel.position) {
            return Err(PaintError::OutOfBounds {
                position: pixel.position,
            });
        }
        self.broadcaster.publish(pixel);
        Ok(())
    }
}

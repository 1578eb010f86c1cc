//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::usecase::{
    ConnectSessionUseCase, GetCanvasUseCase, GetStatusUseCase, PaintPixelUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectSessionUseCase（認証とセッション開始のユースケース）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// PaintPixelUseCase（ピクセル塗りのユースケース）
    pub paint_pixel_usecase: Arc<PaintPixelUseCase>,
    /// GetCanvasUseCase（キャンバス画像取得のユースケース）
    pub get_canvas_usecase: Arc<GetCanvasUseCase>,
    /// GetStatusUseCase（サーバー状態取得のユースケース）
    pub get_status_usecase: Arc<GetStatusUseCase>,
}

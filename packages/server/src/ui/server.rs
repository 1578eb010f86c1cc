//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectSessionUseCase, GetCanvasUseCase, GetStatusUseCase, PaintPixelUseCase,
};

use super::{
    handler::{get_canvas, get_status, health_check, websocket_handler},
    state::AppState,
};

/// Collaborative canvas server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_session_usecase,
///     paint_pixel_usecase,
///     get_canvas_usecase,
///     get_status_usecase,
/// );
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
/// server.serve(listener, shutdown_signal()).await?;
/// ```
pub struct Server {
    /// ConnectSessionUseCase（認証とセッション開始のユースケース）
    connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// PaintPixelUseCase（ピクセル塗りのユースケース）
    paint_pixel_usecase: Arc<PaintPixelUseCase>,
    /// GetCanvasUseCase（キャンバス画像取得のユースケース）
    get_canvas_usecase: Arc<GetCanvasUseCase>,
    /// GetStatusUseCase（サーバー状態取得のユースケース）
    get_status_usecase: Arc<GetStatusUseCase>,
}

impl Server {
    pub fn new(
        connect_session_usecase: Arc<ConnectSessionUseCase>,
        paint_pixel_usecase: Arc<PaintPixelUseCase>,
        get_canvas_usecase: Arc<GetCanvasUseCase>,
        get_status_usecase: Arc<GetStatusUseCase>,
    ) -> Self {
        Self {
            connect_session_usecase,
            paint_pixel_usecase,
            get_canvas_usecase,
            get_status_usecase,
        }
    }

    /// Build the router with every endpoint
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_session_usecase: self.connect_session_usecase,
            paint_pixel_usecase: self.paint_pixel_usecase,
            get_canvas_usecase: self.get_canvas_usecase,
            get_status_usecase: self.get_status_usecase,
        });

        Router::new()
            // WebSocket エンドポイント（ルートパスでも受け付ける）
            .route("/", get(websocket_handler))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/status", get(get_status))
            .route("/api/canvas.png", get(get_canvas))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// # Errors
    ///
    /// Returns an error if the listener address cannot be read or the server
    /// fails while running.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        let app = self.router();

        tracing::info!("Canvas server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

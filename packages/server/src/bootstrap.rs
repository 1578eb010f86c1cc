//! Application wiring: builds every component from a [`ServerConfig`] and runs them.

use std::{future::Future, sync::Arc, time::Duration};

use thiserror::Error;
use tokio::net::TcpListener;

use crate::{
    config::{ConfigError, ServerConfig},
    domain::{
        Authenticator, CanvasCodec, CanvasError, CooldownGate, SnapshotStore,
        broadcast::QueueError,
    },
    infrastructure::{
        auth::{DevAuthenticator, RemoteAuthenticator},
        broadcast::build_pixel_broadcaster,
        codec::PngCanvasCodec,
        repository::InMemoryCanvasRepository,
        storage::FileSnapshotStore,
    },
    ui::Server,
    usecase::{
        ConnectSessionUseCase, GameLoop, GetCanvasUseCase, GetStatusUseCase, PaintPixelUseCase,
        PersistCanvasUseCase, RestoreCanvasUseCase,
    },
};
use hekiga_shared::time::get_jst_timestamp;

/// Startup and serving errors
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create canvas: {0}")]
    Canvas(#[from] CanvasError),

    #[error("failed to create broadcast queue: {0}")]
    Queue(#[from] QueueError),

    #[error("failed to create authorization client: {0}")]
    Auth(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Pick the authenticator for `config`
///
/// Without an endpoint every numeric cookie is trusted as a user id.
pub fn authenticator_from_config(
    config: &ServerConfig,
) -> Result<Arc<dyn Authenticator>, BootstrapError> {
    match &config.auth_endpoint {
        Some(endpoint) => {
            tracing::info!("Authorizing sessions against {}", endpoint);
            Ok(Arc::new(RemoteAuthenticator::new(endpoint.clone())?))
        }
        None => {
            tracing::warn!(
                "No --auth-endpoint given: session cookies are trusted as user ids. Do not expose this server."
            );
            Ok(Arc::new(DevAuthenticator))
        }
    }
}

/// Upper bound on how long shutdown waits for the game loop to apply queued pixels
const GAME_LOOP_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// A fully wired canvas server that has not started serving yet
pub struct Application {
    server: Server,
    game_loop: GameLoop,
    persist_canvas_usecase: Option<Arc<PersistCanvasUseCase>>,
    persist_interval: Duration,
}

impl Application {
    /// Initialize dependencies in order:
    /// 1. Canvas (restored from the snapshot when available)
    /// 2. Repository
    /// 3. Broadcaster and game loop
    /// 4. UseCases
    /// 5. Server
    pub async fn build(
        config: &ServerConfig,
        authenticator: Arc<dyn Authenticator>,
    ) -> Result<Self, BootstrapError> {
        config.validate()?;
        let dimensions = config.dimensions();
        let codec: Arc<dyn CanvasCodec> = Arc::new(PngCanvasCodec::new());
        let store: Option<Arc<dyn SnapshotStore>> = config
            .snapshot_path
            .clone()
            .map(|path| Arc::new(FileSnapshotStore::new(path)) as Arc<dyn SnapshotStore>);

        // 1. Canvas
        let canvas = RestoreCanvasUseCase::new(codec.clone(), store.clone())
            .execute(dimensions)
            .await?;
        tracing::info!("Canvas {} ready", dimensions);

        // 2. Repository
        let repository = Arc::new(InMemoryCanvasRepository::new(canvas));

        // 3. Broadcaster and game loop (subscribed before any session can publish)
        let broadcaster = build_pixel_broadcaster(config.queue_backend, config.queue_capacity)?;
        tracing::info!(
            backend = ?config.queue_backend,
            capacity = config.queue_capacity,
            "Broadcast queue created"
        );
        let game_loop = GameLoop::new(broadcaster.as_ref(), repository.clone());

        // 4. UseCases
        let cooldown = Arc::new(CooldownGate::new(config.cooldown));
        let connect_session_usecase = Arc::new(ConnectSessionUseCase::new(
            authenticator,
            repository.clone(),
            codec.clone(),
            broadcaster.clone(),
        ));
        let paint_pixel_usecase = Arc::new(PaintPixelUseCase::new(
            broadcaster.clone(),
            cooldown,
            dimensions,
        ));
        let get_canvas_usecase = Arc::new(GetCanvasUseCase::new(repository.clone(), codec.clone()));
        let get_status_usecase = Arc::new(GetStatusUseCase::new(
            dimensions,
            config.cooldown,
            broadcaster,
            get_jst_timestamp(),
        ));
        let persist_canvas_usecase = store
            .map(|store| Arc::new(PersistCanvasUseCase::new(repository, codec, store)));

        // 5. Server
        let server = Server::new(
            connect_session_usecase,
            paint_pixel_usecase,
            get_canvas_usecase,
            get_status_usecase,
        );

        Ok(Self {
            server,
            game_loop,
            persist_canvas_usecase,
            persist_interval: config.persist_interval,
        })
    }

    /// Serve on `listener` until `shutdown` resolves, then write a final snapshot
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), BootstrapError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let mut game_loop_handle = self.game_loop.spawn_until(async move {
            let _ = stop_rx.await;
        });
        let persist_handle = self
            .persist_canvas_usecase
            .clone()
            .map(|usecase| usecase.spawn_periodic(self.persist_interval));

        let result = self.server.serve(listener, shutdown).await;

        if let Some(handle) = persist_handle {
            handle.abort();
        }

        // Let queued pixels reach the canvas before the final snapshot
        let _ = stop_tx.send(());
        if tokio::time::timeout(GAME_LOOP_DRAIN_TIMEOUT, &mut game_loop_handle)
            .await
            .is_err()
        {
            tracing::warn!("Game loop did not stop in time; pending pixels are dropped");
            game_loop_handle.abort();
        }

        if let Some(usecase) = &self.persist_canvas_usecase {
            match usecase.execute().await {
                Ok(size) => tracing::info!(size, "Final canvas snapshot saved"),
                Err(e) => tracing::error!("Failed to save final canvas snapshot: {}", e),
            }
        }

        result.map_err(BootstrapError::from)
    }
}

//! UseCase layer: application operations built on the domain interfaces.

pub mod connect_session;
pub mod error;
pub mod game_loop;
pub mod get_canvas;
pub mod get_status;
pub mod paint_pixel;
pub mod persist_canvas;
pub mod restore_canvas;

pub use connect_session::{ConnectSessionUseCase, SessionStart};
pub use error::{ConnectError, PaintError, PersistError};
pub use game_loop::GameLoop;
pub use get_canvas::GetCanvasUseCase;
pub use get_status::{GetStatusUseCase, ServerStatus};
pub use paint_pixel::PaintPixelUseCase;
pub use persist_canvas::PersistCanvasUseCase;
pub use restore_canvas::RestoreCanvasUseCase;

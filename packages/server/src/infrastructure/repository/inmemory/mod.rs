//! In-memory repositories.

pub mod canvas;

pub use canvas::InMemoryCanvasRepository;

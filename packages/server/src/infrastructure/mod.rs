//! Infrastructure layer: concrete implementations of the domain interfaces.

pub mod auth;
pub mod broadcast;
pub mod codec;
pub mod dto;
pub mod repository;
pub mod storage;

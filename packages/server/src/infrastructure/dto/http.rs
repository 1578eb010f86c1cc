//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response of `GET /api/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDto {
    pub width: u32,
    pub height: u32,
    pub cooldown_ms: u64,
    pub subscribers: usize,
    pub started_at: String,
}

//! Authentication interface.

use async_trait::async_trait;

use super::value_object::{SessionToken, UserId};

/// Maps a connecting client's session credential to a user identity.
///
/// Implementations are expected to bound their own response time; a hanging
/// authenticator would hold the connection open.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// `None` means the client is not allowed to connect
    async fn authenticate(&self, token: &SessionToken) -> Option<UserId>;
}

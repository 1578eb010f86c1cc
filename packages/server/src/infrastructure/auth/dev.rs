//! Development authenticator.

use async_trait::async_trait;

use crate::domain::{Authenticator, SessionToken, UserId};

/// Treats the session cookie as a plain numeric user id.
///
/// Anyone can claim any identity with it; it exists for local runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DevAuthenticator;

#[async_trait]
impl Authenticator for DevAuthenticator {
    async fn authenticate(&self, token: &SessionToken) -> Option<UserId> {
        match token.as_str().trim().parse::<u64>() {
            Ok(id) => Some(UserId::new(id)),
            Err(_) => {
                tracing::debug!("Session cookie is not a numeric user id");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_numeric_cookie_is_accepted() {
        // テスト項目: 数値の Cookie はそのままユーザー ID になる
        // given (前提条件):
        let authenticator = DevAuthenticator;

        // when (操作):
        let user = authenticator.authenticate(&SessionToken::new("42")).await;

        // then (期待する結果):
        assert_eq!(user, Some(UserId::new(42)));
    }

    #[tokio::test]
    async fn test_non_numeric_cookie_is_rejected() {
        // テスト項目: 数値でない Cookie は拒否される
        // given (前提条件):
        let authenticator = DevAuthenticator;

        // when (操作):
        let user = authenticator.authenticate(&SessionToken::new("alice")).await;

        // then (期待する結果):
        assert_eq!(user, None);
    }
}

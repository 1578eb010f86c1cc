//! Authenticator backed by an external authorization service.
//!
//! `GET <endpoint>?cookie=<session>` is expected to answer with
//! `{"session_id": <user id or null>}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::domain::{Authenticator, SessionToken, UserId};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct AuthServerResponse {
    session_id: Option<u64>,
}

pub struct RemoteAuthenticator {
    endpoint: Url,
    client: Client,
}

impl RemoteAuthenticator {
    pub fn new(endpoint: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn lookup(&self, token: &SessionToken) -> Result<Option<u64>, reqwest::Error> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("cookie", token.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let body = response.json::<AuthServerResponse>().await?;
        Ok(body.session_id)
    }
}

#[async_trait]
impl Authenticator for RemoteAuthenticator {
    async fn authenticate(&self, token: &SessionToken) -> Option<UserId> {
        match self.lookup(token).await {
            Ok(session_id) => session_id.map(UserId::new),
            Err(e) => {
                tracing::warn!("Authorization request to {} failed: {}", self.endpoint, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
    use std::collections::HashMap;

    /// Serve a fake authorization service on an ephemeral port
    async fn spawn_auth_server() -> Url {
        async fn authorize(
            Query(query): Query<HashMap<String, String>>,
        ) -> Result<Json<serde_json::Value>, StatusCode> {
            match query.get("cookie").map(String::as_str) {
                Some("valid") => Ok(Json(serde_json::json!({"session_id": 1234}))),
                Some("broken") => Err(StatusCode::INTERNAL_SERVER_ERROR),
                _ => Ok(Json(serde_json::json!({"session_id": null}))),
            }
        }

        let app = Router::new().route("/authorize", get(authorize));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{}/authorize", addr)).unwrap()
    }

    #[tokio::test]
    async fn test_known_cookie_maps_to_user() {
        // テスト項目: 認可サーバーが session_id を返した場合はユーザー ID になる
        // given (前提条件):
        let authenticator = RemoteAuthenticator::new(spawn_auth_server().await).unwrap();

        // when (操作):
        let user = authenticator.authenticate(&SessionToken::new("valid")).await;

        // then (期待する結果):
        assert_eq!(user, Some(UserId::new(1234)));
    }

    #[tokio::test]
    async fn test_null_session_is_rejected() {
        // テスト項目: session_id が null の場合は拒否される
        // given (前提条件):
        let authenticator = RemoteAuthenticator::new(spawn_auth_server().await).unwrap();

        // when (操作):
        let user = authenticator.authenticate(&SessionToken::new("unknown")).await;

        // then (期待する結果):
        assert_eq!(user, None);
    }

    #[tokio::test]
    async fn test_server_error_is_rejected() {
        // テスト項目: 認可サーバーがエラーを返した場合は拒否される
        // given (前提条件):
        let authenticator = RemoteAuthenticator::new(spawn_auth_server().await).unwrap();

        // when (操作):
        let user = authenticator.authenticate(&SessionToken::new("broken")).await;

        // then (期待する結果):
        assert_eq!(user, None);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_rejected() {
        // テスト項目: 認可サーバーに接続できない場合は拒否される
        // given (前提条件):
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let endpoint = Url::parse(&format!("http://{}/authorize", addr)).unwrap();
        let authenticator = RemoteAuthenticator::new(endpoint).unwrap();

        // when (操作):
        let user = authenticator.authenticate(&SessionToken::new("valid")).await;

        // then (期待する結果):
        assert_eq!(user, None);
    }
}

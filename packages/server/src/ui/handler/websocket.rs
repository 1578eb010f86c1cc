//! WebSocket session handler.
//!
//! A session goes through three phases:
//!
//! 1. Authentication on the upgrade request (`session` cookie). Rejected
//!    requests get `403 Forbidden` and are never upgraded.
//! 2. Snapshot: the current canvas is sent as a single binary frame.
//! 3. Streaming: pixel requests from the client are admitted and published,
//!    while every published pixel is pushed back as a text frame.
//!
//! The inbound and outbound flows run in the same task; whichever finishes
//! first ends the session and decides the close frame.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade, close_code},
    },
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use futures_util::{
    sink::{Sink, SinkExt},
    stream::{SplitStream, StreamExt},
};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    domain::{Pixel, ReceiveError, SessionToken, Subscription, UserId},
    infrastructure::dto::websocket::PixelMessage,
    ui::state::AppState,
    usecase::{ConnectError, PaintPixelUseCase, SessionStart},
};

/// Cookie that carries the opaque session token
const SESSION_COOKIE: &str = "session";

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    let token = session_token_from_headers(&headers);

    let user_id = match state.connect_session_usecase.authenticate(token).await {
        Ok(user_id) => user_id,
        Err(ConnectError::MissingCredentials) => {
            tracing::debug!("Rejected WebSocket upgrade without a session cookie");
            return Err(StatusCode::FORBIDDEN);
        }
        Err(e) => {
            tracing::debug!("Rejected WebSocket upgrade: {}", e);
            return Err(StatusCode::FORBIDDEN);
        }
    };

    Ok(ws
        .on_failed_upgrade(move |e| {
            tracing::debug!(%user_id, "WebSocket upgrade failed: {}", e);
        })
        .on_upgrade(move |socket| {
            let connection_id = Uuid::new_v4();
            let span = tracing::info_span!("session", %connection_id, %user_id);
            handle_socket(socket, state, user_id).instrument(span)
        }))
}

/// Extract the `session` cookie from the request headers.
///
/// Multiple `Cookie` headers are searched in order; the first match wins.
fn session_token_from_headers(headers: &HeaderMap) -> Option<SessionToken> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| SessionToken::new(value.trim_matches('"')))
}

/// Why a session ended
#[derive(Debug, PartialEq, Eq)]
enum SessionEnd {
    /// The client closed the connection or the stream ended
    ClientClosed,
    /// Reading from or writing to the socket failed
    TransportError,
    /// The client sent something the protocol does not allow
    ProtocolViolation(&'static str),
    /// The client could not keep up with the pixel stream
    Lagged { skipped: u64 },
    /// The broadcaster is gone; the server is shutting down
    QueueClosed,
}

impl SessionEnd {
    fn close_frame(&self) -> Option<CloseFrame> {
        let (code, reason) = match self {
            SessionEnd::ClientClosed | SessionEnd::TransportError => return None,
            SessionEnd::ProtocolViolation(reason) => (close_code::POLICY, *reason),
            SessionEnd::Lagged { .. } => (close_code::AGAIN, "lagged behind the pixel stream"),
            SessionEnd::QueueClosed => (close_code::AWAY, "server is shutting down"),
        };
        Some(CloseFrame {
            code,
            reason: Utf8Bytes::from_static(reason),
        })
    }
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>, user_id: UserId) {
    tracing::info!("Session opened");

    // Subscribe before taking the snapshot so no pixel falls between the two
    let SessionStart {
        subscription,
        snapshot,
    } = match state.connect_session_usecase.open().await {
        Ok(start) => start,
        Err(e) => {
            tracing::error!("Failed to prepare canvas snapshot: {}", e);
            let frame = CloseFrame {
                code: close_code::ERROR,
                reason: Utf8Bytes::from_static("snapshot unavailable"),
            };
            let _ = socket.send(Message::Close(Some(frame))).await;
            return;
        }
    };

    let (mut sender, mut receiver) = socket.split();

    let snapshot_size = snapshot.len();
    if let Err(e) = sender.send(Message::Binary(snapshot.into())).await {
        tracing::debug!("Failed to send canvas snapshot: {}", e);
        return;
    }
    tracing::debug!(size = snapshot_size, "Sent canvas snapshot");

    let end = tokio::select! {
        end = inbound_loop(&mut receiver, &state.paint_pixel_usecase, user_id) => end,
        end = outbound_loop(&mut sender, subscription) => end,
    };

    match &end {
        SessionEnd::ProtocolViolation(reason) => {
            tracing::warn!("Closing session on protocol violation: {}", reason)
        }
        SessionEnd::Lagged { skipped } => {
            tracing::warn!(skipped, "Closing session that fell behind the pixel stream")
        }
        _ => {}
    }

    match end.close_frame() {
        Some(frame) => {
            let _ = sender.send(Message::Close(Some(frame))).await;
        }
        None => {
            let _ = sender.close().await;
        }
    }

    tracing::info!(reason = ?end, "Session closed");
}

/// Handle client frames until the session has to end
async fn inbound_loop(
    receiver: &mut SplitStream<WebSocket>,
    paint_pixel_usecase: &PaintPixelUseCase,
    user_id: UserId,
) -> SessionEnd {
    while let Some(message) = receiver.next().await {
        let message = match message {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!("WebSocket receive error: {}", e);
                return SessionEnd::TransportError;
            }
        };

        match message {
            Message::Text(text) => {
                // Cooldown comes first so that flooding costs no parsing
                if let Err(e) = paint_pixel_usecase.admit(user_id) {
                    tracing::debug!("Dropped paint request: {}", e);
                    continue;
                }

                let pixel_message = match PixelMessage::from_json(text.as_str()) {
                    Ok(message) => message,
                    Err(e) => {
                        tracing::debug!("Malformed pixel message: {}", e);
                        return SessionEnd::ProtocolViolation("malformed pixel message");
                    }
                };

                if let Err(e) = paint_pixel_usecase.execute(Pixel::from(pixel_message)) {
                    tracing::debug!("{}", e);
                    return SessionEnd::ProtocolViolation("pixel is outside of the canvas");
                }
            }
            Message::Binary(_) => {
                return SessionEnd::ProtocolViolation("binary frames are not accepted");
            }
            Message::Ping(_) | Message::Pong(_) => {
                // Pong replies are sent by the WebSocket layer
            }
            Message::Close(_) => return SessionEnd::ClientClosed,
        }
    }

    SessionEnd::ClientClosed
}

/// Push every published pixel to the client, in publish order
async fn outbound_loop<S>(
    sender: &mut S,
    mut subscription: Box<dyn Subscription<Pixel>>,
) -> SessionEnd
where
    S: Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    loop {
        let pixel = match subscription.receive().await {
            Ok(pixel) => pixel,
            Err(ReceiveError::Lagged { skipped }) => return SessionEnd::Lagged { skipped },
            Err(ReceiveError::Closed) => return SessionEnd::QueueClosed,
        };

        let json = match PixelMessage::from(pixel).to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize pixel: {}", e);
                continue;
            }
        };

        if let Err(e) = sender.send(Message::Text(json.into())).await {
            tracing::debug!("WebSocket send error: {}", e);
            return SessionEnd::TransportError;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    use crate::{
        domain::{Broadcaster, Color, Position},
        infrastructure::broadcast::{ChannelBroadcaster, RingBroadcastQueue},
    };

    fn headers_with_cookies(cookies: &[&'static str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(header::COOKIE, HeaderValue::from_static(cookie));
        }
        headers
    }

    #[test]
    fn test_session_cookie_is_extracted() {
        // テスト項目: Cookie ヘッダーから session の値を取り出せる
        // given (前提条件):
        let headers = headers_with_cookies(&["theme=dark; session=abc123; lang=ja"]);

        // when (操作):
        let token = session_token_from_headers(&headers);

        // then (期待する結果):
        assert_eq!(token, Some(SessionToken::new("abc123")));
    }

    #[test]
    fn test_session_cookie_in_second_header() {
        // テスト項目: 複数の Cookie ヘッダーがある場合も探索される
        // given (前提条件):
        let headers = headers_with_cookies(&["theme=dark", "session=42"]);

        // when (操作):
        let token = session_token_from_headers(&headers);

        // then (期待する結果):
        assert_eq!(token, Some(SessionToken::new("42")));
    }

    #[test]
    fn test_missing_session_cookie() {
        // テスト項目: session Cookie がない場合は None
        // given (前提条件):
        let without_session = headers_with_cookies(&["sessionid=1; other=2"]);
        let without_header = HeaderMap::new();

        // when (操作) / then (期待する結果):
        assert_eq!(session_token_from_headers(&without_session), None);
        assert_eq!(session_token_from_headers(&without_header), None);
    }

    #[test]
    fn test_quoted_cookie_value_is_unquoted() {
        // テスト項目: ダブルクォートで囲まれた値はクォートを外して扱う
        // given (前提条件):
        let headers = headers_with_cookies(&["session=\"7\""]);

        // when (操作):
        let token = session_token_from_headers(&headers);

        // then (期待する結果):
        assert_eq!(token, Some(SessionToken::new("7")));
    }

    #[test]
    fn test_close_frames_per_session_end() {
        // テスト項目: 終了理由ごとに適切なクローズコードが選ばれる
        // given (前提条件):
        let violation = SessionEnd::ProtocolViolation("malformed pixel message");
        let lagged = SessionEnd::Lagged { skipped: 3 };

        // when (操作):
        let violation_frame = violation.close_frame().unwrap();
        let lagged_frame = lagged.close_frame().unwrap();

        // then (期待する結果):
        assert_eq!(violation_frame.code, close_code::POLICY);
        assert_eq!(violation_frame.reason.as_str(), "malformed pixel message");
        assert_eq!(lagged_frame.code, close_code::AGAIN);
        assert_eq!(
            SessionEnd::QueueClosed.close_frame().map(|frame| frame.code),
            Some(close_code::AWAY)
        );
        assert!(SessionEnd::ClientClosed.close_frame().is_none());
        assert!(SessionEnd::TransportError.close_frame().is_none());
    }

    #[tokio::test]
    async fn test_outbound_loop_ends_when_subscriber_lags() {
        // テスト項目: 購読者が取りこぼした場合は何も送らずに Lagged で終わる
        // given (前提条件):
        let queue = RingBroadcastQueue::<Pixel>::new(2).unwrap();
        let subscription = Broadcaster::subscribe(&queue);
        for x in 0..3 {
            queue.publish(Pixel::new(Position::new(x, 0), Color::new(0, 0, 0)));
        }
        let mut sent: Vec<Message> = Vec::new();

        // when (操作):
        let end = outbound_loop(&mut sent, subscription).await;

        // then (期待する結果):
        assert_eq!(end, SessionEnd::Lagged { skipped: 3 });
        assert!(sent.is_empty());
    }

    #[tokio::test]
    async fn test_outbound_loop_forwards_pixels_until_closed() {
        // テスト項目: 配信されたピクセルをテキストフレームで送り、配信が閉じたら QueueClosed で終わる
        // given (前提条件):
        let broadcaster = ChannelBroadcaster::<Pixel>::new(4).unwrap();
        let subscription = broadcaster.subscribe();
        let pixel = Pixel::new(Position::new(2, 1), Color::new(0, 0, 255));
        broadcaster.publish(pixel);
        drop(broadcaster);
        let mut sent: Vec<Message> = Vec::new();

        // when (操作):
        let end = outbound_loop(&mut sent, subscription).await;

        // then (期待する結果):
        assert_eq!(end, SessionEnd::QueueClosed);
        let expected = PixelMessage::from(pixel).to_json().unwrap();
        assert_eq!(sent, vec![Message::Text(expected.into())]);
    }
}

//! WebSocket client session management.

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use hekiga_server::{
    domain::CanvasCodec,
    infrastructure::{codec::PngCanvasCodec, dto::websocket::PixelMessage},
};
use hekiga_shared::time::get_jst_timestamp;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{
        self,
        client::IntoClientRequest,
        http::{HeaderValue, StatusCode, header::COOKIE},
        protocol::Message,
    },
};

use crate::{command::PaintCommand, error::ClientError};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Run one WebSocket session
///
/// Returns `Ok(())` when the user leaves (the input channel closes) and an
/// error when the connection could not be opened or was lost.
pub async fn run_client_session(
    url: &str,
    session: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let ws_stream = connect(url, session).await?;

    tracing::info!("Connected to canvas server!");
    println!("\nConnected. Press Ctrl+C to exit.\n");

    let (mut write, mut read) = ws_stream.split();

    let result = tokio::select! {
        result = read_loop(&mut read) => result,
        result = write_loop(&mut write, input_rx) => result,
    };

    if result.is_ok() {
        let _ = write.close().await;
    }
    result
}

async fn connect(url: &str, session: &str) -> Result<WsStream, ClientError> {
    let mut request = url
        .into_client_request()
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    let cookie = HeaderValue::from_str(&format!("session={}", session))
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    request.headers_mut().insert(COOKIE, cookie);

    match connect_async(request).await {
        Ok((ws_stream, _)) => Ok(ws_stream),
        Err(tungstenite::Error::Http(response)) if response.status() == StatusCode::FORBIDDEN => {
            Err(ClientError::Unauthorized)
        }
        Err(e) => Err(ClientError::ConnectionError(e.to_string())),
    }
}

/// Print the snapshot and every pixel update until the connection ends
async fn read_loop(read: &mut SplitStream<WsStream>) -> Result<(), ClientError> {
    let codec = PngCanvasCodec::new();

    while let Some(message) = read.next().await {
        match message {
            Ok(Message::Binary(data)) => match codec.decode(&data) {
                Ok(canvas) => {
                    print!(
                        "{}",
                        MessageFormatter::format_snapshot(canvas.dimensions(), data.len())
                    );
                    redisplay_prompt();
                }
                Err(e) => tracing::warn!("Failed to decode canvas snapshot: {}", e),
            },
            Ok(Message::Text(text)) => {
                let formatted = match PixelMessage::from_json(text.as_str()) {
                    Ok(pixel) => MessageFormatter::format_pixel(&pixel, get_jst_timestamp()),
                    Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                };
                print!("{}", formatted);
                redisplay_prompt();
            }
            Ok(Message::Close(frame)) => {
                if let Some(frame) = frame {
                    print!(
                        "{}",
                        MessageFormatter::format_closed(u16::from(frame.code), frame.reason.as_str())
                    );
                }
                return Err(ClientError::ConnectionError(
                    "Server closed the connection".to_string(),
                ));
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("WebSocket read error: {}", e);
                return Err(ClientError::ConnectionError(e.to_string()));
            }
        }
    }

    Err(ClientError::ConnectionError("Connection lost".to_string()))
}

/// Send every valid command typed by the user
async fn write_loop(
    write: &mut SplitSink<WsStream, Message>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    while let Some(line) = input_rx.recv().await {
        let pixel = match PaintCommand::parse(&line) {
            Ok(command) => command.to_message(),
            Err(e) => {
                println!("{}", e);
                redisplay_prompt();
                continue;
            }
        };

        let json = match pixel.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize pixel: {}", e);
                continue;
            }
        };

        if let Err(e) = write.send(Message::Text(json.into())).await {
            tracing::warn!("Failed to send pixel: {}", e);
            return Err(ClientError::ConnectionError(e.to_string()));
        }

        print!("{}", MessageFormatter::format_sent_confirmation(&pixel));
        redisplay_prompt();
    }

    Ok(())
}

//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{Attachment, ConnectionId, ConnectionState, RoomEvent, ValueObjectError},
    infrastructure::dto::websocket::{AttachmentDto, IncomingMessage},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.max_message_size(state.limits.max_frame_bytes)
        .max_frame_size(state.limits.max_frame_bytes)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains this connection's outbound queue into the WebSocket.
///
/// Use cases only enqueue into the bounded channel; this task owns the socket writes.
///
/// # Arguments
///
/// * `rx` - Outbound queue for this connection
/// * `sender` - WebSocket sink to send frames to this client
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();

    let (tx, rx) = mpsc::channel(state.limits.outbound_buffer);
    let connection_id = state.connect_client_usecase.execute(tx).await;

    let (stop_tx, stop_rx) = oneshot::channel();
    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = tokio::spawn(receive_loop(
        state.clone(),
        connection_id.clone(),
        receiver,
        stop_rx,
    ));

    // The receive task is never aborted: an event it has started must finish
    // its fan-out before the connection is torn down.
    let received = tokio::select! {
        result = &mut recv_task => {
            send_task.abort();
            result
        }
        _ = &mut send_task => {
            let _ = stop_tx.send(());
            recv_task.await
        }
    };

    match received {
        Ok(connection) => tracing::debug!(
            "Connection '{}' stopped reading ({:?})",
            connection_id.as_str(),
            connection
        ),
        Err(e) => tracing::error!(
            "Receive task for '{}' failed: {}",
            connection_id.as_str(),
            e
        ),
    }

    state
        .disconnect_client_usecase
        .execute(&connection_id)
        .await;
    tracing::info!("Connection '{}' closed", connection_id.as_str());
}

/// Reads client events until the socket closes or `stop` fires.
///
/// `stop` is only observed while waiting for the next frame, so an event that
/// has been taken off the socket is always handled to completion.
async fn receive_loop<S>(
    state: Arc<AppState>,
    connection_id: ConnectionId,
    mut receiver: S,
    mut stop: oneshot::Receiver<()>,
) -> ConnectionState
where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    let mut connection = ConnectionState::default();

    loop {
        let msg = tokio::select! {
            biased;
            _ = &mut stop => break,
            msg = receiver.next() => msg,
        };
        let msg = match msg {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id.as_str(), e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                connection = handle_text(&state, &connection_id, connection, text.as_str()).await;
            }
            Message::Binary(_) => {
                reject(&state, &connection_id, "binary frames are not supported").await;
            }
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", connection_id.as_str());
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            _ => {}
        }
    }

    connection.close()
}

async fn handle_text(
    state: &AppState,
    connection_id: &ConnectionId,
    connection: ConnectionState,
    text: &str,
) -> ConnectionState {
    let incoming = match serde_json::from_str::<IncomingMessage>(text) {
        Ok(incoming) => incoming,
        Err(e) => {
            tracing::debug!("Malformed event from '{}': {}", connection_id.as_str(), e);
            reject(state, connection_id, format!("malformed event: {}", e)).await;
            return connection;
        }
    };

    match incoming {
        IncomingMessage::Join { nickname } => {
            let joined = match connection.join() {
                Ok(joined) => joined,
                Err(e) => {
                    reject(state, connection_id, e.to_string()).await;
                    return connection;
                }
            };
            match state.join_room_usecase.execute(connection_id, nickname).await {
                Ok(_) => joined,
                Err(e) => {
                    reject(state, connection_id, e.to_string()).await;
                    connection
                }
            }
        }
        IncomingMessage::CreateCategory { name } => {
            if let Err(e) = connection.ensure_joined() {
                reject(state, connection_id, e.to_string()).await;
                return connection;
            }
            if let Err(e) = state
                .create_category_usecase
                .execute(connection_id, name)
                .await
            {
                reject(state, connection_id, e.to_string()).await;
            }
            connection
        }
        IncomingMessage::SendMessage {
            text,
            category,
            attachments,
        } => {
            if let Err(e) = connection.ensure_joined() {
                reject(state, connection_id, e.to_string()).await;
                return connection;
            }
            let attachments = match into_attachments(attachments, state.limits.max_attachment_bytes)
            {
                Ok(attachments) => attachments,
                Err(e) => {
                    reject(state, connection_id, e.to_string()).await;
                    return connection;
                }
            };
            if let Err(e) = state
                .send_message_usecase
                .execute(connection_id, text, category, attachments)
                .await
            {
                reject(state, connection_id, e.to_string()).await;
            }
            connection
        }
    }
}

// DTO → Domain Model
fn into_attachments(
    attachments: Vec<AttachmentDto>,
    max_bytes: usize,
) -> Result<Vec<Attachment>, ValueObjectError> {
    attachments
        .into_iter()
        .map(|a| a.into_domain(max_bytes))
        .collect()
}

/// Answers the offending connection alone with an error notification.
async fn reject(state: &AppState, connection_id: &ConnectionId, reason: impl Into<String>) {
    let event = RoomEvent::error(reason);
    if let Err(e) = state.message_pusher.push_to(connection_id, &event).await {
        tracing::warn!(
            "Failed to report error to '{}': {}",
            connection_id.as_str(),
            e
        );
    }
}

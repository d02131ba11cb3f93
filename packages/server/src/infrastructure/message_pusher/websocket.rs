//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（有界の `mpsc::Sender`）を管理
//! - イベントを JSON にエンコードしてキューに積む（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! キューへの投入は `try_send` のみで行い、決して待たない。
//! キューが満杯の接続にはそのイベントを届けず、警告を記録する。
//! 遅い接続が他の接続への配信を止めることはない。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, RoomEvent},
    infrastructure::dto::encode_event,
};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信キュー
    ///
    /// Key: connection_id
    /// Value: PusherChannel
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

fn encode(event: &RoomEvent) -> Result<String, MessagePushError> {
    encode_event(event).map_err(|e| MessagePushError::PushFailed(e.to_string()))
}

fn enqueue(
    connection_id: &ConnectionId,
    sender: &PusherChannel,
    frame: String,
) -> Result<(), MessagePushError> {
    sender.try_send(frame).map_err(|e| match e {
        TrySendError::Full(_) => MessagePushError::QueueFull(connection_id.as_str().to_string()),
        TrySendError::Closed(_) => {
            MessagePushError::PushFailed(format!("channel of '{}' is closed", connection_id.as_str()))
        }
    })
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!(
            "Client '{}' registered to MessagePusher",
            connection_id.as_str()
        );
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Client '{}' unregistered from MessagePusher",
            connection_id.as_str()
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let frame = encode(event)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.as_str().to_string()))?;
        enqueue(connection_id, sender, frame)?;
        tracing::debug!(
            "Pushed {} to client '{}'",
            event.name(),
            connection_id.as_str()
        );
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let frame = encode(event)?;
        let clients = self.clients.lock().await;

        for target in targets {
            let Some(sender) = clients.get(&target) else {
                tracing::warn!(
                    "Client '{}' not found during broadcast, skipping",
                    target.as_str()
                );
                continue;
            };
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = enqueue(&target, sender, frame.clone()) {
                tracing::warn!("Dropped {} for '{}': {}", event.name(), target.as_str(), e);
            }
        }
        tracing::debug!("Broadcasted {}", event.name());

        Ok(())
    }
}

//! Shared state handed to every handler.

use std::sync::Arc;

use crate::{
    domain::MessagePusher,
    usecase::{
        ConnectClientUseCase, CreateCategoryUseCase, DisconnectClientUseCase,
        GetRoomStateUseCase, JoinRoomUseCase, SendMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// CreateCategoryUseCase（カテゴリ作成のユースケース）
    pub create_category_usecase: Arc<CreateCategoryUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// DisconnectClientUseCase（切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// GetRoomStateUseCase（ルーム状態取得のユースケース）
    pub get_room_state_usecase: Arc<GetRoomStateUseCase>,
    /// Errors are reported straight to the offending connection.
    pub message_pusher: Arc<dyn MessagePusher>,
    pub limits: ConnectionLimits,
}

/// Per-connection transport limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionLimits {
    /// Capacity of each outbound queue; events beyond it are dropped for that peer.
    pub outbound_buffer: usize,
    pub max_attachment_bytes: usize,
    /// Largest inbound WebSocket message accepted.
    pub max_frame_bytes: usize,
}

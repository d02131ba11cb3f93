//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - セッションの削除、残りの参加者への userLeft と sessionsUpdate
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みの接続の切断
//! - エッジケース：参加前の接続の切断（誰にも通知しない）、最後の参加者の切断

use std::sync::Arc;

use roomcast_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, RoomEvent, SessionRecord, SessionRepository, Timestamp,
};

use super::{RelaySequencer, broadcast_or_warn, connection_ids};

/// 切断のユースケース
pub struct DisconnectClientUseCase {
    /// Session Registry
    sessions: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: RelaySequencer,
    clock: Arc<dyn Clock>,
}

impl DisconnectClientUseCase {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: RelaySequencer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            message_pusher,
            sequencer,
            clock,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(SessionRecord)` - 参加済みだった接続のセッション（退出が通知された）
    /// * `None` - 参加前の接続（何も通知しない）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<SessionRecord> {
        let _guard = self.sequencer.lock().await;

        self.message_pusher.unregister_client(connection_id).await;
        let session = self.sessions.unregister(connection_id).await?;

        let remaining = self.sessions.list().await;
        let targets = connection_ids(&remaining);
        broadcast_or_warn(
            self.message_pusher.as_ref(),
            targets.clone(),
            &RoomEvent::UserLeft {
                session: session.clone(),
                left_at: Timestamp::new(self.clock.now_millis()),
            },
        )
        .await;
        broadcast_or_warn(
            self.message_pusher.as_ref(),
            targets,
            &RoomEvent::SessionsUpdate(remaining),
        )
        .await;

        tracing::info!(
            "'{}' ({}) left the room",
            session.nickname.as_str(),
            connection_id.as_str()
        );
        Some(session)
    }
}

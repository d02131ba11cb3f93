//! UseCase: ルームへの参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - セッション登録、スナップショット送信、参加通知、セッション一覧更新
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初の参加者、後から参加する参加者
//! - 異常系：同じ接続での二重参加、不正なニックネーム
//! - エッジケース：参加前に送られたメッセージがスナップショットに含まれる

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Nickname, RoomEvent, RoomRepository, SessionRecord,
    SessionRepository,
};

use super::{
    RelaySequencer, broadcast_or_warn, connection_ids, error::JoinError, push_or_warn,
};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Room State Store
    repository: Arc<dyn RoomRepository>,
    /// Session Registry
    sessions: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: RelaySequencer,
}

impl JoinRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: RelaySequencer,
    ) -> Self {
        Self {
            repository,
            sessions,
            message_pusher,
            sequencer,
        }
    }

    /// 参加を実行
    ///
    /// 1. セッションを登録
    /// 2. 参加者本人にスナップショットを送信
    /// 3. 他の参加者に `userJoined` を送信
    /// 4. 全員に `sessionsUpdate` を送信
    ///
    /// # Returns
    ///
    /// * `Ok(SessionRecord)` - 登録されたセッション
    /// * `Err(JoinError)` - ニックネームが不正、または参加済み
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        nickname: String,
    ) -> Result<SessionRecord, JoinError> {
        let nickname = Nickname::new(nickname)?;

        let _guard = self.sequencer.lock().await;

        let session = self
            .sessions
            .register(connection_id.clone(), nickname)
            .await
            .map_err(|_| JoinError::DuplicateJoin)?;
        let sessions = self.sessions.list().await;
        let snapshot = self.repository.snapshot().await;

        push_or_warn(
            self.message_pusher.as_ref(),
            connection_id,
            &RoomEvent::Snapshot {
                snapshot,
                sessions: sessions.clone(),
            },
        )
        .await;

        let others = sessions
            .iter()
            .filter(|s| &s.connection_id != connection_id)
            .map(|s| s.connection_id.clone())
            .collect();
        broadcast_or_warn(
            self.message_pusher.as_ref(),
            others,
            &RoomEvent::UserJoined(session.clone()),
        )
        .await;

        broadcast_or_warn(
            self.message_pusher.as_ref(),
            connection_ids(&sessions),
            &RoomEvent::SessionsUpdate(sessions),
        )
        .await;

        tracing::info!(
            "'{}' joined as '{}'",
            connection_id.as_str(),
            session.nickname.as_str()
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{Fixture, START_TIME, drain, of_type, types};
    use super::*;
    use crate::domain::{ValueObjectError, value_object::NICKNAME_MAX_CHARS};

    #[tokio::test]
    async fn test_first_join_receives_snapshot_then_sessions_update() {
        // テスト項目: 最初の参加者はスナップショットとセッション一覧を受け取る
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, mut alice_rx) = fixture.connect().await;

        // when (操作):
        let session = fixture
            .join_usecase()
            .execute(&alice, "Alice".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(session.nickname.as_str(), "Alice");
        assert_eq!(session.joined_at.value(), START_TIME);
        let events = drain(&mut alice_rx);
        assert_eq!(types(&events), vec!["snapshot", "sessionsUpdate"]);
        assert_eq!(
            events[0]["categories"],
            serde_json::json!(["Ogólne", "Praca", "Rozrywka"])
        );
        assert_eq!(events[0]["sessions"][0]["nickname"], "Alice");
    }

    #[tokio::test]
    async fn test_second_join_notifies_existing_participant() {
        // テスト項目: 後から参加した参加者は既存の参加者に一度だけ通知される
        // given (前提条件):
        let fixture = Fixture::new();
        let (_alice, mut alice_rx) = fixture.join("Alice").await;
        let (bob, mut bob_rx) = fixture.connect().await;

        // when (操作):
        fixture
            .join_usecase()
            .execute(&bob, "Bob".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        let alice_events = drain(&mut alice_rx);
        assert_eq!(types(&alice_events), vec!["userJoined", "sessionsUpdate"]);
        assert_eq!(alice_events[0]["nickname"], "Bob");
        assert_eq!(alice_events[0]["connectionId"], bob.as_str());

        let bob_events = drain(&mut bob_rx);
        assert!(of_type(&bob_events, "userJoined").is_empty());
        let snapshot = of_type(&bob_events, "snapshot");
        let nicknames: Vec<&str> = snapshot[0]["sessions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["nickname"].as_str().unwrap())
            .collect();
        assert_eq!(nicknames, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_snapshot_contains_earlier_messages_in_order() {
        // テスト項目: 参加前に送信されたメッセージが順序どおりスナップショットに含まれる
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, _alice_rx) = fixture.join("Alice").await;
        for text in ["one", "two", "three"] {
            fixture
                .send_message_usecase()
                .execute(&alice, text.to_string(), None, vec![])
                .await
                .unwrap();
        }
        let (bob, mut bob_rx) = fixture.connect().await;

        // when (操作):
        fixture
            .join_usecase()
            .execute(&bob, "Bob".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        let events = drain(&mut bob_rx);
        assert_eq!(events[0]["type"], "snapshot");
        let texts: Vec<&str> = events[0]["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_duplicate_join_is_rejected() {
        // テスト項目: 同じ接続での二重参加は拒否され、セッションは変わらない
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, mut alice_rx) = fixture.join("Alice").await;

        // when (操作):
        let result = fixture
            .join_usecase()
            .execute(&alice, "Mallory".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(JoinError::DuplicateJoin));
        let sessions = fixture.sessions.list().await;
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].nickname.as_str(), "Alice");
        assert!(drain(&mut alice_rx).is_empty());
    }

    #[tokio::test]
    async fn test_invalid_nickname_is_rejected_without_side_effects() {
        // テスト項目: 不正なニックネームでの参加は拒否され、誰にも通知されない
        // given (前提条件):
        let fixture = Fixture::new();
        let (_alice, mut alice_rx) = fixture.join("Alice").await;
        let (bob, mut bob_rx) = fixture.connect().await;

        // when (操作):
        let empty = fixture
            .join_usecase()
            .execute(&bob, "   ".to_string())
            .await;
        let too_long = fixture
            .join_usecase()
            .execute(&bob, "x".repeat(NICKNAME_MAX_CHARS + 1))
            .await;

        // then (期待する結果):
        assert_eq!(
            empty,
            Err(JoinError::Validation(ValueObjectError::EmptyNickname))
        );
        assert!(matches!(too_long, Err(JoinError::Validation(_))));
        assert_eq!(fixture.sessions.list().await.len(), 1);
        assert!(drain(&mut alice_rx).is_empty());
        assert!(drain(&mut bob_rx).is_empty());
    }
}

//! InMemory Session Repository 実装
//!
//! 参加済みセッションを参加順に保持します。

use std::sync::Arc;

use async_trait::async_trait;
use roomcast_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Nickname, RepositoryError, SessionRecord, SessionRepository, Timestamp,
};

/// インメモリ Session Repository 実装
pub struct InMemorySessionRepository {
    /// 参加順のセッション一覧
    sessions: Mutex<Vec<SessionRecord>>,
    /// 参加時刻の付与に使う時計
    clock: Arc<dyn Clock>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
            clock,
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn register(
        &self,
        connection_id: ConnectionId,
        nickname: Nickname,
    ) -> Result<SessionRecord, RepositoryError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.iter().any(|s| s.connection_id == connection_id) {
            return Err(RepositoryError::DuplicateConnection(
                connection_id.into_string(),
            ));
        }

        let record = SessionRecord::new(
            connection_id,
            nickname,
            Timestamp::new(self.clock.now_millis()),
        );
        sessions.push(record.clone());
        Ok(record)
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> Option<SessionRecord> {
        let mut sessions = self.sessions.lock().await;
        let index = sessions
            .iter()
            .position(|s| &s.connection_id == connection_id)?;
        Some(sessions.remove(index))
    }

    async fn get(&self, connection_id: &ConnectionId) -> Option<SessionRecord> {
        let sessions = self.sessions.lock().await;
        sessions
            .iter()
            .find(|s| &s.connection_id == connection_id)
            .cloned()
    }

    async fn list(&self) -> Vec<SessionRecord> {
        let sessions = self.sessions.lock().await;
        sessions.clone()
    }
}

#[cfg(test)]
mod tests {
    use roomcast_shared::time::FixedClock;

    use super::*;

    fn connection(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn nickname(name: &str) -> Nickname {
        Nickname::new(name.to_string()).unwrap()
    }

    fn create_test_repository() -> InMemorySessionRepository {
        InMemorySessionRepository::new(Arc::new(FixedClock::new(1000)))
    }

    #[tokio::test]
    async fn test_register_success() {
        // テスト項目: セッションを登録すると参加時刻つきのレコードが返される
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        let record = repo
            .register(connection("c1"), nickname("Alice"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(record.nickname.as_str(), "Alice");
        assert_eq!(record.joined_at, Timestamp::new(1000));
        assert_eq!(repo.get(&connection("c1")).await, Some(record));
    }

    #[tokio::test]
    async fn test_register_duplicate_connection_fails() {
        // テスト項目: 同じ接続での二重登録は拒否され、元のセッションは変わらない
        // given (前提条件):
        let repo = create_test_repository();
        repo.register(connection("c1"), nickname("Alice"))
            .await
            .unwrap();

        // when (操作):
        let result = repo.register(connection("c1"), nickname("Mallory")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::DuplicateConnection("c1".to_string()))
        );
        let sessions = repo.list().await;
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].nickname.as_str(), "Alice");
    }

    #[tokio::test]
    async fn test_list_keeps_join_order() {
        // テスト項目: セッション一覧は参加順に並ぶ
        // given (前提条件):
        let repo = create_test_repository();
        for (id, name) in [("c3", "Charlie"), ("c1", "Alice"), ("c2", "Bob")] {
            repo.register(connection(id), nickname(name)).await.unwrap();
        }

        // when (操作):
        let names: Vec<String> = repo
            .list()
            .await
            .into_iter()
            .map(|s| s.nickname.into_string())
            .collect();

        // then (期待する結果):
        assert_eq!(names, vec!["Charlie", "Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_unregister_returns_record() {
        // テスト項目: 登録解除すると削除されたレコードが返される
        // given (前提条件):
        let repo = create_test_repository();
        repo.register(connection("c1"), nickname("Alice"))
            .await
            .unwrap();
        repo.register(connection("c2"), nickname("Bob"))
            .await
            .unwrap();

        // when (操作):
        let removed = repo.unregister(&connection("c1")).await;

        // then (期待する結果):
        assert_eq!(removed.map(|s| s.nickname.into_string()), Some("Alice".to_string()));
        assert_eq!(repo.connection_ids().await, vec![connection("c2")]);
    }

    #[tokio::test]
    async fn test_unregister_unknown_connection_is_noop() {
        // テスト項目: 未参加の接続の登録解除は何もせず None を返す
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        let removed = repo.unregister(&connection("ghost")).await;

        // then (期待する結果):
        assert_eq!(removed, None);
        assert!(repo.list().await.is_empty());
    }
}

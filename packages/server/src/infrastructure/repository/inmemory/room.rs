//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! `Room` 集約を Mutex で保護し、メッセージの ID とタイムスタンプは
//! ここでサーバー側の時計から付与します（クライアントの時計は信用しない）。

use std::sync::Arc;

use async_trait::async_trait;
use roomcast_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    CategoryName, NewMessage, Room, RoomRepository, RoomSnapshot, StoredMessage, Timestamp,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// Room ドメインモデル
    room: Arc<Mutex<Room>>,
    /// メッセージのタイムスタンプ付与に使う時計
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(room: Arc<Mutex<Room>>, clock: Arc<dyn Clock>) -> Self {
        Self { room, clock }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn add_category(&self, name: CategoryName) -> bool {
        let mut room = self.room.lock().await;
        room.add_category(name)
    }

    async fn append_message(&self, message: NewMessage) -> StoredMessage {
        let mut room = self.room.lock().await;
        // 時刻はロック取得後に読む（ログ順と時刻順を一致させるため）
        let now = Timestamp::new(self.clock.now_millis());
        room.append_message(message, now)
    }

    async fn snapshot(&self) -> RoomSnapshot {
        let room = self.room.lock().await;
        room.snapshot()
    }

    async fn categories(&self) -> Vec<CategoryName> {
        let room = self.room.lock().await;
        room.categories().to_vec()
    }

    async fn message_count(&self) -> usize {
        let room = self.room.lock().await;
        room.message_count()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use roomcast_shared::time::FixedClock;

    use super::*;
    use crate::domain::{MessageText, Nickname};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomRepository のカテゴリ追加・メッセージ追加・スナップショット
    //
    // 【なぜこのテストが必要か】
    // - UseCase 層はこの Repository を唯一の状態ストアとして扱う
    // - ID とタイムスタンプがサーバー側で付与されることを保証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. カテゴリの重複追加
    // 2. 同一ミリ秒に並行して追加されたメッセージの ID の一意性
    // 3. スナップショットの順序
    // ========================================

    fn category(name: &str) -> CategoryName {
        CategoryName::new(name.to_string()).unwrap()
    }

    fn create_test_repository(clock: Arc<dyn Clock>) -> InMemoryRoomRepository {
        let room = Arc::new(Mutex::new(Room::new(
            vec![category("Ogólne"), category("Praca")],
            category("general"),
        )));
        InMemoryRoomRepository::new(room, clock)
    }

    fn message(text: &str, requested_category: Option<&str>) -> NewMessage {
        NewMessage::new(
            Nickname::new("Alice".to_string()).unwrap(),
            MessageText::new(text.to_string()).unwrap(),
            requested_category.map(str::to_string),
            vec![],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_add_category_is_idempotent() {
        // テスト項目: 同じカテゴリを二度追加しても一度だけ作成される
        // given (前提条件):
        let repo = create_test_repository(Arc::new(FixedClock::new(0)));

        // when (操作):
        let first = repo.add_category(category("Sport")).await;
        let second = repo.add_category(category("Sport")).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(repo.categories().await.len(), 3);
    }

    #[tokio::test]
    async fn test_append_message_uses_server_clock() {
        // テスト項目: メッセージのタイムスタンプはサーバーの時計から付与される
        // given (前提条件):
        let clock = Arc::new(FixedClock::new(1700000000000));
        let repo = create_test_repository(clock.clone());

        // when (操作):
        let stored = repo.append_message(message("hi", Some("Praca"))).await;

        // then (期待する結果):
        assert_eq!(stored.timestamp, Timestamp::new(1700000000000));
        assert_eq!(stored.id.as_str(), "1700000000000-1");
        assert_eq!(stored.category.as_str(), "Praca");
    }

    #[tokio::test]
    async fn test_concurrent_appends_get_unique_ids() {
        // テスト項目: 同一ミリ秒に並行して追加されたメッセージでも ID が一意になる
        // given (前提条件):
        let repo = Arc::new(create_test_repository(Arc::new(FixedClock::new(42))));

        // when (操作):
        let handles: Vec<_> = (0..50)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.append_message(message(&i.to_string(), None)).await })
            })
            .collect();
        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap().id.into_string());
        }

        // then (期待する結果):
        assert_eq!(ids.len(), 50);
        assert_eq!(repo.message_count().await, 50);
    }

    #[tokio::test]
    async fn test_snapshot_returns_log_in_order() {
        // テスト項目: スナップショットにはメッセージが追加順に含まれる
        // given (前提条件):
        let repo = create_test_repository(Arc::new(FixedClock::new(0)));
        for text in ["one", "two", "three"] {
            repo.append_message(message(text, None)).await;
        }

        // when (操作):
        let snapshot = repo.snapshot().await;

        // then (期待する結果):
        let texts: Vec<&str> = snapshot.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        let sequences: Vec<u64> = snapshot.messages.iter().map(|m| m.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
    }
}

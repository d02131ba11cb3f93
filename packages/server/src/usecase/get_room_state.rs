//! UseCase: ルーム状態の取得（HTTP API 用の読み取りモデル）

use std::sync::Arc;

use crate::domain::{CategoryName, RoomRepository, SessionRecord, SessionRepository};

/// ルームの概要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOverview {
    pub categories: Vec<CategoryName>,
    pub message_count: usize,
    pub sessions: Vec<SessionRecord>,
}

/// ルーム状態取得のユースケース
pub struct GetRoomStateUseCase {
    repository: Arc<dyn RoomRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl GetRoomStateUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self {
            repository,
            sessions,
        }
    }

    pub async fn execute(&self) -> RoomOverview {
        RoomOverview {
            categories: self.repository.categories().await,
            message_count: self.repository.message_count().await,
            sessions: self.sessions.list().await,
        }
    }
}

//! UseCase: カテゴリ作成
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateCategoryUseCase::execute() メソッド
//! - 新規カテゴリの全員へのブロードキャスト、重複時の本人への応答
//!
//! ### どのような状況を想定しているか
//! - 正常系：新しいカテゴリの作成
//! - エッジケース：既存カテゴリの再作成（ブロードキャストされない）
//! - 異常系：参加前の作成、空のカテゴリ名

use std::sync::Arc;

use roomcast_shared::time::Clock;

use crate::domain::{
    CategoryName, ConnectionId, MessagePusher, RoomEvent, RoomRepository, SessionRepository,
    Timestamp,
};

use super::{RelaySequencer, broadcast_or_warn, error::CreateCategoryError, push_or_warn};

/// カテゴリ作成のユースケース
pub struct CreateCategoryUseCase {
    /// Room State Store
    repository: Arc<dyn RoomRepository>,
    /// Session Registry
    sessions: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: RelaySequencer,
    clock: Arc<dyn Clock>,
}

impl CreateCategoryUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: RelaySequencer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            sessions,
            message_pusher,
            sequencer,
            clock,
        }
    }

    /// カテゴリ作成を実行
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 作成され、全参加者に `categoryCreated` と通知が送られた
    /// * `Ok(false)` - 既に存在したため、本人にだけ `categoryAck` が送られた
    /// * `Err(CreateCategoryError)` - 未参加、またはカテゴリ名が不正
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        name: String,
    ) -> Result<bool, CreateCategoryError> {
        let _guard = self.sequencer.lock().await;

        let creator = self
            .sessions
            .get(connection_id)
            .await
            .ok_or(CreateCategoryError::NotJoined)?
            .nickname;
        let name = CategoryName::new(name)?;

        let created = self.repository.add_category(name.clone()).await;
        if !created {
            tracing::debug!("Category '{}' already exists", name.as_str());
            push_or_warn(
                self.message_pusher.as_ref(),
                connection_id,
                &RoomEvent::CategoryAck {
                    name,
                    created: false,
                },
            )
            .await;
            return Ok(false);
        }

        let targets = self.sessions.connection_ids().await;
        let notice = format!("{} created category: {}", creator.as_str(), name.as_str());
        tracing::info!("{}", notice);

        broadcast_or_warn(
            self.message_pusher.as_ref(),
            targets.clone(),
            &RoomEvent::CategoryCreated {
                name,
                creator,
                timestamp: Timestamp::new(self.clock.now_millis()),
            },
        )
        .await;
        broadcast_or_warn(
            self.message_pusher.as_ref(),
            targets,
            &RoomEvent::info(notice),
        )
        .await;

        Ok(true)
    }
}

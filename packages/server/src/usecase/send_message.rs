//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージ履歴への追加、送信者を含む全員への newMessage、他の参加者への通知
//!
//! ### なぜこのテストが必要か
//! - 送信者も newMessage を受け取り、ID で突き合わせられることを保証
//! - 存在しないカテゴリが既存カテゴリに置き換えられることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - 異常系：本文も添付もないメッセージ、参加前の送信
//! - エッジケース：存在しないカテゴリ、添付ファイルのみのメッセージ

use std::sync::Arc;

use crate::domain::{
    Attachment, ConnectionId, MessagePusher, MessageText, NewMessage, RoomEvent, RoomRepository,
    SessionRepository, StoredMessage,
};

use super::{RelaySequencer, broadcast_or_warn, error::SendMessageError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Room State Store
    repository: Arc<dyn RoomRepository>,
    /// Session Registry
    sessions: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: RelaySequencer,
}

impl SendMessageUseCase {
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

    /// メッセージ送信を実行
    ///
    /// 投稿者名はクライアントの申告ではなくセッションのニックネームを使う。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信元の接続
    /// * `text` - 本文（添付ファイルがあれば空でもよい）
    /// * `category` - クライアントが指定したカテゴリ（存在しなければ置き換えられる）
    /// * `attachments` - 検証済みの添付ファイル
    ///
    /// # Returns
    ///
    /// * `Ok(StoredMessage)` - 保存されたメッセージ
    /// * `Err(SendMessageError)` - 未参加、または内容が不正
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        text: String,
        category: Option<String>,
        attachments: Vec<Attachment>,
    ) -> Result<StoredMessage, SendMessageError> {
        let _guard = self.sequencer.lock().await;

        let author = self
            .sessions
            .get(connection_id)
            .await
            .ok_or(SendMessageError::NotJoined)?
            .nickname;
        let message = NewMessage::new(author, MessageText::new(text)?, category, attachments)?;

        // 1. Repository 経由でメッセージを Room に追加
        let stored = self.repository.append_message(message).await;

        // 2. 送信者を含む全員に newMessage を送信
        let targets = self.sessions.connection_ids().await;
        let others = targets
            .iter()
            .filter(|id| *id != connection_id)
            .cloned()
            .collect();
        broadcast_or_warn(
            self.message_pusher.as_ref(),
            targets,
            &RoomEvent::NewMessage(stored.clone()),
        )
        .await;

        // 3. 送信者以外に通知
        broadcast_or_warn(
            self.message_pusher.as_ref(),
            others,
            &RoomEvent::info(format!("New message from {}", stored.author.as_str())),
        )
        .await;

        tracing::info!(
            "Message '{}' from '{}' stored in '{}'",
            stored.id.as_str(),
            stored.author.as_str(),
            stored.category.as_str()
        );
        Ok(stored)
    }
}

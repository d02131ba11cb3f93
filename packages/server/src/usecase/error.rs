//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::ValueObjectError;

/// 参加処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error(transparent)]
    Validation(#[from] ValueObjectError),

    #[error("this connection has already joined the room")]
    DuplicateJoin,
}

/// カテゴリ作成処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateCategoryError {
    #[error(transparent)]
    Validation(#[from] ValueObjectError),

    #[error("join the room before creating categories")]
    NotJoined,
}

/// メッセージ送信処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error(transparent)]
    Validation(#[from] ValueObjectError),

    #[error("join the room before sending messages")]
    NotJoined,
}

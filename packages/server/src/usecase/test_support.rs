//! UseCase テスト用のフィクスチャ
//!
//! 実際のインメモリ Repository と WebSocketMessagePusher を組み合わせ、
//! 各接続の送信キューに届いたイベントを JSON として観察できるようにする。

use std::{collections::HashMap, sync::Arc};

use roomcast_shared::time::FixedClock;
use serde_json::Value;
use tokio::sync::{Mutex, mpsc};

use super::{
    ConnectClientUseCase, CreateCategoryUseCase, DisconnectClientUseCase, GetRoomStateUseCase,
    JoinRoomUseCase, RelaySequencer, SendMessageUseCase,
};
use crate::{
    domain::{CategoryName, ConnectionId, Room},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomRepository, InMemorySessionRepository},
    },
};

pub const START_TIME: i64 = 1_700_000_000_000;

pub struct Fixture {
    pub clock: Arc<FixedClock>,
    pub repository: Arc<InMemoryRoomRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub sequencer: RelaySequencer,
}

impl Fixture {
    pub fn new() -> Self {
        let clock = Arc::new(FixedClock::new(START_TIME));
        let categories = ["Ogólne", "Praca", "Rozrywka"]
            .iter()
            .map(|name| CategoryName::new(name.to_string()).unwrap())
            .collect();
        let room = Room::new(
            categories,
            CategoryName::new("general".to_string()).unwrap(),
        );
        Self {
            repository: Arc::new(InMemoryRoomRepository::new(
                Arc::new(Mutex::new(room)),
                clock.clone(),
            )),
            sessions: Arc::new(InMemorySessionRepository::new(clock.clone())),
            pusher: Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
                HashMap::new(),
            )))),
            sequencer: RelaySequencer::new(),
            clock,
        }
    }

    pub fn connect_usecase(&self) -> ConnectClientUseCase {
        ConnectClientUseCase::new(self.pusher.clone())
    }

    pub fn join_usecase(&self) -> JoinRoomUseCase {
        JoinRoomUseCase::new(
            self.repository.clone(),
            self.sessions.clone(),
            self.pusher.clone(),
            self.sequencer.clone(),
        )
    }

    pub fn create_category_usecase(&self) -> CreateCategoryUseCase {
        CreateCategoryUseCase::new(
            self.repository.clone(),
            self.sessions.clone(),
            self.pusher.clone(),
            self.sequencer.clone(),
            self.clock.clone(),
        )
    }

    pub fn send_message_usecase(&self) -> SendMessageUseCase {
        SendMessageUseCase::new(
            self.repository.clone(),
            self.sessions.clone(),
            self.pusher.clone(),
            self.sequencer.clone(),
        )
    }

    pub fn disconnect_usecase(&self) -> DisconnectClientUseCase {
        DisconnectClientUseCase::new(
            self.sessions.clone(),
            self.pusher.clone(),
            self.sequencer.clone(),
            self.clock.clone(),
        )
    }

    pub fn get_room_state_usecase(&self) -> GetRoomStateUseCase {
        GetRoomStateUseCase::new(self.repository.clone(), self.sessions.clone())
    }

    /// Open a transport connection without joining.
    pub async fn connect(&self) -> (ConnectionId, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(64);
        let connection_id = self.connect_usecase().execute(tx).await;
        (connection_id, rx)
    }

    /// Connect and join, discarding the events produced by the join itself.
    pub async fn join(&self, nickname: &str) -> (ConnectionId, mpsc::Receiver<String>) {
        let (connection_id, mut rx) = self.connect().await;
        self.join_usecase()
            .execute(&connection_id, nickname.to_string())
            .await
            .unwrap();
        drain(&mut rx);
        (connection_id, rx)
    }
}

/// Everything queued for a connection so far, decoded.
pub fn drain(rx: &mut mpsc::Receiver<String>) -> Vec<Value> {
    let mut events = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        events.push(serde_json::from_str(&frame).unwrap());
    }
    events
}

pub fn of_type<'a>(events: &'a [Value], event_type: &str) -> Vec<&'a Value> {
    events.iter().filter(|e| e["type"] == event_type).collect()
}

pub fn types(events: &[Value]) -> Vec<String> {
    events
        .iter()
        .map(|e| e["type"].as_str().unwrap_or_default().to_string())
        .collect()
}

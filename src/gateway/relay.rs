//! Broadcast of robot events to connected viewers.

use crate::core::{PositionRecord, SessionId};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event pushed to every subscriber.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum RobotEvent {
    /// A session's history was cleared for a fresh robot
    #[serde(rename_all = "camelCase")]
    RobotCreated { session: SessionId },
    /// A session's latest position after an update
    #[serde(rename_all = "camelCase")]
    PositionUpdated {
        session: SessionId,
        record: PositionRecord,
    },
}

impl RobotEvent {
    pub fn session(&self) -> SessionId {
        match self {
            Self::RobotCreated { session } | Self::PositionUpdated { session, .. } => *session,
        }
    }
}

/// Fan-out channel for [`RobotEvent`]s.
///
/// Subscribers that fall more than the channel capacity behind lose the
/// oldest events and see a lag error on their next receive.
#[derive(Clone, Debug)]
pub struct PositionRelay {
    sender: broadcast::Sender<RobotEvent>,
}

impl PositionRelay {
    /// # Panics
    ///
    /// Panics if `capacity` is zero. [`RobotEnv::new`](crate::gateway::RobotEnv::new)
    /// rejects such a config before building its relay.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RobotEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Send an event, returning how many subscribers received it.
    pub fn publish(&self, event: RobotEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                tracing::warn!(session = %event.session(), "No subscribers for robot event");
                0
            }
        }
    }
}

//! Position log storage.

use crate::core::{Position, PositionHistory, PositionRecord, SessionId};
use crate::gateway::error::StoreError;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Append-only storage for per-session position logs.
///
/// Implementations must keep appended positions in the order given.
pub trait PositionStore: Send + Sync {
    /// Drop every record of `session`.
    fn clear(&self, session: SessionId) -> Result<(), StoreError>;

    /// Append positions in order, returning the new records.
    fn append(
        &self,
        session: SessionId,
        positions: &[Position],
    ) -> Result<Vec<PositionRecord>, StoreError>;

    /// Most recent record of `session`.
    fn latest(&self, session: SessionId) -> Result<Option<PositionRecord>, StoreError>;

    /// Up to `count` most recent records of `session`, oldest first.
    fn latest_n(
        &self,
        session: SessionId,
        count: usize,
    ) -> Result<Vec<PositionRecord>, StoreError>;
}

/// Store that keeps every session's history in memory.
#[derive(Debug, Default)]
pub struct InMemoryPositionStore {
    sessions: Mutex<HashMap<SessionId, PositionHistory>>,
}

impl InMemoryPositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full history of a session (empty if unknown).
    pub fn history(&self, session: SessionId) -> Result<PositionHistory, StoreError> {
        Ok(self.lock()?.get(&session).cloned().unwrap_or_default())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, PositionHistory>>, StoreError> {
        self.sessions.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl PositionStore for InMemoryPositionStore {
    fn clear(&self, session: SessionId) -> Result<(), StoreError> {
        self.lock()?.remove(&session);
        Ok(())
    }

    fn append(
        &self,
        session: SessionId,
        positions: &[Position],
    ) -> Result<Vec<PositionRecord>, StoreError> {
        let mut sessions = self.lock()?;
        let history = sessions.entry(session).or_default();
        let before = history.len();

        for position in positions {
            *history = std::mem::take(history).record(*position, Utc::now());
        }

        Ok(history.records()[before..].to_vec())
    }

    fn latest(&self, session: SessionId) -> Result<Option<PositionRecord>, StoreError> {
        Ok(self
            .lock()?
            .get(&session)
            .and_then(|history| history.latest().cloned()))
    }

    fn latest_n(
        &self,
        session: SessionId,
        count: usize,
    ) -> Result<Vec<PositionRecord>, StoreError> {
        Ok(self
            .lock()?
            .get(&session)
            .map(|history| history.latest_n(count).to_vec())
            .unwrap_or_default())
    }
}

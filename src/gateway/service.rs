//! Gateway operations as effects over a [`RobotEnv`].
//!
//! Each operation returns an effect; run it against an environment to
//! perform the I/O:
//!
//! ```rust
//! # #[tokio::main]
//! # async fn main() {
//! use toy_robot::core::SessionId;
//! use toy_robot::gateway::{create_robot, latest_position, RobotEnv};
//! use stillwater::effect::Effect;
//!
//! let env = RobotEnv::in_memory();
//! let session = SessionId::new();
//!
//! create_robot(session).run(&env).await.unwrap();
//! assert!(latest_position(session).run(&env).await.unwrap().is_none());
//! # }
//! ```

use crate::config::{ConfigError, RobotConfig};
use crate::core::{PositionRecord, SessionId};
use crate::gateway::error::ServiceError;
use crate::gateway::relay::{PositionRelay, RobotEvent};
use crate::gateway::store::{InMemoryPositionStore, PositionStore};
use crate::validation::{validate_batch, PositionUpdate, ValidationError};
use std::sync::Arc;
use stillwater::effect::Effect;
use stillwater::prelude::*;
use stillwater::validation::Validation;

/// Everything a gateway operation needs.
#[derive(Clone)]
pub struct RobotEnv {
    pub store: Arc<dyn PositionStore>,
    pub relay: PositionRelay,
    pub config: RobotConfig,
}

impl RobotEnv {
    /// Environment over `store`, rejecting a config that fails validation.
    pub fn new(store: Arc<dyn PositionStore>, config: RobotConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(store, config))
    }

    /// In-memory store with default configuration.
    pub fn in_memory() -> Self {
        Self::assemble(Arc::new(InMemoryPositionStore::new()), RobotConfig::default())
    }

    fn assemble(store: Arc<dyn PositionStore>, config: RobotConfig) -> Self {
        let relay = PositionRelay::new(config.relay_capacity);
        Self {
            store,
            relay,
            config,
        }
    }
}

impl std::fmt::Debug for RobotEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RobotEnv")
            .field("relay", &self.relay)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Start a fresh robot: clear the session's history and announce it.
pub fn create_robot(
    session: SessionId,
) -> impl Effect<Output = (), Error = ServiceError, Env = RobotEnv> {
    from_fn(move |env: &RobotEnv| -> Result<(), ServiceError> {
        env.store.clear(session)?;
        tracing::info!(%session, "Robot created, position history cleared");
        env.relay.publish(RobotEvent::RobotCreated { session });
        Ok(())
    })
}

/// Validate and append one position or an ordered batch, then broadcast the
/// resulting latest position.
///
/// The batch is all-or-nothing: if any entry is malformed nothing is stored
/// and every problem is returned. Only the final position is broadcast.
pub fn update_position(
    session: SessionId,
    update: impl Into<PositionUpdate>,
) -> impl Effect<Output = PositionRecord, Error = ServiceError, Env = RobotEnv> {
    let inputs = update.into().into_inputs();

    from_fn(move |env: &RobotEnv| -> Result<PositionRecord, ServiceError> {
        let positions = match validate_batch(&inputs) {
            Validation::Success(positions) => positions,
            Validation::Failure(errors) => {
                let errors: Vec<ValidationError> = errors.iter().cloned().collect();
                tracing::warn!(%session, problems = errors.len(), "Rejected position update");
                return Err(ServiceError::InvalidPositions(errors));
            }
        };

        let records = env.store.append(session, &positions)?;
        let Some(latest) = records.last().cloned() else {
            return Err(ServiceError::InvalidPositions(vec![
                ValidationError::EmptyBatch,
            ]));
        };

        tracing::debug!(
            %session,
            count = records.len(),
            latest = %latest.position,
            "Stored position update"
        );
        env.relay.publish(RobotEvent::PositionUpdated {
            session,
            record: latest.clone(),
        });
        Ok(latest)
    })
}

/// Last recorded position, or `None` if the robot was never placed.
pub fn latest_position(
    session: SessionId,
) -> impl Effect<Output = Option<PositionRecord>, Error = ServiceError, Env = RobotEnv> {
    from_fn(
        move |env: &RobotEnv| -> Result<Option<PositionRecord>, ServiceError> {
            env.store.latest(session).map_err(ServiceError::from)
        },
    )
}

/// Up to `count` most recent positions, oldest first. `None` uses the
/// configured default count.
pub fn latest_history(
    session: SessionId,
    count: Option<usize>,
) -> impl Effect<Output = Vec<PositionRecord>, Error = ServiceError, Env = RobotEnv> {
    from_fn(
        move |env: &RobotEnv| -> Result<Vec<PositionRecord>, ServiceError> {
            let count = count.unwrap_or(env.config.history_count);
            env.store
                .latest_n(session, count)
                .map_err(ServiceError::from)
        },
    )
}

//! Client-side driver that mirrors a local robot to the gateway.
//!
//! The client applies commands to its own [`RobotStateMachine`] and forwards
//! every accepted position. While offline it queues what it would have sent
//! and replays the queue in order on reconnect. Replayed placements are
//! overwrites and replayed moves travel as ordered position batches, so
//! sending the same replay twice leaves the gateway in the same final state.

use crate::config::{ConfigError, RobotConfig};
use crate::core::{Position, SessionId};
use crate::gateway::{create_robot, latest_position, update_position, RobotEnv, ServiceError};
use crate::machine::{Command, CommandOutcome, RobotStateMachine};
use crate::validation::{PositionInput, PositionUpdate};
use std::collections::VecDeque;
use stillwater::effect::Effect;

/// Gateway call held back while offline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingCall {
    /// Clear the session for a fresh placement
    CreateRobot,
    /// Record a position
    Update(Position),
}

/// Drives one robot and keeps the gateway in step with it.
#[derive(Debug)]
pub struct RobotClient {
    machine: RobotStateMachine,
    default_placement: Position,
    online: bool,
    queue: VecDeque<PendingCall>,
}

impl RobotClient {
    /// Wrap a machine. The client starts online.
    pub fn new(machine: RobotStateMachine, default_placement: Position) -> Self {
        Self {
            machine,
            default_placement,
            online: true,
            queue: VecDeque::new(),
        }
    }

    /// Fresh unplaced robot using the configured default placement.
    pub fn from_config(config: &RobotConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let placement = config.default_placement.position().ok_or_else(|| {
            ConfigError::Invalid("default_placement is off the table".to_string())
        })?;
        Ok(Self::new(RobotStateMachine::new(), placement))
    }

    pub fn session(&self) -> SessionId {
        self.machine.session()
    }

    pub fn machine(&self) -> &RobotStateMachine {
        &self.machine
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Calls waiting for the connection to return, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &PendingCall> {
        self.queue.iter()
    }

    /// Stop sending; subsequent changes are queued.
    pub fn go_offline(&mut self) {
        if self.online {
            tracing::info!(session = %self.session(), "Client offline, queuing updates");
        }
        self.online = false;
    }

    /// Apply a command locally and mirror an accepted change.
    ///
    /// Ignored commands never reach the gateway. A placement clears the
    /// session's history before the new position is recorded.
    ///
    /// A failed gateway call takes the client offline with the call and any
    /// that follow it queued, then the first error is returned. The local
    /// robot keeps the change either way.
    pub async fn execute(
        &mut self,
        command: Command,
        env: &RobotEnv,
    ) -> Result<CommandOutcome, ServiceError> {
        let outcome = self.machine.execute(command);

        if let CommandOutcome::Accepted { position } = outcome {
            let mut calls = Vec::with_capacity(2);
            if matches!(command, Command::Place { .. }) {
                calls.push(PendingCall::CreateRobot);
            }
            calls.push(PendingCall::Update(position));

            let mut failure = None;
            for call in calls {
                if let Err(err) = self.dispatch(call, env).await {
                    failure.get_or_insert(err);
                }
            }
            if let Some(err) = failure {
                return Err(err);
            }
        }

        Ok(outcome)
    }

    /// Place the robot on the configured default cell.
    pub async fn place_default(&mut self, env: &RobotEnv) -> Result<CommandOutcome, ServiceError> {
        let cell = self.default_placement;
        let command = Command::Place {
            x: i32::from(cell.x()),
            y: i32::from(cell.y()),
            facing: Some(cell.facing()),
        };
        self.execute(command, env).await
    }

    /// Go back online and replay queued calls in their original order.
    ///
    /// Consecutive position updates are sent as one batch. If a call fails,
    /// it and everything after it stay queued and the client remains
    /// offline. Returns the number of calls delivered.
    pub async fn reconnect(&mut self, env: &RobotEnv) -> Result<usize, ServiceError> {
        let session = self.session();
        let mut delivered = 0;

        while !self.queue.is_empty() {
            if matches!(self.queue.front(), Some(PendingCall::CreateRobot)) {
                create_robot(session).run(env).await?;
                self.queue.pop_front();
                delivered += 1;
                continue;
            }

            let batch: Vec<PositionInput> = self
                .queue
                .iter()
                .map_while(|call| match call {
                    PendingCall::Update(position) => Some(PositionInput::from(*position)),
                    PendingCall::CreateRobot => None,
                })
                .collect();
            let sent = batch.len();

            update_position(session, PositionUpdate::Many(batch))
                .run(env)
                .await?;
            self.queue.drain(..sent);
            delivered += sent;
        }

        self.online = true;
        tracing::info!(%session, delivered, "Client reconnected, queue replayed");
        Ok(delivered)
    }

    /// Overwrite the local robot with the gateway's latest position.
    ///
    /// Used when a viewer attaches to an existing session. Returns the
    /// position adopted, if the gateway has one.
    pub async fn sync_from_gateway(
        &mut self,
        env: &RobotEnv,
    ) -> Result<Option<Position>, ServiceError> {
        let latest = latest_position(self.session()).run(env).await?;
        Ok(latest.map(|record| {
            self.machine.apply(record.position);
            record.position
        }))
    }

    async fn dispatch(&mut self, call: PendingCall, env: &RobotEnv) -> Result<(), ServiceError> {
        if !self.online {
            self.queue.push_back(call);
            return Ok(());
        }

        let session = self.session();
        let sent = match call {
            PendingCall::CreateRobot => create_robot(session).run(env).await,
            PendingCall::Update(position) => {
                update_position(session, PositionInput::from(position))
                    .run(env)
                    .await
                    .map(|_| ())
            }
        };

        sent.map_err(|err| {
            tracing::warn!(%session, ?call, error = %err, "Gateway call failed, client offline");
            self.online = false;
            self.queue.push_back(call);
            err
        })
    }
}

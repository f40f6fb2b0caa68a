//! Checkpoint and restore for controllers.
//!
//! A checkpoint captures everything needed to rebuild a controller after
//! its host view is torn down and recreated: state, context, configuration,
//! the unacknowledged commit and the recent history. Host callbacks and the
//! armed timer are not captured; restoring re-arms whatever the restored
//! state needs.

use crate::config::EditConfig;
use crate::controller::{Context, Controller, Value};
use crate::core::{EditState, StateHistory};
use crate::timer::TimerService;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of a controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint<V> {
    /// Checkpoint format version
    pub version: u32,

    /// Id of the checkpointed controller
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub state: EditState,

    /// State interrupted by `disabled`, if any
    pub resume: Option<EditState>,

    pub context: Context<V>,

    /// Value of an unacknowledged pessimistic commit
    pub in_flight: Option<V>,

    pub config: EditConfig,

    pub history: StateHistory<EditState>,
}

impl<V> Checkpoint<V> {
    pub fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version == CHECKPOINT_VERSION {
            Ok(())
        } else {
            Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            })
        }
    }
}

impl<V: Serialize + DeserializeOwned> Checkpoint<V> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }
}

impl<V: Value, T: TimerService> Controller<V, T> {
    /// Capture the controller's current state.
    pub fn checkpoint(&self) -> Checkpoint<V> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: self.id,
            timestamp: Utc::now(),
            state: self.state,
            resume: self.resume,
            context: self.context.clone(),
            in_flight: self.in_flight.clone(),
            config: self.config.clone(),
            history: self.history.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BuildError, ControllerBuilder};
    use crate::config::CommitMode;
    use crate::controller::Event;
    use crate::timer::TimerKind;

    fn pending_controller() -> Controller<String> {
        let mut controller = ControllerBuilder::new()
            .value("Alice".to_string())
            .mode(CommitMode::Pessimistic)
            .build()
            .unwrap();
        controller.handle(Event::Activate);
        controller.handle(Event::Change("Bob".to_string()));
        controller.handle(Event::Confirm);
        controller
    }

    #[test]
    fn json_roundtrip_preserves_checkpoint() {
        let checkpoint = pending_controller().checkpoint();
        let json = checkpoint.to_json().unwrap();
        let restored: Checkpoint<String> = Checkpoint::from_json(&json).unwrap();

        assert_eq!(restored, checkpoint);
    }

    #[test]
    fn binary_roundtrip_preserves_checkpoint() {
        let checkpoint = pending_controller().checkpoint();
        let bytes = checkpoint.to_bytes().unwrap();
        let restored: Checkpoint<String> = Checkpoint::from_bytes(&bytes).unwrap();

        assert_eq!(restored.in_flight.as_deref(), Some("Bob"));
        assert_eq!(restored.state, EditState::Pending);
    }

    #[test]
    fn restore_pending_rearms_save_timeout() {
        let original = pending_controller();
        let checkpoint = original.checkpoint();

        let restored = ControllerBuilder::new().restore(checkpoint).build().unwrap();

        assert_eq!(restored.id(), original.id());
        assert_eq!(restored.state(), EditState::Pending);
        assert_eq!(restored.in_flight().map(String::as_str), Some("Bob"));
        assert_eq!(
            restored.armed_timer().map(|t| t.kind),
            Some(TimerKind::SaveTimeout)
        );
    }

    #[test]
    fn restore_saved_settles_to_view() {
        let mut controller = pending_controller();
        controller.handle(Event::Ack(None));
        let checkpoint = controller.checkpoint();
        assert_eq!(checkpoint.state, EditState::Saved);

        let restored = ControllerBuilder::new().restore(checkpoint).build().unwrap();

        assert_eq!(restored.state(), EditState::View);
        assert_eq!(restored.context().confirmed, "Bob");
        assert!(restored.armed_timer().is_none());
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut checkpoint = pending_controller().checkpoint();
        checkpoint.version = 99;

        let result = ControllerBuilder::new().restore(checkpoint.clone()).build();
        assert!(matches!(
            result,
            Err(BuildError::Checkpoint(CheckpointError::UnsupportedVersion {
                found: 99,
                ..
            }))
        ));

        let json = serde_json::to_string(&checkpoint).unwrap();
        assert!(Checkpoint::<String>::from_json(&json).is_err());
    }

    #[test]
    fn malformed_json_fails_to_deserialize() {
        let result = Checkpoint::<String>::from_json("{ not json");
        assert!(matches!(
            result,
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }
}

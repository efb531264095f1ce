use serde::Serialize;

use crate::actions::ActionKind;

/// Lifecycle notifications emitted by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum ActionSignal {
    ActionStarted {
        action: ActionKind,
        product_id: i32,
        count: i32,
        start_tick: i32,
        end_tick: i32,
    },
    ActionStopped {
        action: ActionKind,
        product_id: i32,
        count: i32,
        start_tick: i32,
        end_tick: i32,
        /// `current_tick < end_tick` at the moment of the reset, i.e. true
        /// when the sequence was cut short. The name is historical; consumers
        /// rely on this exact condition.
        completed: bool,
    },
}

impl ActionSignal {
    pub fn action(&self) -> ActionKind {
        match self {
            Self::ActionStarted { action, .. } | Self::ActionStopped { action, .. } => *action,
        }
    }
}

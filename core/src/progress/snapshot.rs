use serde::Serialize;

use crate::actions::ActionKind;

/// Point-in-time view of the active sequence, for overlays and replays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionProgress {
    pub action: ActionKind,
    pub product_id: i32,
    pub count: i32,
    /// Steps already finished
    pub processed: i32,
    pub ticks_left: f32,
    /// Wall-clock estimate, may be slightly negative near a tick boundary
    pub remaining_ms: i64,
    /// Elapsed share of the total ticks, `0.0..=1.0`
    pub fraction: f32,
}

impl ActionProgress {
    pub fn is_finished(&self) -> bool {
        self.ticks_left <= 0.0
    }
}

//! Progress tracking for repeated actions
//!
//! ```text
//!   menu click ──► start_action ──► ActionStarted
//!                        │
//!         game tick ──► on_tick ──(end tick reached)──► ActionStopped
//!                        │
//!         interrupt ──► on_interrupt ──(not consumed)──► ActionStopped
//! ```

mod snapshot;
pub mod tracker;


pub use snapshot::ActionProgress;
pub use tracker::{ActionTracker, NONE, TRACKER_INTERRUPT_PRIORITY};

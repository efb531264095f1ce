pub mod actions;
pub mod client;
pub mod config;
pub mod events;
pub mod progress;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use action_progress_types::{ActionCategory, ActionProgressConfig};
pub use actions::{ActionInfo, ActionKind};
pub use client::GameClient;
pub use events::{ActionSignal, Interrupt, InterruptObserver, SignalDispatcher, SignalHandler};
pub use progress::{ActionProgress, ActionTracker};

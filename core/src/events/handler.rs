use super::ActionSignal;

/// Receives lifecycle signals fanned out by the dispatcher.
///
/// Delivery is fire-and-forget: handlers cannot veto or acknowledge.
pub trait SignalHandler {
    fn handle_signal(&mut self, signal: &ActionSignal);
}

pub mod dispatcher;
pub mod handler;
pub mod signal;

pub use dispatcher::{Interrupt, InterruptObserver, SignalDispatcher};
pub use handler::SignalHandler;
pub use signal::ActionSignal;

//! Types shared between the action progress core and its front-ends.

pub mod config;
pub mod formatting;

pub use config::{ActionCategory, ActionProgressConfig};

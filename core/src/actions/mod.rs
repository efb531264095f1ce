//! Static action table and the tick arithmetic built on it.
//!
//! Every action kind maps to one [`ActionInfo`] row holding its per-step
//! tick profile and category. The timing helpers are pure functions over
//! those profiles; the tracker decides which profile applies at a given
//! moment (e.g. with a fletching knife in hand).

mod table;
pub mod timing;

pub use table::{ActionInfo, ActionKind};

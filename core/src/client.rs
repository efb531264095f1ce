//! Host collaborators consumed by the tracker.
//!
//! The game client owns ticks, wall-clock time, item containers and the
//! shared "waiting" flag. The tracker only sees them through these traits,
//! so a host wires in its real client and tests wire in the in-memory
//! handles below.
//!
//! Handles are `Rc`-backed: cloning one yields a second view of the same
//! state, so a host can keep a copy to drive (advance ticks, equip items)
//! while the tracker holds another. Everything is single-threaded.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Nominal length of one game tick.
pub const PERFECT_TICK_TIME_MS: i64 = 600;

// ─────────────────────────────────────────────────────────────────────────────
// Traits
// ─────────────────────────────────────────────────────────────────────────────

/// Wall-clock source, in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Game tick counter plus the wall-clock time of the latest tick boundary.
pub trait TickSource {
    fn tick_count(&self) -> i32;
    fn last_tick_ms(&self) -> i64;
}

/// Advisory "busy with a multi-step action" flag other systems poll.
pub trait InterruptFlag {
    fn set_waiting(&self, waiting: bool);
    fn is_waiting(&self) -> bool;
}

/// Item containers the tracker inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryId {
    Inventory,
    Equipment,
}

pub trait ItemContainers {
    /// False when the container does not exist (not loaded yet).
    fn contains(&self, container: InventoryId, item_id: i32) -> bool;
}

/// Everything the tracker needs from the host, bundled for construction.
pub struct GameClient {
    pub clock: Box<dyn Clock>,
    pub ticks: Box<dyn TickSource>,
    pub items: Box<dyn ItemContainers>,
    pub waiting: Box<dyn InterruptFlag>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Clocks
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to. Used for replays and tests.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: i64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tick timer
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct TickState {
    tick: Cell<i32>,
    last_tick_ms: Cell<i64>,
}

/// Tick counter that stamps the wall-clock time of every boundary.
#[derive(Debug, Default, Clone)]
pub struct TickTimer {
    state: Rc<TickState>,
}

impl TickTimer {
    pub fn new(tick: i32, now_ms: i64) -> Self {
        let timer = Self::default();
        timer.state.tick.set(tick);
        timer.state.last_tick_ms.set(now_ms);
        timer
    }

    /// Record a tick boundary observed at `now_ms`.
    pub fn record_tick(&self, now_ms: i64) {
        self.state.tick.set(self.state.tick.get() + 1);
        self.state.last_tick_ms.set(now_ms);
    }

    /// Jump to an absolute tick (login, world hop).
    pub fn set_tick(&self, tick: i32, now_ms: i64) {
        self.state.tick.set(tick);
        self.state.last_tick_ms.set(now_ms);
    }
}

impl TickSource for TickTimer {
    fn tick_count(&self) -> i32 {
        self.state.tick.get()
    }

    fn last_tick_ms(&self) -> i64 {
        self.state.last_tick_ms.get()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Waiting flag
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
pub struct WaitingFlag {
    waiting: Rc<Cell<bool>>,
}

impl WaitingFlag {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InterruptFlag for WaitingFlag {
    fn set_waiting(&self, waiting: bool) {
        self.waiting.set(waiting);
    }

    fn is_waiting(&self) -> bool {
        self.waiting.get()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Item containers
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory item containers. A container is absent until an item is added.
#[derive(Debug, Default, Clone)]
pub struct ItemSet {
    containers: Rc<RefCell<HashMap<InventoryId, HashSet<i32>>>>,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, container: InventoryId, item_id: i32) {
        self.containers
            .borrow_mut()
            .entry(container)
            .or_default()
            .insert(item_id);
    }

    pub fn remove(&self, container: InventoryId, item_id: i32) {
        if let Some(items) = self.containers.borrow_mut().get_mut(&container) {
            items.remove(&item_id);
        }
    }

    pub fn set(&self, container: InventoryId, item_id: i32, present: bool) {
        if present {
            self.add(container, item_id);
        } else {
            self.remove(container, item_id);
        }
    }
}

impl ItemContainers for ItemSet {
    fn contains(&self, container: InventoryId, item_id: i32) -> bool {
        self.containers
            .borrow()
            .get(&container)
            .is_some_and(|items| items.contains(&item_id))
    }
}

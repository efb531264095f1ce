//! In-memory collaborators shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use action_progress_types::ActionProgressConfig;

use crate::actions::timing::FLETCHING_KNIFE;
use crate::client::{
    Clock, GameClient, InventoryId, ItemSet, ManualClock, PERFECT_TICK_TIME_MS, TickTimer,
    WaitingFlag,
};
use crate::events::{ActionSignal, SignalHandler};
use crate::progress::ActionTracker;

pub(crate) const START_MS: i64 = 1_700_000_000_000;

/// Host stand-in: keeps its own handles to everything the tracker sees.
pub(crate) struct Harness {
    pub clock: ManualClock,
    pub ticks: TickTimer,
    pub items: ItemSet,
    pub waiting: WaitingFlag,
}

impl Harness {
    pub fn new(start_tick: i32) -> Self {
        Self {
            clock: ManualClock::new(START_MS),
            ticks: TickTimer::new(start_tick, START_MS),
            items: ItemSet::new(),
            waiting: WaitingFlag::new(),
        }
    }

    pub fn client(&self) -> GameClient {
        GameClient {
            clock: Box::new(self.clock.clone()),
            ticks: Box::new(self.ticks.clone()),
            items: Box::new(self.items.clone()),
            waiting: Box::new(self.waiting.clone()),
        }
    }

    pub fn tracker(&self, config: ActionProgressConfig) -> ActionTracker {
        ActionTracker::new(config, self.client())
    }

    /// One full tick: the clock moves a nominal tick and a boundary is stamped.
    pub fn tick(&self) {
        self.clock.advance(PERFECT_TICK_TIME_MS);
        self.ticks.record_tick(self.clock.now_ms());
    }

    pub fn knife(&self, container: InventoryId, present: bool) {
        self.items.set(container, FLETCHING_KNIFE, present);
    }
}

/// Signal handler that records everything it receives.
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    signals: Rc<RefCell<Vec<ActionSignal>>>,
}

impl Recorder {
    pub fn signals(&self) -> Vec<ActionSignal> {
        self.signals.borrow().clone()
    }
}

impl SignalHandler for Recorder {
    fn handle_signal(&mut self, signal: &ActionSignal) {
        self.signals.borrow_mut().push(signal.clone());
    }
}

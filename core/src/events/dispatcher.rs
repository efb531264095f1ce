//! Serializes host events into the tracker.
//!
//! The host delivers interrupts and ticks; the dispatcher runs interrupt
//! observers in priority order around the tracker, advances the tracker,
//! and fans the resulting signals out to every registered handler.

use crate::actions::ActionKind;
use crate::progress::{ActionTracker, TRACKER_INTERRUPT_PRIORITY};

use super::{ActionSignal, SignalHandler};

/// Something that stopped the player's current activity (movement, combat,
/// a new menu click...). Observers may consume it to keep lower-priority
/// observers from acting on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interrupt {
    consumed: bool,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// An interrupt some earlier stage already handled.
    pub fn consumed() -> Self {
        Self { consumed: true }
    }

    pub fn consume(&mut self) {
        self.consumed = true;
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Host-side interrupt consumer, ordered by priority (higher runs first).
pub trait InterruptObserver {
    fn priority(&self) -> i32 {
        0
    }

    fn on_interrupt(&mut self, interrupt: &mut Interrupt);
}

pub struct SignalDispatcher {
    tracker: ActionTracker,
    /// Sorted by descending priority, registration order among equals
    observers: Vec<Box<dyn InterruptObserver>>,
    handlers: Vec<Box<dyn SignalHandler>>,
}

impl SignalDispatcher {
    pub fn new(tracker: ActionTracker) -> Self {
        Self {
            tracker,
            observers: Vec::new(),
            handlers: Vec::new(),
        }
    }

    pub fn tracker(&self) -> &ActionTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ActionTracker {
        &mut self.tracker
    }

    pub fn add_handler(&mut self, handler: Box<dyn SignalHandler>) {
        self.handlers.push(handler);
    }

    pub fn add_observer(&mut self, observer: Box<dyn InterruptObserver>) {
        let priority = observer.priority();
        let idx = self.observers.partition_point(|o| o.priority() >= priority);
        self.observers.insert(idx, observer);
    }

    pub fn start_action(
        &mut self,
        action: ActionKind,
        count: i32,
        product_id: i32,
    ) -> Vec<ActionSignal> {
        let signals = self.tracker.start_action(action, count, product_id);
        self.publish(&signals);
        signals
    }

    /// Deliver one interrupt. Observers above the tracker's priority see it
    /// first; observers at or below it see it after the tracker.
    pub fn interrupt(&mut self, mut interrupt: Interrupt) -> Vec<ActionSignal> {
        let split = self
            .observers
            .partition_point(|o| o.priority() > TRACKER_INTERRUPT_PRIORITY);

        for observer in &mut self.observers[..split] {
            observer.on_interrupt(&mut interrupt);
        }
        let signals = self.tracker.on_interrupt(&interrupt);
        for observer in &mut self.observers[split..] {
            observer.on_interrupt(&mut interrupt);
        }

        self.publish(&signals);
        signals
    }

    /// Process one game tick. Interrupts raised during the tick are handled
    /// before the tracker looks at the new tick count.
    pub fn advance_tick<I>(&mut self, pending: I) -> Vec<ActionSignal>
    where
        I: IntoIterator<Item = Interrupt>,
    {
        let mut signals = Vec::new();
        for interrupt in pending {
            signals.extend(self.interrupt(interrupt));
        }

        let tick_signals = self.tracker.on_tick();
        self.publish(&tick_signals);
        signals.extend(tick_signals);
        signals
    }

    fn publish(&mut self, signals: &[ActionSignal]) {
        for signal in signals {
            for handler in &mut self.handlers {
                handler.handle_signal(signal);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::testing::{Harness, Recorder};

    /// Consumes every interrupt it sees and remembers whether it ran.
    struct Consumer {
        priority: i32,
        log: Rc<RefCell<Vec<&'static str>>>,
        name: &'static str,
        consume: bool,
    }

    impl InterruptObserver for Consumer {
        fn priority(&self) -> i32 {
            self.priority
        }

        fn on_interrupt(&mut self, interrupt: &mut Interrupt) {
            self.log.borrow_mut().push(self.name);
            if self.consume {
                interrupt.consume();
            }
        }
    }

    fn dispatcher(harness: &Harness) -> (SignalDispatcher, Recorder) {
        let mut dispatcher = SignalDispatcher::new(harness.tracker(Default::default()));
        let recorder = Recorder::default();
        dispatcher.add_handler(Box::new(recorder.clone()));
        (dispatcher, recorder)
    }

    #[test]
    fn test_handlers_receive_lifecycle_signals() {
        let harness = Harness::new(100);
        let (mut dispatcher, recorder) = dispatcher(&harness);

        dispatcher.start_action(ActionKind::Cooking, 2, 7);
        for _ in 0..8 {
            harness.tick();
            dispatcher.advance_tick([]);
        }

        let signals = recorder.signals();
        assert_eq!(signals.len(), 2);
        assert!(matches!(signals[0], ActionSignal::ActionStarted { count: 2, .. }));
        assert!(matches!(
            signals[1],
            ActionSignal::ActionStopped { product_id: 7, completed: false, .. }
        ));
    }

    #[test]
    fn test_higher_priority_consumer_shields_tracker() {
        let harness = Harness::new(100);
        let (mut dispatcher, recorder) = dispatcher(&harness);
        let log = Rc::new(RefCell::new(Vec::new()));
        dispatcher.add_observer(Box::new(Consumer {
            priority: 0,
            log: Rc::clone(&log),
            name: "menu",
            consume: true,
        }));

        dispatcher.start_action(ActionKind::Cooking, 5, 1);
        let signals = dispatcher.interrupt(Interrupt::new());

        assert!(signals.is_empty());
        assert!(dispatcher.tracker().is_active());
        assert_eq!(*log.borrow(), vec!["menu"]);
        assert_eq!(recorder.signals().len(), 1);
    }

    #[test]
    fn test_lower_priority_consumer_runs_after_tracker() {
        let harness = Harness::new(100);
        let (mut dispatcher, _recorder) = dispatcher(&harness);
        let log = Rc::new(RefCell::new(Vec::new()));
        dispatcher.add_observer(Box::new(Consumer {
            priority: -5,
            log: Rc::clone(&log),
            name: "late",
            consume: true,
        }));

        dispatcher.start_action(ActionKind::Cooking, 5, 1);
        let signals = dispatcher.interrupt(Interrupt::new());

        assert_eq!(signals.len(), 1);
        assert!(!dispatcher.tracker().is_active());
        assert_eq!(*log.borrow(), vec!["late"]);
    }

    #[test]
    fn test_observers_ordered_by_priority() {
        let harness = Harness::new(100);
        let (mut dispatcher, _recorder) = dispatcher(&harness);
        let log = Rc::new(RefCell::new(Vec::new()));
        for (name, priority) in [("low", -3), ("high", 10), ("mid", 0), ("mid2", 0)] {
            dispatcher.add_observer(Box::new(Consumer {
                priority,
                log: Rc::clone(&log),
                name,
                consume: false,
            }));
        }

        dispatcher.interrupt(Interrupt::new());
        assert_eq!(*log.borrow(), vec!["high", "mid", "mid2", "low"]);
    }

    #[test]
    fn test_same_tick_interrupt_runs_before_completion() {
        let harness = Harness::new(100);
        let (mut dispatcher, recorder) = dispatcher(&harness);

        // Cooking x2 = 8 ticks, ends at 108
        dispatcher.start_action(ActionKind::Cooking, 2, 1);
        for _ in 0..7 {
            harness.tick();
            dispatcher.advance_tick([]);
        }
        harness.tick();
        let signals = dispatcher.advance_tick([Interrupt::new()]);

        // The interrupt resets first; the tick then finds nothing to complete
        assert_eq!(signals.len(), 1);
        assert_eq!(recorder.signals().len(), 2);
        assert!(matches!(
            signals[0],
            ActionSignal::ActionStopped { end_tick: 108, completed: false, .. }
        ));
    }
}

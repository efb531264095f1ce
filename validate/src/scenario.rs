//! Scenario files and the replay driver.
//!
//! A scenario is a TOML script of host events. The replay feeds it through
//! a real [`SignalDispatcher`] backed by manual clocks, so the tracker sees
//! exactly what it would see in game, only faster.
//!
//! ```toml
//! start_tick = 100
//!
//! [[step]]
//! type = "start"
//! action = "FLETCH_CUT_ARROW_SHAFT"
//! count = 5
//! product_id = 52
//!
//! [[step]]
//! type = "tick"
//! count = 16
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use action_progress_core::actions::timing::FLETCHING_KNIFE;
use action_progress_core::client::{
    Clock, GameClient, InventoryId, ItemSet, ManualClock, PERFECT_TICK_TIME_MS, TickSource,
    TickTimer, WaitingFlag,
};
use action_progress_core::{
    ActionKind, ActionProgress, ActionProgressConfig, ActionSignal, ActionTracker, Interrupt,
    SignalDispatcher, SignalHandler,
};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("step {step}: unknown action {name:?}")]
    UnknownAction { step: usize, name: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub start_tick: i32,
    /// Wall-clock at the first tick boundary, defaults to now
    #[serde(default)]
    pub start_ms: Option<i64>,
    /// Inline settings, used when no config file is given
    #[serde(default)]
    pub config: Option<ActionProgressConfig>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Menu click starting a sequence
    Start {
        action: String,
        count: i32,
        #[serde(default = "no_product")]
        product_id: i32,
    },
    /// Advance `count` game ticks. `interrupts` are raised during the first
    /// of them and handled before that tick is processed.
    Tick {
        #[serde(default = "one")]
        count: u32,
        #[serde(default)]
        interrupts: u32,
    },
    /// Interrupt delivered between ticks
    Interrupt {
        #[serde(default)]
        consumed: bool,
    },
    /// Add or remove an item (the fletching knife unless `item_id` is set)
    Item {
        container: InventoryId,
        #[serde(default = "knife")]
        item_id: i32,
        present: bool,
    },
    /// Let wall-clock time pass without a tick boundary
    Wait { ms: i64 },
}

fn no_product() -> i32 {
    -1
}

fn one() -> u32 {
    1
}

fn knife() -> i32 {
    FLETCHING_KNIFE
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = fs::read_to_string(path).map_err(|e| ScenarioError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents, path)
    }

    pub fn parse(contents: &str, path: &Path) -> Result<Self, ScenarioError> {
        let scenario: Scenario = toml::from_str(contents).map_err(|e| ScenarioError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        scenario.check_actions()?;
        Ok(scenario)
    }

    fn check_actions(&self) -> Result<(), ScenarioError> {
        for (idx, step) in self.steps.iter().enumerate() {
            if let Step::Start { action, .. } = step
                && ActionKind::from_name(action).is_none()
            {
                return Err(ScenarioError::UnknownAction {
                    step: idx + 1,
                    name: action.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Per-tick report handed to the caller after every processed tick.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: i32,
    pub progress: Option<ActionProgress>,
}

/// Host stand-in driving a dispatcher from scenario steps.
pub struct Replay {
    clock: ManualClock,
    ticks: TickTimer,
    items: ItemSet,
    dispatcher: SignalDispatcher,
}

impl Replay {
    pub fn new(config: ActionProgressConfig, start_tick: i32, start_ms: i64) -> Self {
        let clock = ManualClock::new(start_ms);
        let ticks = TickTimer::new(start_tick, start_ms);
        let items = ItemSet::new();
        let client = GameClient {
            clock: Box::new(clock.clone()),
            ticks: Box::new(ticks.clone()),
            items: Box::new(items.clone()),
            waiting: Box::new(WaitingFlag::new()),
        };

        Self {
            clock,
            ticks,
            items,
            dispatcher: SignalDispatcher::new(ActionTracker::new(config, client)),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn SignalHandler>) {
        self.dispatcher.add_handler(handler);
    }

    pub fn tracker(&self) -> &ActionTracker {
        self.dispatcher.tracker()
    }

    /// Run every step, returning all signals in emission order.
    pub fn run<F>(&mut self, steps: &[Step], mut on_tick: F) -> Vec<ActionSignal>
    where
        F: FnMut(&TickReport),
    {
        let mut signals = Vec::new();
        for step in steps {
            tracing::debug!(?step, tick = self.ticks.tick_count(), "replaying step");
            match step {
                Step::Start {
                    action,
                    count,
                    product_id,
                } => {
                    // Names were checked when the scenario was parsed
                    if let Some(kind) = ActionKind::from_name(action) {
                        signals.extend(self.dispatcher.start_action(kind, *count, *product_id));
                    }
                }
                Step::Tick { count, interrupts } => {
                    for i in 0..*count {
                        let pending = if i == 0 { *interrupts } else { 0 };
                        signals.extend(self.tick(pending));
                        on_tick(&TickReport {
                            tick: self.ticks.tick_count(),
                            progress: self.tracker().progress(),
                        });
                    }
                }
                Step::Interrupt { consumed } => {
                    let interrupt = if *consumed {
                        Interrupt::consumed()
                    } else {
                        Interrupt::new()
                    };
                    signals.extend(self.dispatcher.interrupt(interrupt));
                }
                Step::Item {
                    container,
                    item_id,
                    present,
                } => self.items.set(*container, *item_id, *present),
                Step::Wait { ms } => self.clock.advance(*ms),
            }
        }
        signals
    }

    fn tick(&mut self, interrupts: u32) -> Vec<ActionSignal> {
        self.clock.advance(PERFECT_TICK_TIME_MS);
        self.ticks.record_tick(self.clock.now_ms());
        let pending = (0..interrupts).map(|_| Interrupt::new());
        self.dispatcher.advance_tick(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Scenario {
        Scenario::parse(toml, Path::new("inline.toml")).unwrap()
    }

    fn replay(scenario: &Scenario) -> (Vec<ActionSignal>, Vec<TickReport>) {
        let config = scenario.config.clone().unwrap_or_default();
        let mut replay = Replay::new(config, scenario.start_tick, 0);
        let mut reports = Vec::new();
        let signals = replay.run(&scenario.steps, |r| reports.push(r.clone()));
        (signals, reports)
    }

    #[test]
    fn test_parse_steps() {
        let scenario = parse(
            r#"
start_tick = 100

[config]
ignore_single_actions = true

[[step]]
type = "start"
action = "fletch_cut_bow"
count = 27

[[step]]
type = "item"
container = "equipment"
present = true

[[step]]
type = "tick"

[[step]]
type = "wait"
ms = 250
"#,
        );

        assert_eq!(scenario.start_tick, 100);
        assert!(scenario.config.as_ref().unwrap().ignore_single_actions);
        assert_eq!(
            scenario.steps,
            vec![
                Step::Start {
                    action: "fletch_cut_bow".to_string(),
                    count: 27,
                    product_id: -1,
                },
                Step::Item {
                    container: InventoryId::Equipment,
                    item_id: FLETCHING_KNIFE,
                    present: true,
                },
                Step::Tick {
                    count: 1,
                    interrupts: 0,
                },
                Step::Wait { ms: 250 },
            ]
        );
    }

    #[test]
    fn test_unknown_action_rejected() {
        let err = Scenario::parse(
            r#"
[[step]]
type = "start"
action = "JUGGLING"
count = 3
"#,
            Path::new("inline.toml"),
        )
        .unwrap_err();

        assert!(matches!(err, ScenarioError::UnknownAction { step: 1, .. }));
    }

    #[test]
    fn test_replay_natural_completion() {
        let scenario = parse(
            r#"
start_tick = 100

[[step]]
type = "start"
action = "FLETCH_CUT_ARROW_SHAFT"
count = 5
product_id = 52

[[step]]
type = "tick"
count = 20
"#,
        );
        let (signals, reports) = replay(&scenario);

        assert_eq!(signals.len(), 2);
        assert!(matches!(
            signals[1],
            ActionSignal::ActionStopped { end_tick: 116, completed: false, .. }
        ));
        assert_eq!(reports.len(), 20);
        assert_eq!(reports[14].tick, 115);
        assert_eq!(reports[14].progress.as_ref().map(|p| p.processed), Some(4));
        assert!(reports[15].progress.is_none());
    }

    #[test]
    fn test_replay_knife_and_interrupts() {
        let scenario = parse(
            r#"
start_tick = 0

[[step]]
type = "item"
container = "inventory"
present = true

[[step]]
type = "start"
action = "FLETCH_CUT_BOW"
count = 10

[[step]]
type = "interrupt"
consumed = true

[[step]]
type = "tick"
count = 3

[[step]]
type = "tick"
interrupts = 1
"#,
        );
        let (signals, _) = replay(&scenario);

        assert_eq!(
            signals[0],
            ActionSignal::ActionStarted {
                action: ActionKind::FletchCutBow,
                product_id: -1,
                count: 10,
                start_tick: 0,
                end_tick: 21,
            }
        );
        // The consumed interrupt did nothing; the one raised on tick 4 stops it early
        assert_eq!(signals.len(), 2);
        assert!(matches!(
            signals[1],
            ActionSignal::ActionStopped { completed: true, .. }
        ));
    }
}

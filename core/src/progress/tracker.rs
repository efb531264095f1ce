//! Action sequence tracker
//!
//! Follows one multi-step action sequence (e.g. "fletch 27 bows") from the
//! menu click that starts it until it either runs out of steps or gets
//! interrupted. Timing is estimated up front from the action's tick
//! profile; only the wall-clock estimate is refreshed as ticks pass.

use action_progress_types::ActionProgressConfig;

use crate::actions::timing::{self, FLETCHING_KNIFE};
use crate::actions::{ActionInfo, ActionKind};
use crate::client::{GameClient, InventoryId, PERFECT_TICK_TIME_MS};
use crate::events::{ActionSignal, Interrupt};

use super::ActionProgress;

/// Sentinel for "no value" on tick, count and product fields.
pub const NONE: i32 = -1;

/// Priority of the tracker among interrupt observers. Observers above it
/// may consume an interrupt before the tracker sees it.
pub const TRACKER_INTERRUPT_PRIORITY: i32 = -1;

/// State of the sequence currently in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveAction {
    action: ActionKind,
    count: i32,
    start_tick: i32,
    end_tick: i32,
    start_ms: i64,
    /// Re-estimated on every tick
    end_ms: i64,
}

pub struct ActionTracker {
    config: ActionProgressConfig,
    client: GameClient,
    active: Option<ActiveAction>,
    /// Settable independently of the active action, cleared on reset
    current_product_id: i32,
}

impl ActionTracker {
    pub fn new(config: ActionProgressConfig, client: GameClient) -> Self {
        Self {
            config,
            client,
            active: None,
            current_product_id: NONE,
        }
    }

    pub fn config(&self) -> &ActionProgressConfig {
        &self.config
    }

    /// Swap in a reloaded configuration. Only affects future starts.
    pub fn set_config(&mut self, config: ActionProgressConfig) {
        self.config = config;
    }

    // ─── Lifecycle ──────────────────────────────────────────────────────────

    /// Begin tracking `count` repetitions of `action` producing `product_id`.
    ///
    /// Disabled actions, zero counts and (when configured) single actions
    /// are ignored. Starting while another sequence is active replaces it.
    pub fn start_action(
        &mut self,
        action: ActionKind,
        count: i32,
        product_id: i32,
    ) -> Vec<ActionSignal> {
        if !action.is_enabled(&self.config) {
            tracing::debug!(%action, "action is disabled");
            return Vec::new();
        }
        if count <= 1 && self.config.ignore_single_actions {
            tracing::debug!(%action, count, "ignoring single action");
            return Vec::new();
        }
        if count == 0 {
            tracing::debug!(%action, "nothing to do");
            return Vec::new();
        }

        let start_tick = self.client.ticks.tick_count();
        let duration = self.total_ticks(action, count);
        let end_tick = start_tick + duration;
        let start_ms = self.client.clock.now_ms();
        let end_ms = start_ms + i64::from(duration) * PERFECT_TICK_TIME_MS;

        self.active = Some(ActiveAction {
            action,
            count,
            start_tick,
            end_tick,
            start_ms,
            end_ms,
        });
        self.current_product_id = product_id;
        self.client.waiting.set_waiting(true);

        tracing::debug!(
            %action,
            count,
            start_tick,
            end_tick,
            "started action"
        );

        vec![ActionSignal::ActionStarted {
            action,
            product_id,
            count,
            start_tick,
            end_tick,
        }]
    }

    /// Called once per game tick, after that tick's interrupts.
    pub fn on_tick(&mut self) -> Vec<ActionSignal> {
        let Some(active) = self.active.as_ref() else {
            return Vec::new();
        };
        let end_tick = active.end_tick;
        let end_ms = self.client.clock.now_ms() + self.approximate_completion_ms();
        if let Some(active) = self.active.as_mut() {
            active.end_ms = end_ms;
        }

        if self.client.ticks.tick_count() >= end_tick {
            tracing::debug!(end_tick, "action end tick has passed");
            if self.client.waiting.is_waiting() {
                self.client.waiting.set_waiting(false);
            }
            return self.reset_action();
        }
        Vec::new()
    }

    /// Stop tracking unless a higher-priority observer already consumed the
    /// interrupt.
    pub fn on_interrupt(&mut self, interrupt: &Interrupt) -> Vec<ActionSignal> {
        if interrupt.is_consumed() {
            return Vec::new();
        }
        self.reset_action()
    }

    fn reset_action(&mut self) -> Vec<ActionSignal> {
        tracing::debug!("resetting action");
        let mut signals = Vec::new();
        if let Some(active) = self.active.take() {
            signals.push(ActionSignal::ActionStopped {
                action: active.action,
                product_id: self.current_product_id,
                count: active.count,
                start_tick: active.start_tick,
                end_tick: active.end_tick,
                completed: self.client.ticks.tick_count() < active.end_tick,
            });
        }
        self.current_product_id = NONE;
        signals
    }

    // ─── Timing ─────────────────────────────────────────────────────────────

    /// Ticks needed for `count` repetitions of `action` with the current gear.
    pub fn total_ticks(&self, action: ActionKind, count: i32) -> i32 {
        let tick_times = self.action_tick_times(action);
        timing::total_ticks(&tick_times, timing::effective_count(action.info(), count))
    }

    /// Per-step tick profile for `action`, accounting for a fletching knife
    /// in the inventory or equipment. Re-evaluated on every call since gear
    /// can change mid-sequence.
    pub fn action_tick_times(&self, action: ActionKind) -> Vec<i32> {
        let info = action.info();
        if timing::is_knife_boostable(info) && self.has_fletching_knife() {
            timing::knife_tick_times(info.tick_times)
        } else {
            info.tick_times.to_vec()
        }
    }

    fn has_fletching_knife(&self) -> bool {
        let items = &self.client.items;
        items.contains(InventoryId::Inventory, FLETCHING_KNIFE)
            || items.contains(InventoryId::Equipment, FLETCHING_KNIFE)
    }

    /// Steps completed so far, 0 when idle.
    pub fn current_action_processed(&self) -> i32 {
        let Some(active) = self.active.as_ref() else {
            return 0;
        };
        let elapsed = self.client.ticks.tick_count() - active.start_tick;
        timing::processed_steps(&self.action_tick_times(active.action), elapsed)
    }

    /// Ticks until the sequence ends, never negative.
    pub fn ticks_left(&self) -> f32 {
        let Some(active) = self.active.as_ref() else {
            return 0.0;
        };
        let ticks_left = (active.end_tick - self.client.ticks.tick_count()) as f32;
        if ticks_left <= 0.0 {
            return 0.0;
        }
        ticks_left
    }

    /// Estimated milliseconds until the sequence ends.
    ///
    /// Subtracts the time already spent in the current tick, so the value
    /// can be slightly negative right before a boundary.
    pub fn approximate_completion_ms(&self) -> i64 {
        let since_tick = self.client.clock.now_ms() - self.client.ticks.last_tick_ms();
        let remaining = f64::from(self.ticks_left()) * PERFECT_TICK_TIME_MS as f64;
        (remaining - since_tick as f64).round() as i64
    }

    /// Snapshot for overlays, `None` when idle.
    pub fn progress(&self) -> Option<ActionProgress> {
        let active = self.active.as_ref()?;
        let duration = active.end_tick - active.start_tick;
        let elapsed = self.client.ticks.tick_count() - active.start_tick;
        let fraction = if duration <= 0 {
            1.0
        } else {
            (elapsed as f32 / duration as f32).clamp(0.0, 1.0)
        };

        Some(ActionProgress {
            action: active.action,
            product_id: self.current_product_id,
            count: active.count,
            processed: self.current_action_processed(),
            ticks_left: self.ticks_left(),
            remaining_ms: self.approximate_completion_ms(),
            fraction,
        })
    }

    // ─── Accessors (sentinel values when idle) ──────────────────────────────

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_action(&self) -> Option<ActionKind> {
        self.active.as_ref().map(|a| a.action)
    }

    pub fn current_action_info(&self) -> Option<&'static ActionInfo> {
        self.current_action().map(ActionKind::info)
    }

    pub fn current_product_id(&self) -> i32 {
        self.current_product_id
    }

    pub fn set_current_product_id(&mut self, product_id: i32) {
        self.current_product_id = product_id;
    }

    pub fn action_count(&self) -> i32 {
        self.active.as_ref().map_or(NONE, |a| a.count)
    }

    pub fn action_start_tick(&self) -> i32 {
        self.active.as_ref().map_or(NONE, |a| a.start_tick)
    }

    pub fn action_end_tick(&self) -> i32 {
        self.active.as_ref().map_or(NONE, |a| a.end_tick)
    }

    pub fn action_start_ms(&self) -> i64 {
        self.active.as_ref().map_or(0, |a| a.start_ms)
    }

    pub fn action_end_ms(&self) -> i64 {
        self.active.as_ref().map_or(0, |a| a.end_ms)
    }
}

//! Action gating and dispatch
//!
//! The [`ActionGate`] sits between classification and execution. Both of
//! its throttles must pass before an event may fire: a time-interval gate
//! (lazy, event-time based, no timers) and a cumulative-distance gate whose
//! cadence is proportional to gesture speed. Configured interval/distance
//! values resolve through the rule tree and are memoized per tree
//! generation.

pub mod command;

pub use command::CommandDispatcher;

use crate::config::{Atom, ConfigSnapshot, RulePath, Searcher};
use crate::detector::{ClassifiedEvent, Direction, Trigger};
use crate::event::types::GestureKind;
use serde_json::Value;
use tracing::{debug, info};

/// Base interval (time units) for oneshot triggers
pub const BASE_ONESHOT_INTERVAL: f64 = 0.3;

/// Base interval (time units) for repeat triggers
pub const BASE_REPEAT_INTERVAL: f64 = 0.1;

/// Base unit of the cumulative-distance threshold
pub const BASE_DISTANCE: f64 = 10.0;

/// Grace multiplier applied to the interval recorded after a swipe begin,
/// to avoid an immediate double-fire when a gesture starts
pub const BEGIN_GRACE_MULTIPLIER: f64 = 5.0;

/// Small constant folded into every distance contribution
pub const DISTANCE_EPSILON: f64 = 0.01;

/// Executor boundary: receives the resolved action and the event payload.
///
/// Dispatch is fire-and-forget; the gate does not await or inspect the
/// outcome, failure handling is entirely the dispatcher's concern.
pub trait Dispatch {
    fn dispatch(&mut self, action: &Value, event: &ClassifiedEvent);
}

/// Dispatcher that only logs the resolved action; useful for dry runs
#[derive(Debug, Default)]
pub struct LogDispatcher;

impl Dispatch for LogDispatcher {
    fn dispatch(&mut self, action: &Value, event: &ClassifiedEvent) {
        info!(path = %event.path, ?action, "would dispatch");
    }
}

/// Per-pipeline throttle state for resolved actions
#[derive(Debug, Default)]
pub struct ActionGate {
    wait_until: Option<f64>,
    last_direction: Option<Direction>,
    accumulated_distance: f64,
    searcher: Searcher,
}

impl ActionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time-interval gate. Events whose path carries the `end` phase atom
    /// always pass; everything else waits out the recorded interval.
    pub fn interval_allowed(&self, event: &ClassifiedEvent) -> bool {
        if event.path.contains(&Atom::from("end")) {
            return true;
        }
        match self.wait_until {
            Some(until) => event.timestamp >= until,
            None => true,
        }
    }

    /// Record the interval consumed by a fired event
    pub fn record_interval(&mut self, event: &ClassifiedEvent, config: &ConfigSnapshot) {
        let multiplier = if event.kind == GestureKind::Swipe
            && event.path.contains(&Atom::from("begin"))
        {
            BEGIN_GRACE_MULTIPLIER
        } else {
            1.0
        };
        let interval = self.configured_interval(event, config) * multiplier;
        self.wait_until = Some(event.timestamp + interval);
    }

    /// Cumulative-distance gate. Non-directional events always pass;
    /// axis-directional events accumulate their dominant-axis contribution
    /// and pass once the configured distance is exceeded. A direction change
    /// resets the accumulator before the new contribution lands. Zoom
    /// directions carry no motion axis to accumulate and pass through.
    pub fn distance_allowed(&mut self, event: &ClassifiedEvent, config: &ConfigSnapshot) -> bool {
        let Some(direction) = event.direction else {
            return true;
        };
        if matches!(direction, Direction::In | Direction::Out) {
            return true;
        }

        if self.last_direction != Some(direction) {
            self.accumulated_distance = 0.0;
            self.last_direction = Some(direction);
        }

        let contribution = if direction.is_horizontal() {
            event.payload.dx.abs()
        } else {
            event.payload.dy.abs()
        };
        self.accumulated_distance += contribution + DISTANCE_EPSILON;

        self.accumulated_distance > self.configured_distance(event, config)
    }

    /// Consume one distance threshold from the accumulator, carrying the
    /// remainder so cadence follows gesture speed rather than fixed ticks
    pub fn record_distance(&mut self, event: &ClassifiedEvent, config: &ConfigSnapshot) {
        let axis_directional = event
            .direction
            .is_some_and(|d| !matches!(d, Direction::In | Direction::Out));
        if axis_directional && event.trigger == Trigger::Repeat {
            self.accumulated_distance -= self.configured_distance(event, config);
        }
    }

    /// Whether both gates admit the event
    pub fn allows(&mut self, event: &ClassifiedEvent, config: &ConfigSnapshot) -> bool {
        // Both gates are consulted independently; the distance gate
        // accumulates even when the interval gate will suppress
        let interval_ok = self.interval_allowed(event);
        let distance_ok = self.distance_allowed(event, config);
        let allowed = interval_ok && distance_ok;
        if !allowed {
            debug!(path = %event.path, interval_ok, distance_ok, "event throttled");
        }
        allowed
    }

    /// Record both gates after a fired event
    pub fn record(&mut self, event: &ClassifiedEvent, config: &ConfigSnapshot) {
        self.record_interval(event, config);
        self.record_distance(event, config);
    }

    /// Configured interval for a path: `[...path, interval]` first, then
    /// `[interval, kind]`, default multiplier 1, scaled by the trigger base
    fn configured_interval(&mut self, event: &ClassifiedEvent, config: &ConfigSnapshot) -> f64 {
        let base = match event.trigger {
            Trigger::Oneshot => BASE_ONESHOT_INTERVAL,
            Trigger::Repeat => BASE_REPEAT_INTERVAL,
        };
        base * self.configured_multiplier(event, "interval", config)
    }

    /// Configured distance for a path, scaled by the base distance unit
    fn configured_distance(&mut self, event: &ClassifiedEvent, config: &ConfigSnapshot) -> f64 {
        BASE_DISTANCE * self.configured_multiplier(event, "distance", config)
    }

    fn configured_multiplier(
        &mut self,
        event: &ClassifiedEvent,
        attr: &str,
        config: &ConfigSnapshot,
    ) -> f64 {
        let specific = event.path.extended(attr);
        let global: RulePath = [attr, event.kind.as_str()].into_iter().collect();
        self.searcher
            .search(&specific, config.generation, config.primary())
            .or_else(|| self.searcher.search(&global, config.generation, config.primary()))
            .and_then(|t| t.as_f64())
            .unwrap_or(1.0)
    }
}

//! The per-device processing pipeline
//!
//! One [`Pipeline`] exists per input device and owns everything with
//! per-device state: the sample buffer, one classifier per gesture kind,
//! the action gate, a rule searcher and the dispatcher. Processing is
//! strictly sequential; a sample is fully classified, gated and dispatched
//! before the next one is considered. The rule table itself lives in a
//! shared [`ConfigStore`] so a reload lands between samples, never inside
//! one.

use crate::config::{find_context, resolve, ConfigSnapshot, ConfigStore, ContextMap, Searcher};
use crate::detector::{ClassifiedEvent, Detector, HoldDetector, PinchDetector, SwipeDetector};
use crate::event::buffer::GestureBuffer;
use crate::event::types::{MotionSample, Phase};
use crate::executor::{ActionGate, Dispatch};
use std::sync::Arc;
use tracing::{debug, trace};

pub struct Pipeline {
    store: Arc<ConfigStore>,
    buffer: GestureBuffer,
    detectors: Vec<Box<dyn Detector>>,
    gate: ActionGate,
    searcher: Searcher,
    dispatcher: Box<dyn Dispatch>,
    context: ContextMap,
}

impl Pipeline {
    pub fn new(store: Arc<ConfigStore>, dispatcher: Box<dyn Dispatch>) -> Self {
        Self {
            store,
            buffer: GestureBuffer::new(),
            detectors: vec![
                Box::new(SwipeDetector::new()),
                Box::new(PinchDetector::new()),
                Box::new(HoldDetector::new()),
            ],
            gate: ActionGate::new(),
            searcher: Searcher::new(),
            dispatcher,
            context: ContextMap::new(),
        }
    }

    /// Set the active context (e.g. the focused application); guarded rule
    /// layers whose `when` map matches it take precedence over the default
    /// layer until the context changes again
    pub fn set_context(&mut self, context: ContextMap) {
        self.context = context;
    }

    /// Feed one sample through classify → resolve → gate → dispatch
    pub fn push_sample(&mut self, sample: MotionSample) {
        let kind = sample.kind;
        let terminal = matches!(sample.phase, Phase::End | Phase::Cancelled);

        trace!(kind = %kind, phase = %sample.phase, ts = sample.timestamp, "sample");
        self.buffer.append(sample);

        let snapshot = self.store.snapshot();
        let events = match self.detectors.iter_mut().find(|d| d.kind() == kind) {
            Some(detector) => detector.detect(&self.buffer, &snapshot),
            None => Vec::new(),
        };

        for event in events {
            self.process_event(&event, &snapshot);
        }

        // Terminal samples have already been classified against the full
        // cycle; the cycle's samples are no longer needed
        if terminal {
            self.buffer.clear_kind(kind);
        }
    }

    fn process_event(&mut self, event: &ClassifiedEvent, snapshot: &ConfigSnapshot) {
        let command_path = event.path.extended("command");
        // The memoized search covers the common no-context case; with an
        // active context, guarded layers are consulted most specific first
        let found = if self.context.is_empty() {
            self.searcher
                .search(&command_path, snapshot.generation, snapshot.primary())
        } else {
            let fallbacks = [self.context.clone(), ContextMap::new()];
            find_context(&snapshot.layers, &fallbacks, |layer| {
                resolve(command_path.keys(), &layer.tree).cloned()
            })
            .map(|(_, tree)| tree)
        };
        let Some(action) = found.and_then(|t| t.as_value().cloned()) else {
            trace!(path = %event.path, "no action configured");
            return;
        };

        if !self.gate.allows(event, snapshot) {
            return;
        }
        self.gate.record(event, snapshot);

        debug!(path = %event.path, trigger = ?event.trigger, "dispatching");
        self.dispatcher.dispatch(&action, event);
    }
}

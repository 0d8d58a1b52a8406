use std::mem;

use serde::{Serialize, Deserialize};

use super::{Item, SelectionRecord};
use crate::constants::{POP_MAX_OFFSET, POP_MAX_SCALE_GAIN, POP_SPARK_THRESHOLD};

/// A host's request to pop the selected slice. Numbers must increase; a
/// repeated or older number is treated as the same request seen twice.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RemovalRequest(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum RemovalPhase {
    Idle,
    Selected(SelectionRecord),
    AwaitingConfirmation(SelectionRecord),
    Popping { record: SelectionRecord, progress: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredRequest {
    Duplicate,
    Disabled,
    Spinning,
    AlreadyPopping,
    NoSelection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalDecision {
    Accepted(SelectionRecord),
    Ignored(IgnoredRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidation {
    Kept,
    Cleared,
    /// The selection vanished while its pop animation was still running.
    ClearedWhilePopping,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopRemovalController {
    phase: RemovalPhase,
    last_request: u64,
}

impl Default for PopRemovalController {
    fn default() -> Self {
        Self::new()
    }
}

impl PopRemovalController {
    pub fn new() -> Self {
        Self {
            phase: RemovalPhase::Idle,
            last_request: 0,
        }
    }

    pub fn phase(&self) -> &RemovalPhase {
        &self.phase
    }

    pub fn selection(&self) -> Option<&SelectionRecord> {
        match &self.phase {
            RemovalPhase::Idle => None,
            RemovalPhase::Selected(record)
            | RemovalPhase::AwaitingConfirmation(record)
            | RemovalPhase::Popping { record, .. } => Some(record),
        }
    }

    pub fn is_popping(&self) -> bool {
        matches!(self.phase, RemovalPhase::Popping { .. })
    }

    /// Index and progress of the slice currently popping.
    pub fn pop_progress(&self) -> Option<(usize, f64)> {
        match &self.phase {
            RemovalPhase::Popping { record, progress } => Some((record.index, *progress)),
            _ => None,
        }
    }

    pub fn record_selection(&mut self, record: SelectionRecord) {
        self.phase = RemovalPhase::Selected(record);
    }

    /// The host opened its confirmation prompt for the current selection.
    pub fn await_confirmation(&mut self) -> bool {
        match mem::replace(&mut self.phase, RemovalPhase::Idle) {
            RemovalPhase::Selected(record) => {
                self.phase = RemovalPhase::AwaitingConfirmation(record);
                true
            }
            other => {
                self.phase = other;
                false
            }
        }
    }

    /// Drops an unconsumed selection. A running pop is left alone.
    pub fn discard_selection(&mut self) -> Option<SelectionRecord> {
        match mem::replace(&mut self.phase, RemovalPhase::Idle) {
            RemovalPhase::Selected(record) | RemovalPhase::AwaitingConfirmation(record) => Some(record),
            other => {
                self.phase = other;
                None
            }
        }
    }

    pub fn begin_pop(&mut self, request: RemovalRequest, disabled: bool, spinning: bool) -> RemovalDecision {
        if request.0 <= self.last_request {
            return RemovalDecision::Ignored(IgnoredRequest::Duplicate);
        }
        self.last_request = request.0;

        if disabled {
            return RemovalDecision::Ignored(IgnoredRequest::Disabled);
        }
        if spinning {
            return RemovalDecision::Ignored(IgnoredRequest::Spinning);
        }

        match mem::replace(&mut self.phase, RemovalPhase::Idle) {
            RemovalPhase::Selected(record) | RemovalPhase::AwaitingConfirmation(record) => {
                self.phase = RemovalPhase::Popping { record: record.clone(), progress: 0.0 };
                RemovalDecision::Accepted(record)
            }
            popping @ RemovalPhase::Popping { .. } => {
                self.phase = popping;
                RemovalDecision::Ignored(IgnoredRequest::AlreadyPopping)
            }
            RemovalPhase::Idle => RemovalDecision::Ignored(IgnoredRequest::NoSelection),
        }
    }

    pub fn set_pop_progress(&mut self, value: f64) {
        if let RemovalPhase::Popping { progress, .. } = &mut self.phase {
            *progress = value.clamp(0.0, 1.0);
        }
    }

    /// Ends the pop cycle. The record leaves the controller here, so only the
    /// first call per cycle returns it.
    pub fn finish_pop(&mut self) -> Option<SelectionRecord> {
        match mem::replace(&mut self.phase, RemovalPhase::Idle) {
            RemovalPhase::Popping { record, .. } => Some(record),
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Clears the selection if `items` no longer holds its value at its index.
    pub fn invalidate_stale(&mut self, items: &[Item]) -> Invalidation {
        if self.selection().map_or(true, |record| record.matches(items)) {
            return Invalidation::Kept;
        }
        let was_popping = self.is_popping();
        self.phase = RemovalPhase::Idle;
        if was_popping {
            Invalidation::ClearedWhilePopping
        } else {
            Invalidation::Cleared
        }
    }

    /// Back to idle. Request numbers already seen stay consumed.
    pub fn reset(&mut self) {
        self.phase = RemovalPhase::Idle;
    }
}

/// How the popped slice is drawn at a given pop progress. `offset` is a
/// fraction of the wheel radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopVisual {
    pub offset: f64,
    pub scale: f64,
    pub opacity: f64,
    /// Progress of the spark flourish, present only past the spark threshold.
    pub spark: Option<f64>,
}

impl PopVisual {
    pub fn at(progress: f64) -> Self {
        let p = progress.clamp(0.0, 1.0);
        let spark = if p > POP_SPARK_THRESHOLD {
            Some((p - POP_SPARK_THRESHOLD) / (1.0 - POP_SPARK_THRESHOLD))
        } else {
            None
        };
        Self {
            offset: p * POP_MAX_OFFSET,
            scale: 1.0 + p * POP_MAX_SCALE_GAIN,
            opacity: 1.0 - p,
            spark,
        }
    }
}

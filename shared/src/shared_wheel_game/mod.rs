pub mod animation;
pub mod layout;
pub mod planner;
pub mod pop;
pub mod selector;
pub mod state;

use log::warn;
use serde::{Serialize, Deserialize};

use crate::constants::*;

pub use animation::{AnimationCategory, AnimationDriver, AnimationId, AnimationSpec, Easing, FrameOutcome, FrameScheduler, QueuedFrames};
pub use layout::{AngleRange, SliceLayout};
pub use planner::SpinPlan;
pub use pop::{PopRemovalController, PopVisual, RemovalPhase, RemovalRequest};
pub use state::{PopOverlay, Wheel, WheelFrame, WheelState};

/// One labeled slice of the wheel. `value` doubles as the slice key.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Item {
    pub value: String,
    pub weight: f64,
}

impl Item {
    pub fn new(value: impl Into<String>, weight: f64) -> Self {
        Self {
            value: value.into(),
            weight,
        }
    }
}

/// The winner of the most recent spin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SelectionRecord {
    pub index: usize,
    pub value: String,
}

impl SelectionRecord {
    /// True while `items` still holds this value at this index.
    pub fn matches(&self, items: &[Item]) -> bool {
        items.get(self.index).map_or(false, |item| item.value == self.value)
    }
}

/// Notifications the wheel queues for its host.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum WheelEvent {
    Result(String),
    Removed(String),
    Reset,
}

/// Tuning knobs for spin timing, landing and the reflow/pop animations.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WheelConfig {
    pub ms_per_turn: f64,
    pub base_ms: f64,
    pub jitter_ms: f64,
    /// Fraction of a slice's width kept clear on each side when landing.
    pub landing_margin: f64,
    pub reflow_duration_ms: f64,
    pub pop_duration_ms: f64,
    pub canvas_size: u32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            ms_per_turn: MS_PER_TURN,
            base_ms: BASE_SPIN_MS,
            jitter_ms: SPIN_JITTER_MS,
            landing_margin: LANDING_MARGIN,
            reflow_duration_ms: REFLOW_DURATION_MS,
            pop_duration_ms: POP_DURATION_MS,
            canvas_size: DEFAULT_CANVAS_SIZE,
        }
    }
}

impl WheelConfig {
    /// Replaces unusable timings with their defaults and keeps the landing
    /// margin inside a slice.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let timing = |name: &str, value: f64, default: f64| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                warn!("Wheel config {} = {} is unusable, using {}", name, value, default);
                default
            }
        };

        Self {
            ms_per_turn: timing("ms_per_turn", self.ms_per_turn, defaults.ms_per_turn),
            base_ms: timing("base_ms", self.base_ms, defaults.base_ms),
            jitter_ms: timing("jitter_ms", self.jitter_ms, defaults.jitter_ms),
            landing_margin: if self.landing_margin.is_finite() {
                self.landing_margin.clamp(0.0, 0.45)
            } else {
                defaults.landing_margin
            },
            reflow_duration_ms: timing("reflow_duration_ms", self.reflow_duration_ms, defaults.reflow_duration_ms),
            pop_duration_ms: timing("pop_duration_ms", self.pop_duration_ms, defaults.pop_duration_ms),
            canvas_size: self.canvas_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: WheelConfig = serde_json::from_str(r#"{"pop_duration_ms": 250.0}"#).unwrap();
        assert_eq!(config.pop_duration_ms, 250.0);
        assert_eq!(config.ms_per_turn, MS_PER_TURN);
        assert_eq!(config.base_ms, BASE_SPIN_MS);
    }

    #[test]
    fn test_turn_counts_are_not_configurable() {
        let config: WheelConfig =
            serde_json::from_str(r#"{"min_extra_turns": 4294967295, "random_turns_max": 0}"#).unwrap();
        assert_eq!(config, WheelConfig::default());
    }

    #[test]
    fn test_sanitized_restores_unusable_timings() {
        let config: WheelConfig =
            serde_json::from_str(r#"{"ms_per_turn": -5.0, "pop_duration_ms": -1.0, "landing_margin": 3.0, "base_ms": 900.0}"#)
                .unwrap();
        let config = config.sanitized();
        assert_eq!(config.ms_per_turn, MS_PER_TURN);
        assert_eq!(config.pop_duration_ms, POP_DURATION_MS);
        assert_eq!(config.base_ms, 900.0);
        assert_eq!(config.landing_margin, 0.45);
    }

    #[test]
    fn test_item_deserializes_from_host_json() {
        let items: Vec<Item> = serde_json::from_str(r#"[{"value":"tacos","weight":2}]"#).unwrap();
        assert_eq!(items, vec![Item::new("tacos", 2.0)]);
    }
}

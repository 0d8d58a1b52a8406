use std::f64::consts::{FRAC_PI_2, TAU};

// Geometry
pub const POINTER_ANGLE: f64 = -FRAC_PI_2;
pub const FULL_TURN: f64 = TAU;

// Spin tuning defaults
pub const MIN_EXTRA_TURNS: u32 = 2;
pub const RANDOM_TURNS_MIN: u32 = 2;
pub const RANDOM_TURNS_MAX: u32 = 5;
pub const MS_PER_TURN: f64 = 550.0;
pub const BASE_SPIN_MS: f64 = 1800.0;
pub const SPIN_JITTER_MS: f64 = 400.0;
pub const LANDING_MARGIN: f64 = 0.15;

// Reflow / pop tuning defaults
pub const REFLOW_DURATION_MS: f64 = 450.0;
pub const POP_DURATION_MS: f64 = 700.0;
pub const POP_SPARK_THRESHOLD: f64 = 0.35;
pub const POP_MAX_OFFSET: f64 = 0.18;
pub const POP_MAX_SCALE_GAIN: f64 = 0.3;

pub const DEFAULT_CANVAS_SIZE: u32 = 450;

pub const EMPTY_ITEMS_ERROR: &str = "Add at least one item to spin the wheel";
pub const NON_FINITE_WEIGHT_ERROR: &str = "Every weight must be a finite number";
pub const NEGATIVE_WEIGHT_ERROR: &str = "Weights cannot be negative";
pub const ZERO_TOTAL_WEIGHT_ERROR: &str = "At least one item needs a weight above zero";
pub const DUPLICATE_VALUE_ERROR: &str = "Every item on the wheel must be unique";
pub const SLICE_OUT_OF_RANGE_ERROR: &str = "The chosen slice is not part of the current layout";

use std::borrow::Cow;

use log::debug;
use rand::Rng;
use validator::ValidationError;

use super::layout::{normalize_angle, SliceLayout};
use super::WheelConfig;
use crate::constants::{
    FULL_TURN, MIN_EXTRA_TURNS, POINTER_ANGLE, RANDOM_TURNS_MAX, RANDOM_TURNS_MIN, SLICE_OUT_OF_RANGE_ERROR,
};

/// Where a spin should end and how long it should take to get there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub chosen_index: usize,
    pub start_rotation: f64,
    pub target_rotation: f64,
    pub duration_ms: f64,
    /// Wheel-local angle that ends up under the pointer.
    pub landing_angle: f64,
    pub full_turns: u32,
}

/// Smallest non-negative rotation that brings `landing_angle` under the pointer.
pub fn rotation_needed(landing_angle: f64, current_rotation: f64) -> f64 {
    normalize_angle(POINTER_ANGLE - landing_angle - current_rotation)
}

/// Wheel-local angle currently sitting under the pointer.
pub fn angle_under_pointer(rotation: f64) -> f64 {
    normalize_angle(POINTER_ANGLE - rotation)
}

pub fn plan<R: Rng + ?Sized>(
    chosen_index: usize,
    layout: &SliceLayout,
    current_rotation: f64,
    config: &WheelConfig,
    rng: &mut R,
) -> Result<SpinPlan, ValidationError> {
    let slice = layout.range_at(chosen_index).ok_or_else(|| {
        let mut err = ValidationError::new("slice_out_of_range");
        err.message = Some(Cow::Borrowed(SLICE_OUT_OF_RANGE_ERROR));
        err.add_param(Cow::Borrowed("index"), &chosen_index);
        err
    })?;

    // Keep clear of the dividers
    let landing_zone = slice.inset(config.landing_margin);
    let landing_angle = if landing_zone.width() > 0.0 {
        rng.gen_range(landing_zone.start..landing_zone.end)
    } else {
        slice.mid()
    };

    let needed = rotation_needed(landing_angle, current_rotation);

    let full_turns = MIN_EXTRA_TURNS + rng.gen_range(RANDOM_TURNS_MIN..=RANDOM_TURNS_MAX);
    let target_rotation = current_rotation + full_turns as f64 * FULL_TURN + needed;

    let total_turns = full_turns as f64 + needed / FULL_TURN;
    let jitter = if config.jitter_ms > 0.0 {
        rng.gen_range(0.0..config.jitter_ms)
    } else {
        0.0
    };
    let duration_ms = total_turns * config.ms_per_turn + config.base_ms + jitter;

    debug!(
        "Planned spin to slice {}: {} turns, landing at {:.3} rad over {:.0}ms",
        chosen_index, full_turns, landing_angle, duration_ms
    );

    Ok(SpinPlan {
        chosen_index,
        start_rotation: current_rotation,
        target_rotation,
        duration_ms,
        landing_angle,
        full_turns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared_wheel_game::Item;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layout(count: usize) -> SliceLayout {
        let items: Vec<Item> = (0..count).map(|i| Item::new(format!("slice-{}", i), 1.0)).collect();
        SliceLayout::equal_partition(&items)
    }

    #[test]
    fn test_rotation_needed_is_non_negative() {
        for landing in [0.0, 1.0, 3.0, 6.0] {
            for current in [-20.0, -1.0, 0.0, 2.5, 100.0] {
                let needed = rotation_needed(landing, current);
                assert!((0.0..FULL_TURN).contains(&needed));
            }
        }
    }

    #[test]
    fn test_plan_lands_inside_chosen_slice() {
        let mut rng = StdRng::seed_from_u64(99);
        let config = WheelConfig::default();
        let layout = layout(6);
        let mut rotation = -3.7;

        for round in 0..200 {
            let chosen = round % layout.len();
            let plan = plan(chosen, &layout, rotation, &config, &mut rng).unwrap();

            assert!(plan.target_rotation >= rotation + 4.0 * FULL_TURN);
            assert!((4..=7).contains(&plan.full_turns));

            let under_pointer = angle_under_pointer(plan.target_rotation);
            let zone = layout.range_at(chosen).unwrap().inset(config.landing_margin);
            let slack = 1e-9;
            let widened = crate::shared_wheel_game::AngleRange::new(zone.start - slack, zone.end + slack);
            assert!(widened.contains(under_pointer), "round {} missed: {}", round, under_pointer);

            rotation = plan.target_rotation;
        }
    }

    #[test]
    fn test_full_turns_cover_four_to_seven() {
        let mut rng = StdRng::seed_from_u64(12);
        let config = WheelConfig {
            ms_per_turn: 0.0,
            base_ms: 0.0,
            jitter_ms: 0.0,
            landing_margin: 0.0,
            ..WheelConfig::default()
        };
        let layout = layout(3);
        let mut seen = [false; 8];
        for _ in 0..400 {
            let plan = plan(2, &layout, 1.5, &config, &mut rng).unwrap();
            assert!(plan.target_rotation >= 1.5 + 4.0 * FULL_TURN);
            seen[plan.full_turns as usize] = true;
        }
        assert_eq!(seen, [false, false, false, false, true, true, true, true]);
    }

    #[test]
    fn test_duration_scales_with_distance() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = WheelConfig { jitter_ms: 0.0, ..WheelConfig::default() };
        let layout = layout(4);
        for _ in 0..50 {
            let plan = plan(1, &layout, 0.0, &config, &mut rng).unwrap();
            let distance = (plan.target_rotation - plan.start_rotation) / FULL_TURN;
            let expected = distance * config.ms_per_turn + config.base_ms;
            assert!((plan.duration_ms - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_missing_slice_is_an_error() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = plan(3, &layout(2), 0.0, &WheelConfig::default(), &mut rng).unwrap_err();
        assert_eq!(err.code, "slice_out_of_range");
    }
}

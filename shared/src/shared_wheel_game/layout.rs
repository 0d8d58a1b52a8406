use std::f64::consts::TAU;

use serde::{Serialize, Deserialize};

use super::Item;

/// Wraps any angle into `[0, 2π)`. Rust's `%` keeps the dividend's sign, so
/// the second modulo is required for negative inputs.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = ((angle % TAU) + TAU) % TAU;
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Half-open angular span `[start, end)` in wheel-local radians.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct AngleRange {
    pub start: f64,
    pub end: f64,
}

impl AngleRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Shrinks the span by `fraction` of its width on both sides.
    pub fn inset(&self, fraction: f64) -> Self {
        let margin = self.width() * fraction.clamp(0.0, 0.5);
        Self::new(self.start + margin, self.end - margin)
    }

    /// Whether a wheel-local angle (any winding) falls inside the span.
    pub fn contains(&self, angle: f64) -> bool {
        let offset = normalize_angle(angle - self.start);
        offset < self.width()
    }

    pub fn lerp(&self, other: &AngleRange, t: f64) -> Self {
        Self::new(
            self.start + (other.start - self.start) * t,
            self.end + (other.end - self.end) * t,
        )
    }
}

/// Angular ranges for the slices, kept in item order and keyed by item value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SliceLayout {
    slices: Vec<(String, AngleRange)>,
}

impl SliceLayout {
    /// Slice `i` of `n` spans `[i·2π/n, (i+1)·2π/n)`; the last one ends at 2π exactly.
    pub fn equal_partition(items: &[Item]) -> Self {
        let count = items.len();
        if count == 0 {
            return Self::default();
        }

        let width = TAU / count as f64;
        let slices = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let start = i as f64 * width;
                let end = if i + 1 == count { TAU } else { (i + 1) as f64 * width };
                (item.value.clone(), AngleRange::new(start, end))
            })
            .collect();

        Self { slices }
    }

    /// Interpolates every key present in both layouts. Keys only in `to` keep
    /// their target range; keys only in `from` are dropped.
    pub fn blend(from: &SliceLayout, to: &SliceLayout, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let slices = to
            .slices
            .iter()
            .map(|(value, target)| {
                let range = match from.get(value) {
                    Some(source) => source.lerp(target, t),
                    None => *target,
                };
                (value.clone(), range)
            })
            .collect();

        Self { slices }
    }

    pub fn get(&self, value: &str) -> Option<AngleRange> {
        self.slices
            .iter()
            .find(|(key, _)| key == value)
            .map(|(_, range)| *range)
    }

    pub fn range_at(&self, index: usize) -> Option<AngleRange> {
        self.slices.get(index).map(|(_, range)| *range)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, AngleRange)> + '_ {
        self.slices.iter().map(|(value, range)| (value.as_str(), *range))
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn total_width(&self) -> f64 {
        self.slices.iter().map(|(_, range)| range.width()).sum()
    }
}

/// Reflow only animates count changes between two multi-slice wheels.
pub fn should_reflow(old_len: usize, new_len: usize) -> bool {
    old_len != new_len && old_len > 1 && new_len > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn named(names: &[&str]) -> Vec<Item> {
        names.iter().map(|name| Item::new(*name, 1.0)).collect()
    }

    #[test]
    fn test_equal_partition_covers_circle() {
        for count in 1..=13 {
            let names: Vec<String> = (0..count).map(|i| format!("slice-{}", i)).collect();
            let items: Vec<Item> = names.iter().map(|n| Item::new(n.as_str(), 1.0)).collect();
            let layout = SliceLayout::equal_partition(&items);

            assert_eq!(layout.len(), count);
            assert_eq!(layout.range_at(0).unwrap().start, 0.0);
            assert_eq!(layout.range_at(count - 1).unwrap().end, TAU);
            assert!((layout.total_width() - TAU).abs() < EPS);

            let ranges: Vec<AngleRange> = layout.iter().map(|(_, r)| r).collect();
            for pair in ranges.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
                assert!(pair[0].start < pair[1].start);
            }
        }
    }

    #[test]
    fn test_blend_endpoints() {
        let from = SliceLayout::equal_partition(&named(&["a", "b", "c", "d", "e"]));
        let to = SliceLayout::equal_partition(&named(&["a", "b", "d", "e"]));

        let start = SliceLayout::blend(&from, &to, 0.0);
        let end = SliceLayout::blend(&from, &to, 1.0);
        for (value, range) in start.iter() {
            let expected = from.get(value).unwrap();
            assert!((range.start - expected.start).abs() < EPS);
            assert!((range.end - expected.end).abs() < EPS);
        }
        for (value, range) in end.iter() {
            let expected = to.get(value).unwrap();
            assert!((range.start - expected.start).abs() < EPS);
            assert!((range.end - expected.end).abs() < EPS);
        }
        assert!(start.get("c").is_none());
    }

    #[test]
    fn test_blend_stays_monotonic() {
        let from = SliceLayout::equal_partition(&named(&["a", "b", "c", "d", "e"]));
        let to = SliceLayout::equal_partition(&named(&["a", "c", "d", "e"]));
        for step in 0..=20 {
            let blended = SliceLayout::blend(&from, &to, step as f64 / 20.0);
            let ranges: Vec<AngleRange> = blended.iter().map(|(_, r)| r).collect();
            for pair in ranges.windows(2) {
                assert!(pair[0].start < pair[1].start);
                assert!(pair[0].end <= pair[1].start + EPS);
            }
        }
    }

    #[test]
    fn test_added_key_uses_target_range() {
        let from = SliceLayout::equal_partition(&named(&["a", "b"]));
        let to = SliceLayout::equal_partition(&named(&["a", "b", "c"]));
        let blended = SliceLayout::blend(&from, &to, 0.3);
        assert_eq!(blended.get("c"), to.get("c"));
    }

    #[test]
    fn test_should_reflow() {
        assert!(should_reflow(5, 4));
        assert!(should_reflow(2, 3));
        assert!(!should_reflow(4, 4));
        assert!(!should_reflow(2, 1));
        assert!(!should_reflow(1, 2));
        assert!(!should_reflow(0, 3));
    }

    #[test]
    fn test_contains_handles_winding() {
        let range = AngleRange::new(0.5, 1.0);
        assert!(range.contains(0.75));
        assert!(range.contains(0.75 + 3.0 * TAU));
        assert!(range.contains(0.75 - TAU));
        assert!(!range.contains(1.0));
        assert!((normalize_angle(-0.25) - (TAU - 0.25)).abs() < EPS);
    }
}

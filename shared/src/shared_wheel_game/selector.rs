use rand::Rng;
use validator::ValidationError;

use super::Item;
use crate::validation::validate_items;

/// Picks an index with probability proportional to its item's weight.
///
/// Zero-weight items are skipped during the walk, so they can never win even
/// when the draw lands exactly on zero. If rounding leaves the remainder above
/// zero after the walk, the last item with a positive weight is returned.
pub fn pick_index<R: Rng + ?Sized>(items: &[Item], rng: &mut R) -> Result<usize, ValidationError> {
    let total = validate_items(items)?;
    let mut remaining = rng.gen_range(0.0..total);

    for (index, item) in items.iter().enumerate() {
        if item.weight <= 0.0 {
            continue;
        }
        remaining -= item.weight;
        if remaining <= 0.0 {
            return Ok(index);
        }
    }

    // Rounding fallback: the last item, unless trailing items have zero
    // weight, in which case the last one that can win. Keep it that way.
    // validate_items guarantees a positive weight somewhere.
    Ok(items.iter().rposition(|item| item.weight > 0.0).unwrap_or(items.len() - 1))
}

pub fn pick<'a, R: Rng + ?Sized>(items: &'a [Item], rng: &mut R) -> Result<&'a Item, ValidationError> {
    pick_index(items, rng).map(|index| &items[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_returns_member() {
        let mut rng = StdRng::seed_from_u64(7);
        let items = vec![Item::new("a", 0.5), Item::new("b", 2.0), Item::new("c", 1.25)];
        for _ in 0..500 {
            let picked = pick(&items, &mut rng).unwrap();
            assert!(items.contains(picked));
        }
    }

    #[test]
    fn test_weights_drive_frequency() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = vec![Item::new("a", 1.0), Item::new("b", 3.0)];
        let draws = 20_000;
        let hits = (0..draws)
            .filter(|_| pick(&items, &mut rng).unwrap().value == "b")
            .count();
        let frequency = hits as f64 / draws as f64;
        assert!((frequency - 0.75).abs() < 0.02, "frequency was {}", frequency);
    }

    #[test]
    fn test_zero_weight_never_wins() {
        let mut rng = StdRng::seed_from_u64(3);
        let items = vec![Item::new("a", 0.0), Item::new("b", 0.0), Item::new("c", 100.0)];
        for _ in 0..1_000 {
            assert_eq!(pick_index(&items, &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_trailing_zero_weight_is_not_the_fallback() {
        let mut rng = StdRng::seed_from_u64(11);
        let items = vec![Item::new("a", 0.1), Item::new("b", 0.2), Item::new("c", 0.0)];
        for _ in 0..1_000 {
            assert_ne!(pick_index(&items, &mut rng).unwrap(), 2);
        }
    }

    /// Always draws the largest value, pushing `r` to the top of the range.
    struct TopDraw;

    impl rand::RngCore for TopDraw {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0xff);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_top_draw_falls_back_to_last_winnable_item() {
        let items = vec![Item::new("a", 0.1), Item::new("b", 0.2), Item::new("c", 0.3)];
        assert_eq!(pick_index(&items, &mut TopDraw).unwrap(), 2);

        // A zero-weight tail is never the fallback
        let items = vec![Item::new("a", 0.1), Item::new("b", 0.2), Item::new("c", 0.0), Item::new("d", 0.0)];
        assert_eq!(pick_index(&items, &mut TopDraw).unwrap(), 1);
    }

    #[test]
    fn test_invalid_lists_are_refused() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick(&[], &mut rng).unwrap_err().code, "empty_item_list");
        let zero = vec![Item::new("a", 0.0)];
        assert_eq!(pick(&zero, &mut rng).unwrap_err().code, "zero_total_weight");
    }
}

use std::borrow::Cow;
use std::collections::HashSet;

use validator::ValidationError;

use crate::constants::*;
use crate::shared_wheel_game::Item;

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn item_rule(code: &'static str, message: &'static str, index: usize, item: &Item) -> ValidationError {
    let mut err = rule(code, message);
    err.add_param(Cow::Borrowed("index"), &index);
    err.add_param(Cow::Borrowed("value"), &item.value);
    err
}

pub fn validate_weight(index: usize, item: &Item) -> Result<(), ValidationError> {
    if !item.weight.is_finite() {
        return Err(item_rule("non_finite_weight", NON_FINITE_WEIGHT_ERROR, index, item));
    }
    if item.weight < 0.0 {
        return Err(item_rule("negative_weight", NEGATIVE_WEIGHT_ERROR, index, item));
    }
    Ok(())
}

/// Checks every rule an item list must satisfy before a spin and returns the
/// total weight.
pub fn validate_items(items: &[Item]) -> Result<f64, ValidationError> {
    if items.is_empty() {
        return Err(rule("empty_item_list", EMPTY_ITEMS_ERROR));
    }

    let mut seen = HashSet::with_capacity(items.len());
    let mut total = 0.0;
    for (index, item) in items.iter().enumerate() {
        validate_weight(index, item)?;
        if !seen.insert(item.value.as_str()) {
            return Err(item_rule("duplicate_value", DUPLICATE_VALUE_ERROR, index, item));
        }
        total += item.weight;
    }

    // Large finite weights can still overflow the sum.
    if !total.is_finite() {
        return Err(rule("non_finite_weight", NON_FINITE_WEIGHT_ERROR));
    }
    if total <= 0.0 {
        return Err(rule("zero_total_weight", ZERO_TOTAL_WEIGHT_ERROR));
    }
    Ok(total)
}

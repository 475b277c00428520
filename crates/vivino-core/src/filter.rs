//! Post-run numeric filtering of accumulated wine records.
//!
//! Each set bound removes records that fail it; nothing is reordered or
//! modified. The treatment of absent values is deliberately asymmetric:
//!
//! - a `min_*` bound drops a record whose field is absent,
//! - a `max_*` bound keeps a record whose field is absent.
//!
//! `FilterBounds::include_unpriced` relaxes only the `min_price` case.
//! Rating counts are never absent; a missing count reads as `0`.

use crate::search::FilterBounds;
use crate::wine::WineRecord;

/// Retains only the records that satisfy every set bound, preserving order.
#[must_use]
pub fn apply_filters(records: Vec<WineRecord>, bounds: &FilterBounds) -> Vec<WineRecord> {
    if bounds.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| passes(record, bounds))
        .collect()
}

/// Returns `true` if `record` satisfies every bound set in `bounds`.
#[must_use]
pub fn passes(record: &WineRecord, bounds: &FilterBounds) -> bool {
    let price_ok = if bounds.include_unpriced && record.price.is_none() {
        true
    } else {
        meets_min(record.price, bounds.min_price)
    };

    price_ok
        && meets_max(record.price, bounds.max_price)
        && meets_min(Some(record.ratings_f64()), bounds.min_ratings)
        && meets_max(Some(record.ratings_f64()), bounds.max_ratings)
        && meets_min(record.average_rating, bounds.min_average)
        && meets_max(record.average_rating, bounds.max_average)
}

fn meets_min(value: Option<f64>, min: Option<f64>) -> bool {
    match (min, value) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(min), Some(v)) => v >= min,
    }
}

fn meets_max(value: Option<f64>, max: Option<f64>) -> bool {
    match (max, value) {
        (Some(max), Some(v)) => v <= max,
        _ => true,
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::storage::entities::TimeSeriesDocument;

/// Words written on each recorded day, in chronological order.
pub type DailyDeltas = BTreeMap<NaiveDate, i64>;

/// Calculates the words actually written each day.
///
/// The first entry of a document is the baseline and is always worth 0 words. Later entries use
/// their stored delta when it's present and not negative. Entries written by older versions have
/// no delta, so it's derived from the previous total instead and never allowed to drop below 0.
/// Stored deltas themselves can be negative, this clamping only happens here.
pub fn compute_daily_deltas(document: &TimeSeriesDocument) -> DailyDeltas {
    let mut deltas = DailyDeltas::new();
    let mut previous_total = None;

    for (date, entry) in document.iter() {
        let delta = match (previous_total, entry.delta) {
            (None, _) => 0,
            (Some(_), Some(stored)) if stored >= 0 => stored,
            (Some(previous), _) => (entry.total as i64 - previous as i64).max(0),
        };
        deltas.insert(date, delta);
        previous_total = Some(entry.total);
    }

    deltas
}

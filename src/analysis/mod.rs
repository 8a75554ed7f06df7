//! Turns a [TimeSeriesDocument] into writing statistics. Everything here is read only, the
//! document is never modified.

pub mod deltas;
pub mod period;

use chrono::NaiveDate;
use deltas::compute_daily_deltas;
use period::{top_days, DateRange, PeriodReport};

use crate::storage::entities::TimeSeriesDocument;

pub const DEFAULT_TOP_DAYS: usize = 5;

/// All statistics shown by the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsReport {
    pub today: NaiveDate,
    /// `None` if nothing was recorded for today.
    pub today_words: Option<i64>,
    pub week: PeriodReport,
    pub past_30_days: PeriodReport,
    pub year_to_date: PeriodReport,
    pub past_365_days: PeriodReport,
    pub top_days: Vec<(NaiveDate, i64)>,
}

pub fn build_report(
    document: &TimeSeriesDocument,
    today: NaiveDate,
    top_limit: usize,
) -> StatsReport {
    let deltas = compute_daily_deltas(document);

    let week = DateRange::current_week(today);
    let past_30_days = DateRange::trailing(today, 30);
    let year_to_date = DateRange::year_to_date(today);
    let past_365_days = DateRange::trailing(today, 365);

    StatsReport {
        today,
        today_words: deltas.get(&today).copied(),
        week: PeriodReport::new(&deltas, week, week.days().min(7)),
        past_30_days: PeriodReport::new(&deltas, past_30_days, 30),
        year_to_date: PeriodReport::new(&deltas, year_to_date, year_to_date.days()),
        past_365_days: PeriodReport::new(&deltas, past_365_days, 365),
        top_days: top_days(&deltas, top_limit),
    }
}

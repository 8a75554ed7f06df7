use chrono::{Datelike, Days, NaiveDate};

use super::deltas::DailyDeltas;

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Monday through Sunday of the week containing `today`. Days after `today` are cut off.
    pub fn current_week(today: NaiveDate) -> Self {
        let monday = today - Days::new(today.weekday().num_days_from_monday() as u64);
        let sunday = monday + Days::new(6);
        Self::new(monday, sunday.min(today))
    }

    /// The last `days` days, `today` included.
    pub fn trailing(today: NaiveDate, days: u64) -> Self {
        Self::new(today - Days::new(days.saturating_sub(1)), today)
    }

    /// January 1st of the current year up to `today`.
    pub fn year_to_date(today: NaiveDate) -> Self {
        Self::new(today.with_ordinal(1).unwrap_or(today), today)
    }

    /// Number of days in the range, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodSummary {
    pub total: i64,
    /// Days with a positive amount of words.
    pub days_with_writing: u32,
}

/// Sums deltas of every day inside `range`.
pub fn summarize_period(deltas: &DailyDeltas, range: DateRange) -> PeriodSummary {
    if range.start > range.end {
        return PeriodSummary::default();
    }

    deltas
        .range(range.start..=range.end)
        .fold(PeriodSummary::default(), |mut summary, (_, delta)| {
            summary.total += delta;
            if *delta > 0 {
                summary.days_with_writing += 1;
            }
            summary
        })
}

/// Returns at most `limit` days with the most words written. Days with equal amounts are ordered
/// from the most recent one.
pub fn top_days(deltas: &DailyDeltas, limit: usize) -> Vec<(NaiveDate, i64)> {
    let mut days = deltas
        .iter()
        .filter(|(_, words)| **words > 0)
        .map(|(date, words)| (*date, *words))
        .collect::<Vec<_>>();
    days.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    days.truncate(limit);
    days
}

/// Summary of a period together with the number of days used for averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodReport {
    pub range: DateRange,
    pub summary: PeriodSummary,
    pub day_count: i64,
}

impl PeriodReport {
    pub fn new(deltas: &DailyDeltas, range: DateRange, day_count: i64) -> Self {
        Self {
            range,
            summary: summarize_period(deltas, range),
            day_count,
        }
    }

    /// Daily average over the whole period, only present if anything was written.
    pub fn average(&self) -> Option<i64> {
        if self.summary.days_with_writing == 0 || self.day_count <= 0 {
            return None;
        }
        Some(self.summary.total / self.day_count)
    }
}

//! Renders [StatsReport] for the terminal. Nothing is calculated here.

use std::fmt::{self, Write};

use crate::{
    analysis::{period::PeriodReport, StatsReport},
    storage::entities::Scope,
    utils::time::{date_to_key, long_date, short_date},
};

pub fn render_report(report: &StatsReport, scope: &Scope) -> String {
    let mut out = String::new();
    write_report(&mut out, report, scope).expect("Writing into a String should never fail");
    out
}

pub fn write_report(out: &mut impl Write, report: &StatsReport, scope: &Scope) -> fmt::Result {
    match scope {
        Scope::Global => write!(out, "\n=== Writing Statistics ===\n\n")?,
        Scope::Series(name) => write!(out, "\n=== Writing Statistics: {name} ===\n\n")?,
    }

    writeln!(out, "Today ({}):", date_to_key(report.today))?;
    match report.today_words {
        Some(words) => writeln!(out, "  Words written: {words}\n")?,
        None => writeln!(out, "  No words written yet\n")?,
    }

    let week = report.week.range;
    write_period(
        out,
        &format!(
            "This Week ({} {} to {} {})",
            week.start.format("%a"),
            short_date(week.start),
            week.end.format("%a"),
            short_date(week.end)
        ),
        &report.week,
    )?;
    write_period(out, "Past 30 Days", &report.past_30_days)?;
    write_period(
        out,
        &format!("Year to Date ({})", report.year_to_date.range.start.format("%Y")),
        &report.year_to_date,
    )?;
    write_period(out, "Past 365 Days", &report.past_365_days)?;

    writeln!(out, "Most Productive Days:")?;
    if report.top_days.is_empty() {
        writeln!(out, "  No writing days recorded yet")?;
    }
    for (index, (date, words)) in report.top_days.iter().enumerate() {
        writeln!(out, "  {}. {}: {words} words", index + 1, long_date(*date))?;
    }
    Ok(())
}

fn write_period(out: &mut impl Write, label: &str, period: &PeriodReport) -> fmt::Result {
    writeln!(out, "{label}:")?;
    writeln!(out, "  Total words: {}", period.summary.total)?;
    writeln!(
        out,
        "  Days with writing: {}/{}",
        period.summary.days_with_writing, period.day_count
    )?;
    if let Some(average) = period.average() {
        writeln!(out, "  Daily average: {average} words")?;
    }
    writeln!(out)
}

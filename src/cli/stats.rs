use anyhow::{Context, Result};
use tracing::info;

use crate::{
    analysis::build_report,
    storage::{entities::Scope, stats_storage::StatsStorage},
    utils::clock::Clock,
};

use super::output::render_report;

/// Command to process `--stats`. Prints a summary of the writing progress of `scope`.
pub fn process_stats_command(
    storage: &impl StatsStorage,
    scope: &Scope,
    clock: &dyn Clock,
    top_days: usize,
) -> Result<()> {
    print!("{}", stats_report(storage, scope, clock, top_days)?);
    Ok(())
}

pub fn stats_report(
    storage: &impl StatsStorage,
    scope: &Scope,
    clock: &dyn Clock,
    top_days: usize,
) -> Result<String> {
    let document = storage
        .load(scope)
        .with_context(|| format!("Error loading {scope} stats"))?;
    let today = clock.today();
    info!("Building {scope} report for {today} from {} entries", document.len());

    let report = build_report(&document, today, top_days);
    Ok(render_report(&report, scope))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::{
        error::StatsError,
        storage::{
            entities::{ProjectCounts, Scope},
            stats_storage::{StatsStorage, StatsStorageImpl},
        },
        utils::clock::MockClock,
    };

    use super::stats_report;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock_on(today: NaiveDate) -> MockClock {
        let mut clock = MockClock::new();
        clock.expect_today().return_const(today);
        clock
    }

    #[test]
    fn test_report_requires_a_scan() -> Result<()> {
        let dir = tempdir()?;
        let storage = StatsStorageImpl::new(dir.path().to_owned())?;

        let error = stats_report(&storage, &Scope::Global, &MockClock::new(), 5).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<StatsError>(),
            Some(StatsError::NotFound { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_corrupt_stats_are_fatal_for_reports() -> Result<()> {
        let dir = tempdir()?;
        let storage = StatsStorageImpl::new(dir.path().to_owned())?;
        fs::write(storage.document_path(&Scope::Global), "- not\n- a map\n")?;

        let error = stats_report(&storage, &Scope::Global, &MockClock::new(), 5).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<StatsError>(),
            Some(StatsError::Parse { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_report_uses_clock() -> Result<()> {
        let dir = tempdir()?;
        let storage = StatsStorageImpl::new(dir.path().to_owned())?;
        let novel = |count| ProjectCounts::from([("novel".to_string(), count)]);
        storage.write(&Scope::Global, &novel(100), date(2024, 6, 3))?;
        storage.write(&Scope::Global, &novel(250), date(2024, 6, 4))?;

        let text = stats_report(&storage, &Scope::Global, &clock_on(date(2024, 6, 4)), 5)?;

        assert!(text.contains("Today (2024-06-04):\n  Words written: 150\n"));
        assert!(text.contains("  1. Jun 4, 2024: 150 words\n"));
        Ok(())
    }

    #[test]
    fn test_series_report_without_document() -> Result<()> {
        let dir = tempdir()?;
        let storage = StatsStorageImpl::new(dir.path().to_owned())?;

        let text = stats_report(
            &storage,
            &Scope::Series("Saga".into()),
            &clock_on(date(2024, 6, 4)),
            5,
        )?;

        assert!(text.contains("No writing days recorded yet"));
        Ok(())
    }
}

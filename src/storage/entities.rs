use std::{
    collections::{btree_map, BTreeMap},
    fmt::Display,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Word counts of every project on a certain day.
pub type ProjectCounts = BTreeMap<String, u64>;

/// Snapshot of a scope for a single calendar day. `total` is stored redundantly so reports don't
/// have to walk every project.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone, Default)]
pub struct DayEntry {
    #[serde(default)]
    pub projects: ProjectCounts,
    #[serde(default)]
    pub total: u64,
    /// Words written since the previous entry. Missing on entries recorded by older versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<i64>,
}

impl DayEntry {
    pub fn new(projects: ProjectCounts, delta: i64) -> Self {
        let total = sum_counts(&projects);
        Self {
            projects,
            total,
            delta: Some(delta),
        }
    }

    /// Whether the entry describes exactly the same project counts.
    pub fn same_counts(&self, projects: &ProjectCounts, total: u64) -> bool {
        self.total == total && self.projects == *projects
    }
}

pub fn sum_counts(projects: &ProjectCounts) -> u64 {
    projects.values().sum()
}

/// Date indexed series of [DayEntry] for one scope. Keys are kept sorted, so iteration always
/// happens in chronological order.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct TimeSeriesDocument {
    entries: BTreeMap<NaiveDate, DayEntry>,
}

impl TimeSeriesDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayEntry> {
        self.entries.get(&date)
    }

    /// Inserts an entry, replacing the one previously stored for the same day.
    pub fn upsert(&mut self, date: NaiveDate, entry: DayEntry) -> Option<DayEntry> {
        self.entries.insert(date, entry)
    }

    pub fn most_recent(&self) -> Option<(NaiveDate, &DayEntry)> {
        self.entries.last_key_value().map(|(k, v)| (*k, v))
    }

    /// Latest entry recorded strictly before `date`.
    pub fn latest_before(&self, date: NaiveDate) -> Option<(NaiveDate, &DayEntry)> {
        self.entries.range(..date).next_back().map(|(k, v)| (*k, v))
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NaiveDate, &DayEntry)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(NaiveDate, DayEntry)> for TimeSeriesDocument {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, DayEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TimeSeriesDocument {
    type Item = (NaiveDate, DayEntry);
    type IntoIter = btree_map::IntoIter<NaiveDate, DayEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Which document a write or a read is aimed at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    Global,
    Series(String),
}

impl Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Series(name) => write!(f, "series {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;

    use super::{DayEntry, ProjectCounts, TimeSeriesDocument};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_document_yaml_roundtrip() -> Result<()> {
        let document: TimeSeriesDocument = [
            (
                date(2024, 1, 1),
                DayEntry::new(ProjectCounts::from([("novel".into(), 100)]), 0),
            ),
            (
                date(2024, 1, 2),
                DayEntry::new(
                    ProjectCounts::from([("novel".into(), 150), ("short-story".into(), 30)]),
                    80,
                ),
            ),
        ]
        .into_iter()
        .collect();

        let text = serde_yaml::to_string(&document)?;
        let parsed: TimeSeriesDocument = serde_yaml::from_str(&text)?;

        assert_eq!(parsed, document);
        assert_eq!(parsed.get(date(2024, 1, 2)).unwrap().total, 180);
        Ok(())
    }

    #[test]
    fn test_document_reads_legacy_entries() -> Result<()> {
        let text = "\
2024-01-02:
  projects:
    novel: 120
  total: 120
2024-01-01:
  projects:
    novel: 50
  total: 50
";
        let parsed: TimeSeriesDocument = serde_yaml::from_str(text)?;
        let dates = parsed.iter().map(|(d, _)| d).collect::<Vec<_>>();

        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 2)]);
        assert!(parsed.iter().all(|(_, entry)| entry.delta.is_none()));
        Ok(())
    }

    #[test]
    fn test_latest_before_skips_same_day() {
        let document: TimeSeriesDocument = [
            (date(2024, 1, 1), DayEntry::new(ProjectCounts::new(), 0)),
            (date(2024, 1, 3), DayEntry::new(ProjectCounts::new(), 0)),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            document.latest_before(date(2024, 1, 3)).map(|v| v.0),
            Some(date(2024, 1, 1))
        );
        assert_eq!(document.latest_before(date(2024, 1, 1)), None);
        assert_eq!(document.most_recent().map(|v| v.0), Some(date(2024, 1, 3)));
    }
}

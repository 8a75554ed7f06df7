//!  Storage is organized through [stats_storage::StatsStorageImpl].
//!  The basic idea is:
//!   - There is a data directory with one YAML document for all projects.
//!   - Every series additionally gets its own document in the `series` subdirectory.
//!   - Documents map a day to the word counts of that day and are rewritten as a whole.

pub mod entities;
pub mod migration;
pub mod stats_storage;

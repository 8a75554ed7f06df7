//! Simple word counter for writers. Projects are folders marked with a `.verkount` file, their
//! markdown is counted on every scan and the counts are stored per day, so that writing progress
//! can be summarized later.
//!

pub mod analysis;
pub mod cli;
pub mod collection;
pub mod error;
pub mod storage;
pub mod utils;

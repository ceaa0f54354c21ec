//! Memory-pressure generator: acquire, fill, hold, release.

pub mod cli;
pub mod fill;
pub mod meminfo;
pub mod region;
pub mod sys;
pub mod units;

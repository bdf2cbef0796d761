//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Stats reporter: logs a cache statistics snapshot at configured intervals

mod stats_reporter;

pub use stats_reporter::spawn_stats_reporter;

// Presentation: turns service results into terminal output.

#[cfg(feature = "cli")]
pub mod commands;
pub mod report;

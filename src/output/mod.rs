//! Report types and formatters

pub mod formatter;
pub mod report;

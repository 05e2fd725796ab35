//! Quiz-funnel scoring core: answer aggregation, school compatibility scoring,
//! and mentor matching for the two-school orientation funnel.

pub mod config;
pub mod error;
pub mod funnel;
pub mod telemetry;

// trustcheck: Account trust assessments for X
//
// This is the library root. Each module corresponds to a major subsystem
// of the assessment bot.

pub mod config;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod trust;
pub mod x;

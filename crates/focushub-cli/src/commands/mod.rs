pub mod breakdown;
pub mod config;
pub mod habit;
pub mod med;
pub mod plan;
pub mod task;
pub mod timer;

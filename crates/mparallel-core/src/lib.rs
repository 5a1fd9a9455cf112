pub mod config;
pub mod error;
pub mod job;
pub mod logging;
pub mod runner;
pub mod scheduler;

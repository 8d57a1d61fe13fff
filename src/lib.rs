pub mod cli;
pub mod collector;
pub mod commands;
pub mod config;
pub mod logging;
pub mod output;

pub use collector::{Record, ReplayMode, SimpleLogCollector};
pub use output::{Output, Source};

mod config;
mod error;
mod prober;
pub mod report;
mod runner;
pub mod suite;
#[cfg(test)]
mod tests;
mod types;

pub use config::{Config, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use prober::Prober;
pub use report::Reporter;
pub use runner::Runner;
pub use suite::Suite;
pub use types::*;

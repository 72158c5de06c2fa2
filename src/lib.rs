//! probestat - DNS and ping reachability of random network identifiers.
//!
//! Probes a batch of random IPv4 addresses and random dictionary words.
//! Each word is tried as `word.com`, `word.edu` and `word.org`. For
//! every target the crate records whether a DNS lookup succeeded and
//! whether an ICMP echo was answered, then reports the fraction of each
//! set that resolved, answered, or did either.
//!
//! # Library Usage
//!
//! ```ignore
//! use probestat::{probe, ProbeConfig, SystemBackend};
//! use std::sync::Arc;
//!
//! let config = ProbeConfig::default();
//! let targets = probe::generator::random_targets(&mut rand::rng(), &config)?;
//! let backend = Arc::new(SystemBackend::new(&config)?);
//! let report = probe::run_batch(backend, targets, &config).await;
//! println!("{}", report.ip_summary.percent_either());
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Probe 20 addresses and 20 words, print the table, wait for a key
//! probestat
//!
//! # JSON report, no pause
//! probestat --format json --no-pause
//! ```
//!
//! Sending ICMP echoes needs raw-socket rights or an unprivileged ICMP
//! socket allowance. Without them every ping reports `false`.

pub mod cli;
pub mod config;
pub mod error;
pub mod pause;
pub mod probe;
pub mod report;

// Re-export commonly used types
pub use cli::{Cli, OutputFormat};
pub use config::ProbeConfig;
pub use error::{Error, Result};
pub use probe::{
    BatchReport, ProbeBackend, ProbeOutcome, ProbeTarget, ResultSet, ResultSummary, SystemBackend,
};

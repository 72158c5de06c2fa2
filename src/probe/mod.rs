//! Probe module.
//!
//! This module provides:
//! - Random target generation
//! - DNS and ICMP probing of a single target
//! - Concurrent batch probing
//! - Result sets and their summary ratios

pub mod generator;
pub mod prober;
pub mod runner;
pub mod types;

pub use prober::{probe_target, ProbeBackend, Resolved, SystemBackend};
pub use runner::{run_batch, BatchReport};
pub use types::*;

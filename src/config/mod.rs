//! Configuration module.
//!
//! Probe settings are fixed constants. This module gathers them in one
//! place so the binary, the probe backend and the tests agree on them.

pub mod settings;

pub use settings::ProbeConfig;

//! Probe settings.

use crate::error::{Error, Result};
use serde::Serialize;
use std::time::Duration;

/// Number of random IPv4 addresses probed per run.
pub const DEFAULT_IP_COUNT: usize = 20;

/// Number of dictionary words probed per run.
pub const DEFAULT_WORD_COUNT: usize = 20;

/// Timeout for the single ICMP echo, in milliseconds.
pub const DEFAULT_PING_TIMEOUT_MS: u64 = 120;

/// ICMP echo payload size in bytes.
pub const DEFAULT_PAYLOAD_SIZE: usize = 32;

/// Top-level domains appended to a word, in probing order.
pub const CANDIDATE_SUFFIXES: [&str; 3] = ["com", "edu", "org"];

/// Settings for one probing run.
///
/// `Default` yields the fixed values the binary uses. The `with_*`
/// setters exist for tests and library callers.
///
/// # Example
///
/// ```ignore
/// let config = ProbeConfig::default().with_max_concurrent(Some(8));
/// config.validate()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeConfig {
    /// Random IPv4 targets to generate
    pub ip_count: usize,
    /// Dictionary word targets to pick
    pub word_count: usize,
    /// Per-echo timeout
    #[serde(serialize_with = "serialize_millis")]
    pub ping_timeout: Duration,
    /// ICMP echo payload
    #[serde(skip)]
    pub payload: Vec<u8>,
    /// Cap on simultaneously running probes; `None` is unbounded
    pub max_concurrent: Option<usize>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ip_count: DEFAULT_IP_COUNT,
            word_count: DEFAULT_WORD_COUNT,
            ping_timeout: Duration::from_millis(DEFAULT_PING_TIMEOUT_MS),
            payload: vec![b'a'; DEFAULT_PAYLOAD_SIZE],
            max_concurrent: None,
        }
    }
}

impl ProbeConfig {
    /// Override the number of IPv4 and word targets.
    #[must_use]
    pub fn with_counts(mut self, ip_count: usize, word_count: usize) -> Self {
        self.ip_count = ip_count;
        self.word_count = word_count;
        self
    }

    /// Override the per-echo timeout.
    #[must_use]
    pub fn with_ping_timeout(mut self, timeout: Duration) -> Self {
        self.ping_timeout = timeout;
        self
    }

    /// Bound the number of probes in flight.
    #[must_use]
    pub fn with_max_concurrent(mut self, limit: Option<usize>) -> Self {
        self.max_concurrent = limit;
        self
    }

    /// Check the settings for values that cannot produce a run.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for a zero timeout or a zero concurrency
    /// cap, and `Error::InvalidCount` when more words are requested than
    /// the dictionary holds.
    pub fn validate(&self) -> Result<()> {
        if self.ping_timeout.is_zero() {
            return Err(Error::config("ping timeout must be greater than zero"));
        }
        if self.max_concurrent == Some(0) {
            return Err(Error::config("max_concurrent must be at least 1"));
        }
        let available = crate::probe::generator::DICTIONARY.len();
        if self.word_count > available {
            return Err(Error::InvalidCount {
                requested: self.word_count,
                available,
            });
        }
        Ok(())
    }
}

fn serialize_millis<S: serde::Serializer>(
    d: &Duration,
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProbeConfig::default();
        assert_eq!(config.ip_count, 20);
        assert_eq!(config.word_count, 20);
        assert_eq!(config.ping_timeout, Duration::from_millis(120));
        assert_eq!(config.payload.len(), 32);
        assert!(config.payload.iter().all(|b| *b == b'a'));
        assert!(config.max_concurrent.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_word_count() {
        let config = ProbeConfig::default().with_counts(20, 41);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidCount {
                requested: 41,
                available: 40
            })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = ProbeConfig::default().with_ping_timeout(Duration::ZERO);
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = ProbeConfig::default().with_max_concurrent(Some(0));
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_serialize_timeout_as_millis() {
        let json = serde_json::to_value(ProbeConfig::default()).unwrap();
        assert_eq!(json["ping_timeout"], 120);
        assert!(json.get("payload").is_none());
    }
}

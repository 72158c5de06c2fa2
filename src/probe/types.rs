//! Probe types and data structures.
//!
//! This module provides the targets that get probed, the per-target
//! outcome, and the result sets the summary ratios are computed over.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;

use crate::config::settings::CANDIDATE_SUFFIXES;

/// Kind of a probe target.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Raw IPv4 address
    Ip,
    /// Dictionary word, probed through candidate hostnames
    Word,
}

/// Something to probe: an IPv4 address or a word.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ProbeTarget {
    /// Address probed with a reverse lookup and a direct ping
    Ip(Ipv4Addr),
    /// Word probed through `word.com`, `word.edu` and `word.org`
    Word(String),
}

impl ProbeTarget {
    /// Create a word target.
    pub fn word(word: impl Into<String>) -> Self {
        Self::Word(word.into())
    }

    /// Which result set this target belongs to.
    #[must_use]
    pub fn kind(&self) -> TargetKind {
        match self {
            Self::Ip(_) => TargetKind::Ip,
            Self::Word(_) => TargetKind::Word,
        }
    }

    /// Candidate hostnames for a word target, in probing order.
    ///
    /// IP targets have no candidates.
    #[must_use]
    pub fn candidates(&self) -> Vec<String> {
        match self {
            Self::Ip(_) => Vec::new(),
            Self::Word(word) => CANDIDATE_SUFFIXES
                .iter()
                .map(|tld| format!("{word}.{tld}"))
                .collect(),
        }
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip(ip) => write!(f, "{ip}"),
            Self::Word(word) => f.write_str(word),
        }
    }
}

/// Result of probing a single target.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// The target that was probed
    pub target: ProbeTarget,
    /// Resolved hostname, present iff a DNS lookup succeeded
    pub hostname: Option<String>,
    /// Whether an ICMP echo was answered
    pub can_ping: bool,
    /// Candidate hostname that answered the echo (word targets only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinged_host: Option<String>,
}

impl ProbeOutcome {
    /// Create an outcome.
    #[must_use]
    pub fn new(target: ProbeTarget, hostname: Option<String>, can_ping: bool) -> Self {
        Self {
            target,
            hostname,
            can_ping,
            pinged_host: None,
        }
    }

    /// Outcome for a target where nothing succeeded.
    #[must_use]
    pub fn unreachable(target: ProbeTarget) -> Self {
        Self::new(target, None, false)
    }

    /// Whether DNS resolution succeeded.
    #[must_use]
    pub fn has_dns(&self) -> bool {
        self.hostname.is_some()
    }

    /// Whether the target answered a ping.
    #[must_use]
    pub fn can_ping(&self) -> bool {
        self.can_ping
    }

    /// Address or word this outcome is about.
    #[must_use]
    pub fn label(&self) -> String {
        self.target.to_string()
    }
}

/// Outcomes for targets of a single kind.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSet {
    kind: TargetKind,
    outcomes: Vec<ProbeOutcome>,
}

impl ResultSet {
    /// Create an empty result set.
    #[must_use]
    pub fn new(kind: TargetKind) -> Self {
        Self {
            kind,
            outcomes: Vec::new(),
        }
    }

    /// Split a mixed batch of outcomes into the IP set and the word set,
    /// keeping arrival order within each.
    #[must_use]
    pub fn partition(outcomes: impl IntoIterator<Item = ProbeOutcome>) -> (Self, Self) {
        let mut ips = Self::new(TargetKind::Ip);
        let mut words = Self::new(TargetKind::Word);
        for outcome in outcomes {
            match outcome.target.kind() {
                TargetKind::Ip => ips.outcomes.push(outcome),
                TargetKind::Word => words.outcomes.push(outcome),
            }
        }
        (ips, words)
    }

    /// Add an outcome. Returns it back if its kind does not match the set.
    ///
    /// # Errors
    ///
    /// Returns the outcome unchanged when its target kind differs from
    /// the set's kind.
    pub fn push(&mut self, outcome: ProbeOutcome) -> std::result::Result<(), ProbeOutcome> {
        if outcome.target.kind() == self.kind {
            self.outcomes.push(outcome);
            Ok(())
        } else {
            Err(outcome)
        }
    }

    /// Target kind held by this set.
    #[must_use]
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Number of outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Iterate over the outcomes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProbeOutcome> {
        self.outcomes.iter()
    }

    /// Count the outcomes into a summary.
    #[must_use]
    pub fn summary(&self) -> ResultSummary {
        let mut summary = ResultSummary::new();
        for outcome in &self.outcomes {
            summary.add_outcome(outcome);
        }
        summary
    }

    /// Fraction of outcomes with a resolved hostname.
    #[must_use]
    pub fn percent_with_dns(&self) -> f64 {
        self.summary().percent_with_dns()
    }

    /// Fraction of outcomes that answered a ping.
    #[must_use]
    pub fn percent_pingable(&self) -> f64 {
        self.summary().percent_pingable()
    }

    /// Fraction of outcomes that resolved or answered a ping.
    #[must_use]
    pub fn percent_either(&self) -> f64 {
        self.summary().percent_either()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ProbeOutcome;
    type IntoIter = std::slice::Iter<'a, ProbeOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Aggregated counts over a result set.
///
/// Ratios over an empty set are `0.0`; `is_defined` tells the two cases
/// apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultSummary {
    /// Number of outcomes
    pub total: usize,
    /// Outcomes with a resolved hostname
    pub with_dns: usize,
    /// Outcomes that answered a ping
    pub pingable: usize,
    /// Outcomes with either of the above
    pub either: usize,
}

impl ResultSummary {
    /// Create a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an outcome to the summary.
    pub fn add_outcome(&mut self, outcome: &ProbeOutcome) {
        self.total += 1;
        if outcome.has_dns() {
            self.with_dns += 1;
        }
        if outcome.can_ping() {
            self.pingable += 1;
        }
        if outcome.has_dns() || outcome.can_ping() {
            self.either += 1;
        }
    }

    /// Whether the ratios are backed by at least one outcome.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.total > 0
    }

    /// `with_dns / total`, or `0.0` for an empty set.
    #[must_use]
    pub fn percent_with_dns(&self) -> f64 {
        self.ratio(self.with_dns)
    }

    /// `pingable / total`, or `0.0` for an empty set.
    #[must_use]
    pub fn percent_pingable(&self) -> f64 {
        self.ratio(self.pingable)
    }

    /// `either / total`, or `0.0` for an empty set.
    #[must_use]
    pub fn percent_either(&self) -> f64 {
        self.ratio(self.either)
    }

    fn ratio(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }
}

impl Serialize for ResultSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResultSummary", 8)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("with_dns", &self.with_dns)?;
        state.serialize_field("pingable", &self.pingable)?;
        state.serialize_field("either", &self.either)?;
        state.serialize_field("defined", &self.is_defined())?;
        state.serialize_field("percent_with_dns", &self.percent_with_dns())?;
        state.serialize_field("percent_pingable", &self.percent_pingable())?;
        state.serialize_field("percent_either", &self.percent_either())?;
        state.end()
    }
}

//! DNS and ICMP probing of a single target.
//!
//! Lookups go through the system-configured resolver and echoes go
//! through an ICMP socket. Every failure is folded into an absent
//! hostname or `false`; nothing here returns an error once the backend
//! exists.

#![allow(clippy::missing_errors_doc)]

use crate::config::ProbeConfig;
use crate::error::{Error, Result};
use crate::probe::types::{ProbeOutcome, ProbeTarget};
use std::future::Future;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use surge_ping::{Client, Config, PingIdentifier, PingSequence};
use trust_dns_resolver::config::LookupIpStrategy;
use trust_dns_resolver::TokioAsyncResolver;

/// A successful forward lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Canonical name reported by the resolver
    pub hostname: String,
    /// First IPv4 address in the answer
    pub addr: Ipv4Addr,
}

/// Name resolution and echo primitives a probe is built from.
pub trait ProbeBackend: Send + Sync {
    /// Reverse (PTR) lookup. `None` on any failure.
    fn reverse_lookup(&self, ip: Ipv4Addr) -> impl Future<Output = Option<String>> + Send;

    /// Forward IPv4 lookup. `None` on any failure.
    fn forward_lookup(&self, host: &str) -> impl Future<Output = Option<Resolved>> + Send;

    /// Single ICMP echo. `true` iff a reply arrived before the timeout.
    fn ping(&self, addr: Ipv4Addr) -> impl Future<Output = bool> + Send;
}

/// Probe one target.
///
/// An IP target gets a reverse lookup and a ping. A word target resolves
/// its candidate hostnames in order and keeps the first name that
/// resolved, then pings the resolved candidates in the same order until
/// one answers. The resolving and the answering candidate may differ.
pub async fn probe_target<B>(backend: &B, target: ProbeTarget) -> ProbeOutcome
where
    B: ProbeBackend + ?Sized,
{
    match target {
        ProbeTarget::Ip(ip) => {
            tracing::info!("checking ip {ip}");
            let hostname = backend.reverse_lookup(ip).await;
            let can_ping = backend.ping(ip).await;
            ProbeOutcome::new(ProbeTarget::Ip(ip), hostname, can_ping)
        }
        ProbeTarget::Word(_) => {
            tracing::info!("checking word {target}");
            let mut resolved = Vec::new();
            for candidate in target.candidates() {
                let answer = backend.forward_lookup(&candidate).await;
                resolved.push((candidate, answer));
            }

            let hostname = resolved
                .iter()
                .find_map(|(_, answer)| answer.as_ref().map(|r| r.hostname.clone()));

            let mut pinged_host = None;
            for (candidate, answer) in &resolved {
                let Some(answer) = answer else { continue };
                if backend.ping(answer.addr).await {
                    pinged_host = Some(candidate.clone());
                    break;
                }
            }

            let mut outcome = ProbeOutcome::new(target, hostname, pinged_host.is_some());
            outcome.pinged_host = pinged_host;
            outcome
        }
    }
}

/// Backend using the operating system's resolver configuration and an
/// ICMP socket.
///
/// Opening the ICMP socket needs raw-socket rights (root or
/// `CAP_NET_RAW`) or an unprivileged ICMP socket allowance
/// (`net.ipv4.ping_group_range` on Linux). Without either, every ping
/// reports `false`.
pub struct SystemBackend {
    resolver: TokioAsyncResolver,
    client: Option<Client>,
    timeout: Duration,
    payload: Vec<u8>,
}

impl SystemBackend {
    /// Create a backend from the system resolver configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the system resolver configuration cannot be
    /// read. A missing ICMP socket is logged and tolerated.
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let (resolver_config, mut opts) = trust_dns_resolver::system_conf::read_system_conf()?;
        opts.ip_strategy = LookupIpStrategy::Ipv4Only;
        let resolver = TokioAsyncResolver::tokio(resolver_config, opts)?;

        let client = match icmp_client() {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("{e}; all pings will report false");
                None
            }
        };

        Ok(Self {
            resolver,
            client,
            timeout: config.ping_timeout,
            payload: config.payload.clone(),
        })
    }

    /// Whether an ICMP socket could be opened.
    #[must_use]
    pub fn icmp_available(&self) -> bool {
        self.client.is_some()
    }
}

impl ProbeBackend for SystemBackend {
    async fn reverse_lookup(&self, ip: Ipv4Addr) -> Option<String> {
        match self.resolver.reverse_lookup(IpAddr::V4(ip)).await {
            Ok(lookup) => lookup.iter().next().map(|name| trim_root(&name.to_utf8())),
            Err(e) => {
                tracing::debug!("reverse lookup failed for {ip}: {e}");
                None
            }
        }
    }

    async fn forward_lookup(&self, host: &str) -> Option<Resolved> {
        // Fully qualified, so resolv.conf search domains are not tried.
        let fqdn = format!("{}.", host.trim_end_matches('.'));
        let lookup = match self.resolver.lookup_ip(fqdn).await {
            Ok(lookup) => lookup,
            Err(e) => {
                tracing::debug!("lookup failed for {host}: {e}");
                return None;
            }
        };

        let addr = lookup.iter().find_map(|ip| match ip {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })?;

        // The address records sit at the end of any CNAME chain.
        let hostname = lookup
            .as_lookup()
            .record_iter()
            .last()
            .map(|record| trim_root(&record.name().to_utf8()))
            .unwrap_or_else(|| host.to_string());

        Some(Resolved { hostname, addr })
    }

    async fn ping(&self, addr: Ipv4Addr) -> bool {
        let Some(client) = &self.client else {
            return false;
        };

        let mut pinger = client
            .pinger(IpAddr::V4(addr), PingIdentifier(rand::random()))
            .await;
        pinger.timeout(self.timeout);

        match pinger.ping(PingSequence(0), &self.payload).await {
            Ok((_packet, rtt)) => {
                tracing::debug!("echo reply from {addr} in {rtt:?}");
                true
            }
            Err(e) => {
                tracing::debug!("ping {addr} failed: {e}");
                false
            }
        }
    }
}

fn icmp_client() -> Result<Client> {
    Client::new(&Config::default())
        .map_err(|e| Error::network(format!("cannot open ICMP socket: {e}")))
}

fn trim_root(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Backend answering from fixed tables and recording what was pinged.
    #[derive(Default)]
    struct TableBackend {
        ptr: HashMap<Ipv4Addr, String>,
        names: HashMap<String, Ipv4Addr>,
        alive: Vec<Ipv4Addr>,
        pinged: Mutex<Vec<Ipv4Addr>>,
    }

    impl ProbeBackend for TableBackend {
        async fn reverse_lookup(&self, ip: Ipv4Addr) -> Option<String> {
            self.ptr.get(&ip).cloned()
        }

        async fn forward_lookup(&self, host: &str) -> Option<Resolved> {
            self.names.get(host).map(|addr| Resolved {
                hostname: host.to_string(),
                addr: *addr,
            })
        }

        async fn ping(&self, addr: Ipv4Addr) -> bool {
            self.pinged.lock().unwrap().push(addr);
            self.alive.contains(&addr)
        }
    }

    #[tokio::test]
    async fn test_ip_target_records_both_probes() {
        let ip = Ipv4Addr::new(8, 8, 8, 8);
        let backend = TableBackend {
            ptr: HashMap::from([(ip, "dns.google".to_string())]),
            alive: vec![ip],
            ..Default::default()
        };

        let outcome = probe_target(&backend, ProbeTarget::Ip(ip)).await;
        assert_eq!(outcome.hostname.as_deref(), Some("dns.google"));
        assert!(outcome.can_ping());
        assert!(outcome.pinged_host.is_none());
    }

    #[tokio::test]
    async fn test_word_keeps_first_resolved_and_first_pingable() {
        let edu = Ipv4Addr::new(10, 0, 0, 2);
        let org = Ipv4Addr::new(10, 0, 0, 3);
        let backend = TableBackend {
            names: HashMap::from([
                ("rioter.edu".to_string(), edu),
                ("rioter.org".to_string(), org),
            ]),
            alive: vec![org],
            ..Default::default()
        };

        let outcome = probe_target(&backend, ProbeTarget::word("rioter")).await;
        assert_eq!(outcome.hostname.as_deref(), Some("rioter.edu"));
        assert!(outcome.can_ping());
        assert_eq!(outcome.pinged_host.as_deref(), Some("rioter.org"));
        assert_eq!(*backend.pinged.lock().unwrap(), vec![edu, org]);
    }

    #[tokio::test]
    async fn test_word_ping_stops_at_first_reply() {
        let com = Ipv4Addr::new(10, 0, 0, 1);
        let org = Ipv4Addr::new(10, 0, 0, 3);
        let backend = TableBackend {
            names: HashMap::from([
                ("bandbox.com".to_string(), com),
                ("bandbox.org".to_string(), org),
            ]),
            alive: vec![com, org],
            ..Default::default()
        };

        let outcome = probe_target(&backend, ProbeTarget::word("bandbox")).await;
        assert_eq!(outcome.pinged_host.as_deref(), Some("bandbox.com"));
        assert_eq!(*backend.pinged.lock().unwrap(), vec![com]);
    }

    #[tokio::test]
    async fn test_unresolvable_word_is_never_pinged() {
        let backend = TableBackend::default();
        let outcome = probe_target(&backend, ProbeTarget::word("blowth")).await;
        assert!(!outcome.has_dns());
        assert!(!outcome.can_ping());
        assert!(backend.pinged.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_system_backend_loopback_and_test_net() {
        // Needs a resolver config and ICMP socket rights, neither of which CI has
        if std::env::var("CI").is_ok() {
            return;
        }

        let backend = match SystemBackend::new(&ProbeConfig::default()) {
            Ok(backend) => backend,
            Err(_) => return,
        };
        if !backend.icmp_available() {
            return;
        }

        assert!(backend.ping(Ipv4Addr::LOCALHOST).await);

        // TEST-NET-1 is never routed and has no PTR record
        let outcome = probe_target(&backend, ProbeTarget::Ip(Ipv4Addr::new(192, 0, 2, 1))).await;
        assert!(!outcome.has_dns());
        assert!(!outcome.can_ping());
    }

    #[test]
    fn test_trim_root() {
        assert_eq!(trim_root("example.com."), "example.com");
        assert_eq!(trim_root("example.com"), "example.com");
    }
}

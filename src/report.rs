//! Report rendering.
//!
//! The table format reproduces the classic console layout: one header
//! and one line per outcome for each set, then six summary ratios.

use crate::error::Result;
use crate::probe::{BatchReport, ResultSet, ResultSummary};
use std::io::Write;

/// Banner printed before the summary ratios.
pub const TOTALS_BANNER: &str = "******** TOTALS **********";

/// Write the human-readable report.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_table<W: Write>(out: &mut W, report: &BatchReport) -> Result<()> {
    writeln!(out, "IP Address\tHasDns\tCanPing\t")?;
    write_outcomes(out, &report.ips)?;

    writeln!(out, "Word\tHasDns\tCanPing\t")?;
    write_outcomes(out, &report.words)?;

    writeln!(out, "{TOTALS_BANNER}")?;
    write_ratios(out, "IP", &report.ip_summary)?;
    write_ratios(out, "DNS", &report.word_summary)?;
    Ok(())
}

/// Write the whole batch as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write>(out: &mut W, report: &BatchReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

fn write_outcomes<W: Write>(out: &mut W, set: &ResultSet) -> Result<()> {
    for outcome in set {
        writeln!(
            out,
            "{} {} {}",
            outcome.label(),
            flag(outcome.has_dns()),
            flag(outcome.can_ping())
        )?;
    }
    Ok(())
}

fn write_ratios<W: Write>(out: &mut W, prefix: &str, summary: &ResultSummary) -> Result<()> {
    let note = if summary.is_defined() {
        ""
    } else {
        " (no samples)"
    };
    writeln!(out, "{prefix} % with DNS: {}{note}", summary.percent_with_dns())?;
    writeln!(out, "{prefix} % with Ping: {}{note}", summary.percent_pingable())?;
    writeln!(out, "{prefix} % with Both: {}{note}", summary.percent_either())?;
    Ok(())
}

fn flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProbeConfig;
    use crate::probe::{run_batch, ProbeBackend, ProbeTarget, Resolved};
    use std::net::Ipv4Addr;
    use std::sync::Arc;

    /// Every lookup and ping fails.
    struct DeadBackend;

    impl ProbeBackend for DeadBackend {
        async fn reverse_lookup(&self, _ip: Ipv4Addr) -> Option<String> {
            None
        }

        async fn forward_lookup(&self, _host: &str) -> Option<Resolved> {
            None
        }

        async fn ping(&self, _addr: Ipv4Addr) -> bool {
            false
        }
    }

    /// Every lookup resolves and every ping answers.
    struct LiveBackend;

    impl ProbeBackend for LiveBackend {
        async fn reverse_lookup(&self, ip: Ipv4Addr) -> Option<String> {
            Some(format!("host-{ip}"))
        }

        async fn forward_lookup(&self, host: &str) -> Option<Resolved> {
            Some(Resolved {
                hostname: host.to_string(),
                addr: Ipv4Addr::LOCALHOST,
            })
        }

        async fn ping(&self, _addr: Ipv4Addr) -> bool {
            true
        }
    }

    fn render(report: &BatchReport) -> String {
        let mut buf = Vec::new();
        write_table(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn test_table_layout() {
        let targets = vec![
            ProbeTarget::Ip(Ipv4Addr::new(192, 0, 2, 1)),
            ProbeTarget::word("misdo"),
        ];
        let report = run_batch(Arc::new(DeadBackend), targets, &ProbeConfig::default()).await;

        let text = render(&report);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "IP Address\tHasDns\tCanPing\t",
                "192.0.2.1 False False",
                "Word\tHasDns\tCanPing\t",
                "misdo False False",
                "******** TOTALS **********",
                "IP % with DNS: 0",
                "IP % with Ping: 0",
                "IP % with Both: 0",
                "DNS % with DNS: 0",
                "DNS % with Ping: 0",
                "DNS % with Both: 0",
            ]
        );
    }

    #[tokio::test]
    async fn test_ratios_are_fractions() {
        let targets = vec![
            ProbeTarget::Ip(Ipv4Addr::new(1, 2, 3, 4)),
            ProbeTarget::word("rioter"),
        ];
        let report = run_batch(Arc::new(LiveBackend), targets, &ProbeConfig::default()).await;

        let text = render(&report);
        assert!(text.contains("1.2.3.4 True True"));
        assert!(text.contains("rioter True True"));
        assert!(text.contains("IP % with Both: 1\n"));
        assert!(text.contains("DNS % with Ping: 1\n"));
    }

    #[tokio::test]
    async fn test_empty_sets_are_flagged() {
        let report = run_batch(Arc::new(DeadBackend), Vec::new(), &ProbeConfig::default()).await;
        let text = render(&report);
        assert!(text.contains("IP % with DNS: 0 (no samples)"));
        assert!(text.contains("DNS % with Both: 0 (no samples)"));
    }

    #[tokio::test]
    async fn test_json_report() {
        let targets = vec![ProbeTarget::word("anele")];
        let report = run_batch(Arc::new(LiveBackend), targets, &ProbeConfig::default()).await;

        let mut buf = Vec::new();
        write_json(&mut buf, &report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["word_summary"]["total"], 1);
        assert_eq!(value["ip_summary"]["total"], 0);
        let outcome = &value["words"]["outcomes"][0];
        assert_eq!(outcome["target"]["value"], "anele");
        assert_eq!(outcome["hostname"], "anele.com");
        assert_eq!(outcome["pinged_host"], "anele.com");
    }
}

//! Random target generation.
//!
//! IPv4 addresses are drawn octet by octet. Words come from a fixed
//! embedded dictionary, without repeats.

use crate::config::ProbeConfig;
use crate::error::{Error, Result};
use crate::probe::types::ProbeTarget;
use rand::Rng;
use std::collections::HashSet;
use std::net::Ipv4Addr;

/// Words that get turned into candidate hostnames.
pub const DICTIONARY: [&str; 40] = [
    "amoroso",
    "anele",
    "associated",
    "battleax",
    "brotherly",
    "chickaree",
    "compensation",
    "displace",
    "herbarist",
    "matross",
    "misdo",
    "nolition",
    "regards",
    "solus",
    "spavined",
    "tragalism",
    "ululation",
    "untrammeled",
    "virescent",
    "wellknown",
    "activity",
    "adaption",
    "backbiter",
    "bandbox",
    "blowth",
    "bouncing",
    "capitalist",
    "chersonese",
    "conspicuousness",
    "disparagement",
    "dominos",
    "foreloper",
    "messmate",
    "rioter",
    "sentimentalism",
    "shallowbrain",
    "spicilegium",
    "tiresias",
    "toboggan",
    "undoubted",
];

/// Generate `count` random IPv4 addresses.
///
/// The first octet is drawn from `1..=217`, which keeps clear of `0.x.x.x`
/// and the multicast/reserved space above. The other three octets are drawn
/// from `0..=254`. Duplicates are allowed.
pub fn random_ipv4<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Ipv4Addr> {
    (0..count)
        .map(|_| {
            Ipv4Addr::new(
                rng.random_range(1..=217),
                rng.random_range(0..=254),
                rng.random_range(0..=254),
                rng.random_range(0..=254),
            )
        })
        .collect()
}

/// Pick `count` distinct words from [`DICTIONARY`].
///
/// Order of the returned words is unspecified.
///
/// # Errors
///
/// Returns `Error::InvalidCount` if `count` exceeds the dictionary size.
pub fn random_words<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Result<Vec<&'static str>> {
    if count > DICTIONARY.len() {
        return Err(Error::InvalidCount {
            requested: count,
            available: DICTIONARY.len(),
        });
    }

    let mut picked = HashSet::with_capacity(count);
    while picked.len() < count {
        picked.insert(DICTIONARY[rng.random_range(0..DICTIONARY.len())]);
    }
    Ok(picked.into_iter().collect())
}

/// Build the full target list for a run: IPs first, then words.
///
/// # Errors
///
/// Propagates `Error::InvalidCount` from [`random_words`].
pub fn random_targets<R: Rng + ?Sized>(
    rng: &mut R,
    config: &ProbeConfig,
) -> Result<Vec<ProbeTarget>> {
    let words = random_words(rng, config.word_count)?;
    let targets = random_ipv4(rng, config.ip_count)
        .into_iter()
        .map(ProbeTarget::Ip)
        .chain(words.into_iter().map(ProbeTarget::word))
        .collect();
    Ok(targets)
}

//! # Neighbor Table Parser
//!
//! Extracts (IP, MAC) pairs from the raw text of the OS neighbor cache.
//!
//! The input is whatever `ip neigh` or `arp -a` printed, so the parser is
//! regex-based and tolerant: header lines, incomplete entries and anything
//! else that does not carry both patterns is skipped, never an error.

use std::net::Ipv4Addr;
use std::sync::OnceLock;

use pnet::util::MacAddr;
use regex::Regex;

/// Markers that identify a line as a resolved neighbor entry.
///
/// `lladdr` appears in `ip neigh` output, `ether` in Linux `arp` and in
/// the `[ethernet]` tag of BSD `arp -a`.
const RESOLVED_MARKERS: [&str; 2] = ["lladdr", "ether"];

/// Markers for entries the kernel gave up on.
const UNRESOLVED_MARKERS: [&str; 3] = ["incomplete", "INCOMPLETE", "FAILED"];

/// One resolved neighbor cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborEntry {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

fn ipv4_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})").unwrap())
}

fn mac_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:[0-9a-fA-F]{1,2}[:-]){5}[0-9a-fA-F]{1,2}").unwrap())
}

/// Lazily scans `raw` line by line, yielding every resolved (IP, MAC)
/// pair. Single pass; re-invoke with the same text to restart.
pub fn parse(raw: &str) -> impl Iterator<Item = NeighborEntry> + '_ {
    raw.lines().filter_map(parse_line)
}

fn parse_line(line: &str) -> Option<NeighborEntry> {
    if !RESOLVED_MARKERS.iter().any(|marker| line.contains(marker)) {
        return None;
    }
    if UNRESOLVED_MARKERS.iter().any(|marker| line.contains(marker)) {
        return None;
    }

    let ip: Ipv4Addr = ipv4_pattern().find(line)?.as_str().parse().ok()?;
    let mac = normalize_mac(mac_pattern().find(line)?.as_str())?;
    Some(NeighborEntry { ip, mac })
}

/// Canonicalizes a matched hardware address to lowercase colon form.
///
/// Accepts hyphen-delimited (Windows-style) sources and the shortened
/// octets BSD `arp` prints (`0:1f:2a:...`).
fn normalize_mac(raw: &str) -> Option<MacAddr> {
    let parts: Vec<&str> = raw.split(['-', ':']).collect();
    if parts.len() != 6 {
        return None;
    }
    let mut octets = [0u8; 6];
    for (slot, part) in octets.iter_mut().zip(parts) {
        *slot = u8::from_str_radix(part, 16).ok()?;
    }
    Some(MacAddr::new(
        octets[0], octets[1], octets[2], octets[3], octets[4], octets[5],
    ))
}

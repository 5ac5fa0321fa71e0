//! Hostname resolution seams: the local machine's own name and forward
//! and reverse DNS for everything else.

use std::net::{IpAddr, Ipv4Addr};

use anyhow::Context;

/// Name lookups the discovery run depends on.
///
/// Reverse lookups are best-effort: a `None` from [`resolve_addr`]
/// degrades the device's hostname to its IP string, nothing more.
///
/// [`resolve_addr`]: NameResolver::resolve_addr
pub trait NameResolver: Send + Sync {
    fn local_hostname(&self) -> anyhow::Result<String>;

    fn resolve_name(&self, hostname: &str) -> anyhow::Result<Ipv4Addr>;

    fn resolve_addr(&self, ip: Ipv4Addr) -> Option<String>;
}

/// System-resolver backed implementation.
pub struct DnsResolver;

impl NameResolver for DnsResolver {
    fn local_hostname(&self) -> anyhow::Result<String> {
        dns_lookup::get_hostname().context("reading local hostname")
    }

    fn resolve_name(&self, hostname: &str) -> anyhow::Result<Ipv4Addr> {
        // Plain name first; fall back to the mDNS-style `.local` form
        // for hosts that only publish there.
        first_v4(hostname)
            .or_else(|_| first_v4(&format!("{hostname}.local")))
            .with_context(|| format!("resolving {hostname} to an IPv4 address"))
    }

    fn resolve_addr(&self, ip: Ipv4Addr) -> Option<String> {
        dns_lookup::lookup_addr(&IpAddr::V4(ip)).ok()
    }
}

fn first_v4(hostname: &str) -> anyhow::Result<Ipv4Addr> {
    let addrs = dns_lookup::lookup_host(hostname)?;
    addrs
        .into_iter()
        .find_map(|addr| match addr {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| anyhow::anyhow!("{hostname} has no IPv4 address"))
}

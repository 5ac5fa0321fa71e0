//! # Netmask Arithmetic
//!
//! Pure conversions between dotted-quad netmasks, CIDR prefix lengths and
//! the addressable range of a subnet. Nothing here touches the network.

use std::net::Ipv4Addr;

use crate::error::DiscoveryError;

/// Derives a CIDR prefix length from a dotted-quad netmask.
///
/// Counts the leading 1-bits of every octet and sums them. Contiguity of
/// the mask bits is deliberately NOT validated: a mask like `255.0.255.0`
/// is accepted and yields 16, matching the tolerant behavior this tool
/// has always had. Format errors (wrong octet count, non-numeric or
/// out-of-range octets) are rejected.
pub fn prefix_from_netmask(netmask: &str) -> Result<u8, DiscoveryError> {
    let octets: Vec<&str> = netmask.split('.').collect();
    if octets.len() != 4 {
        return Err(DiscoveryError::InvalidNetmask(netmask.to_string()));
    }

    let mut prefix: u8 = 0;
    for octet in octets {
        let value: u8 = octet
            .parse()
            .map_err(|_| DiscoveryError::InvalidNetmask(netmask.to_string()))?;
        prefix += value.leading_ones() as u8;
    }
    Ok(prefix)
}

/// Inverse of [`prefix_from_netmask`] for contiguous masks.
pub fn netmask_from_prefix(prefix: u8) -> Result<Ipv4Addr, DiscoveryError> {
    if prefix > 32 {
        return Err(DiscoveryError::PrefixOutOfRange(prefix));
    }
    Ok(Ipv4Addr::from(prefix_mask(prefix)))
}

fn prefix_mask(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    }
}

/// A derived subnet: prefix, network and broadcast addresses.
///
/// Constructed fresh per discovery run from any host address inside the
/// subnet plus the prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subnet {
    prefix: u8,
    network: Ipv4Addr,
    broadcast: Ipv4Addr,
}

impl Subnet {
    /// Computes the subnet containing `host` under the given prefix.
    pub fn of(host: Ipv4Addr, prefix: u8) -> Result<Self, DiscoveryError> {
        if prefix > 32 {
            return Err(DiscoveryError::PrefixOutOfRange(prefix));
        }
        let mask = prefix_mask(prefix);
        let network = u32::from(host) & mask;
        let broadcast = network | !mask;
        Ok(Self {
            prefix,
            network: Ipv4Addr::from(network),
            broadcast: Ipv4Addr::from(broadcast),
        })
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        self.broadcast
    }

    /// Number of usable host addresses: 2^(32-prefix) - 2, or zero for
    /// /31 and /32 where the open interval is empty.
    pub fn host_count(&self) -> u32 {
        if self.prefix > 30 {
            return 0;
        }
        ((1u64 << (32 - u32::from(self.prefix))) - 2) as u32
    }

    /// Ordered usable range: every address strictly between the network
    /// and broadcast addresses.
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> + use<> {
        let start = u32::from(self.network).saturating_add(1);
        let end = u32::from(self.broadcast);
        (start..end.max(start)).map(Ipv4Addr::from)
    }

    pub fn first_usable(&self) -> Option<Ipv4Addr> {
        self.hosts().next()
    }

    pub fn last_usable(&self) -> Option<Ipv4Addr> {
        if self.host_count() == 0 {
            return None;
        }
        Some(Ipv4Addr::from(u32::from(self.broadcast) - 1))
    }
}

//! # Device Model
//!
//! A [`Device`] is one network participant as seen at the end of a
//! discovery run, and an [`Inventory`] is the deduplicated set of them.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use pnet::util::MacAddr;

/// Sentinel used when the vendor of a hardware address is not known.
pub const UNKNOWN_VENDOR: &str = "unknown";

/// A single device on the subnet.
///
/// `ip` is always present; `mac` may be absent for the local host when the
/// interface did not expose one. Enrichment happens before construction,
/// a `Device` is never mutated once it sits in an [`Inventory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub ip: Ipv4Addr,
    pub mac: Option<MacAddr>,
    pub hostname: String,
    pub vendor: String,
}

impl Device {
    /// Creates a device with sentinel hostname (the IP's string form)
    /// and vendor.
    pub fn new(ip: Ipv4Addr) -> Self {
        Self {
            ip,
            mac: None,
            hostname: ip.to_string(),
            vendor: UNKNOWN_VENDOR.to_string(),
        }
    }

    pub fn with_mac(mut self, mac: MacAddr) -> Self {
        self.mac = Some(mac);
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }
}

/// Devices keyed by IP address, at most one entry per address.
///
/// Insertion order matters: the last write for an address wins, which is
/// how the local host takes priority over its own neighbor-table echo.
#[derive(Debug, Default)]
pub struct Inventory {
    devices: BTreeMap<Ipv4Addr, Device>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, device: Device) {
        self.devices.insert(device.ip, device);
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn get(&self, ip: &Ipv4Addr) -> Option<&Device> {
        self.devices.get(ip)
    }

    /// Consumes the inventory, yielding devices ordered by address.
    pub fn into_devices(self) -> Vec<Device> {
        self.devices.into_values().collect()
    }
}

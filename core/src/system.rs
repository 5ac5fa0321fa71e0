//! # OS Network Information
//!
//! The two OS-facing capabilities the discovery run depends on: the local
//! interface's identity (address, hardware address, netmask) and the raw
//! text of the neighbor (ARP) cache.
//!
//! Higher-level code depends on the [`SystemRepository`] trait only; the
//! platform-specific mechanics live behind [`OsSystemRepo`], with one
//! implementation per supported platform selected at compile time.

use std::net::Ipv4Addr;

use pnet::util::MacAddr;

use lanscout_common::error::SystemError;

/// The local interface identity as reported by the operating system.
#[derive(Debug, Clone)]
pub struct InterfaceInfo {
    pub ip: Ipv4Addr,
    pub mac: Option<MacAddr>,
    /// Dotted-quad netmask, converted to a prefix length by the caller.
    pub netmask: String,
}

/// Read access to the operating system's view of the network.
pub trait SystemRepository: Send + Sync {
    /// Identifies the primary LAN interface.
    fn interface_info(&self) -> Result<InterfaceInfo, SystemError>;

    /// Returns the current neighbor cache in platform-native text form.
    fn neighbor_table(&self) -> Result<String, SystemError>;
}

/// The real, OS-backed repository.
pub struct OsSystemRepo;

#[cfg(any(target_os = "linux", target_os = "macos"))]
impl SystemRepository for OsSystemRepo {
    fn interface_info(&self) -> Result<InterfaceInfo, SystemError> {
        use pnet::ipnetwork::IpNetwork;

        let interfaces = pnet::datalink::interfaces();

        let mut candidates: Vec<(pnet::datalink::NetworkInterface, pnet::ipnetwork::Ipv4Network)> =
            interfaces
                .into_iter()
                .filter(|intf| intf.is_up() && !intf.is_loopback())
                .filter_map(|intf| {
                    let v4 = intf.ips.iter().find_map(|net| match net {
                        IpNetwork::V4(v4) => Some(*v4),
                        _ => None,
                    })?;
                    Some((intf, v4))
                })
                .collect();

        // Prefer an interface holding a private address; that is the one
        // whose subnet we can meaningfully sweep.
        candidates.sort_by_key(|(_, v4)| if v4.ip().is_private() { 0 } else { 1 });

        let (intf, v4) = candidates.into_iter().next().ok_or_else(|| {
            SystemError::Unavailable("no usable IPv4 interface found".to_string())
        })?;

        Ok(InterfaceInfo {
            ip: v4.ip(),
            mac: intf.mac,
            netmask: v4.mask().to_string(),
        })
    }

    fn neighbor_table(&self) -> Result<String, SystemError> {
        #[cfg(target_os = "linux")]
        let attempts: &[(&str, &[&str])] = &[("ip", &["neigh", "show"]), ("arp", &["-a"])];
        #[cfg(target_os = "macos")]
        let attempts: &[(&str, &[&str])] = &[("arp", &["-a"])];

        let mut last_err = String::new();
        for (program, args) in attempts {
            match std::process::Command::new(program).args(*args).output() {
                Ok(output) if output.status.success() => {
                    return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
                }
                Ok(output) => {
                    last_err = format!("{program} exited with {}", output.status);
                }
                Err(e) => {
                    last_err = format!("failed to run {program}: {e}");
                }
            }
        }
        Err(SystemError::Unavailable(last_err))
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
impl SystemRepository for OsSystemRepo {
    fn interface_info(&self) -> Result<InterfaceInfo, SystemError> {
        Err(SystemError::UnsupportedPlatform(std::env::consts::OS))
    }

    fn neighbor_table(&self) -> Result<String, SystemError> {
        Err(SystemError::UnsupportedPlatform(std::env::consts::OS))
    }
}

//! Local host identity: who this machine is on the subnet.

use lanscout_common::error::DiscoveryError;
use lanscout_common::network::device::Device;
use tracing::debug;

use crate::resolver::NameResolver;
use crate::system::InterfaceInfo;

/// Wraps the local machine as a [`Device`].
///
/// Hostname comes from the OS, the IPv4 address from forward-resolving
/// that hostname, the hardware address from the interface itself. Failure
/// is fatal for the run: without a host address no subnet can be derived.
pub fn resolve_local_host(
    info: &InterfaceInfo,
    names: &dyn NameResolver,
) -> Result<Device, DiscoveryError> {
    let hostname = names
        .local_hostname()
        .map_err(|e| DiscoveryError::HostResolution(e.to_string()))?;

    let ip = names
        .resolve_name(&hostname)
        .map_err(|e| DiscoveryError::HostResolution(e.to_string()))?;

    debug!("local host {hostname} resolved to {ip}");

    let mut host = Device::new(ip).with_hostname(hostname);
    if let Some(mac) = info.mac {
        host = host.with_mac(mac);
    }
    Ok(host)
}

use lanscout_common::network::subnet::{self, Subnet};
use lanscout_core::identity;
use lanscout_core::resolver::DnsResolver;
use lanscout_core::system::{OsSystemRepo, SystemRepository};

use crate::terminal::print;

/// Prints the local identity and the subnet figures without probing.
pub fn info() -> anyhow::Result<()> {
    let info = OsSystemRepo.interface_info()?;
    let host = identity::resolve_local_host(&info, &DnsResolver)?;

    print::aligned_line("Hostname", host.hostname.clone());
    print::aligned_line("IP", host.ip.to_string());
    match host.mac {
        Some(mac) => print::aligned_line("MAC", mac.to_string()),
        None => print::aligned_line("MAC", "unavailable".to_string()),
    }

    let prefix = subnet::prefix_from_netmask(&info.netmask)?;
    let subnet = Subnet::of(host.ip, prefix)?;

    println!();
    print::aligned_line("Netmask", info.netmask.clone());
    print::aligned_line("Prefix", format!("/{prefix}"));
    print::aligned_line("Network", subnet.network().to_string());
    print::aligned_line("Broadcast", subnet.broadcast().to_string());
    print::aligned_line("Usable hosts", subnet.host_count().to_string());
    if let (Some(first), Some(last)) = (subnet.first_usable(), subnet.last_usable()) {
        print::aligned_line("First usable", first.to_string());
        print::aligned_line("Last usable", last.to_string());
    }

    Ok(())
}

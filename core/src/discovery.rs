//! # Discovery Orchestrator
//!
//! Sequences a full discovery run: identify the local host, derive the
//! subnet from the interface netmask, sweep the usable range with probes,
//! then reconcile the OS neighbor table into a device inventory.
//!
//! Failures before the sweep are fatal (no subnet can be derived without
//! them). Once probing has started, everything degrades instead: a
//! missing neighbor table becomes an empty one, a failed hostname or
//! vendor lookup becomes a sentinel field. An inventory holding nothing
//! but the local host is a valid result on an isolated network.

use std::net::Ipv4Addr;
use std::sync::Arc;

use lanscout_common::config::Config;
use lanscout_common::error::DiscoveryError;
use lanscout_common::network::device::{Device, Inventory};
use lanscout_common::network::subnet::{self, Subnet};
use tracing::{debug, info, warn};

use crate::identity;
use crate::neighbor;
use crate::probe::{CancelFlag, ProbeSender, Prober};
use crate::resolver::NameResolver;
use crate::system::SystemRepository;
use crate::vendors::VendorRepository;

/// Progress of a run, in order. `Failed` is reachable only from the
/// first three states; later trouble downgrades to partial results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    HostIdentified,
    SubnetComputed,
    Probing,
    Reconciling,
    Done,
}

/// The outcome of a completed run.
#[derive(Debug)]
pub struct Discovery {
    /// The network address of the swept subnet.
    pub network: Ipv4Addr,
    /// Every reachable device, ordered by address, local host included.
    pub devices: Vec<Device>,
}

/// Application service tying the collaborators together.
pub struct DiscoveryService {
    system: Box<dyn SystemRepository>,
    probe_sender: Arc<dyn ProbeSender>,
    names: Box<dyn NameResolver>,
    vendors: Box<dyn VendorRepository>,
    config: Config,
}

impl DiscoveryService {
    pub fn new(
        system: Box<dyn SystemRepository>,
        probe_sender: Arc<dyn ProbeSender>,
        names: Box<dyn NameResolver>,
        vendors: Box<dyn VendorRepository>,
        config: Config,
    ) -> Self {
        Self {
            system,
            probe_sender,
            names,
            vendors,
            config,
        }
    }

    /// Runs discovery end to end.
    ///
    /// Cancelling via `cancel` during the sweep stops issuing probes and
    /// reconciles whatever the neighbor table already holds.
    pub async fn run(&self, cancel: &CancelFlag) -> Result<Discovery, DiscoveryError> {
        let mut phase = Phase::Idle;

        let info = self.system.interface_info()?;
        let host = identity::resolve_local_host(&info, self.names.as_ref())?;
        transition(&mut phase, Phase::HostIdentified);

        let prefix = subnet::prefix_from_netmask(&info.netmask)?;
        let subnet = Subnet::of(host.ip, prefix)?;
        transition(&mut phase, Phase::SubnetComputed);
        info!(
            "subnet {}/{} with {} usable addresses",
            subnet.network(),
            subnet.prefix(),
            subnet.host_count()
        );

        transition(&mut phase, Phase::Probing);
        let prober = Prober::new(
            self.probe_sender.clone(),
            self.config.pool_size,
            self.config.probe_timeout,
        );
        prober.sweep(subnet.hosts(), cancel).await;

        // Probes are never awaited individually; give replies a bounded
        // window to land in the neighbor cache before reading it. A
        // cancelled sweep skips straight to reconciliation.
        if !cancel.is_cancelled() {
            tokio::time::sleep(self.config.settle_time).await;
        }

        transition(&mut phase, Phase::Reconciling);
        let raw_table = match self.system.neighbor_table() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("neighbor table unavailable, continuing without it: {e}");
                String::new()
            }
        };

        let mut inventory = Inventory::new();
        for entry in neighbor::parse(&raw_table) {
            inventory.insert(self.enrich(entry));
        }
        // Local host last: on an IP collision with its own table entry,
        // the identity-resolved record wins.
        let mut local = host;
        if let Some(mac) = local.mac {
            if let Some(vendor) = self.vendors.get_vendor(mac) {
                local = local.with_vendor(vendor);
            }
        }
        inventory.insert(local);

        transition(&mut phase, Phase::Done);
        info!("discovery complete, {} device(s) in inventory", inventory.len());

        Ok(Discovery {
            network: subnet.network(),
            devices: inventory.into_devices(),
        })
    }

    fn enrich(&self, entry: neighbor::NeighborEntry) -> Device {
        let hostname = self
            .names
            .resolve_addr(entry.ip)
            .unwrap_or_else(|| entry.ip.to_string());
        let mut device = Device::new(entry.ip)
            .with_mac(entry.mac)
            .with_hostname(hostname);
        if let Some(vendor) = self.vendors.get_vendor(entry.mac) {
            device = device.with_vendor(vendor);
        }
        device
    }
}

fn transition(phase: &mut Phase, next: Phase) {
    debug!("{phase:?} -> {next:?}");
    *phase = next;
}

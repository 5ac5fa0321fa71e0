use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pnet::util::MacAddr;

use lanscout_common::config::Config;
use lanscout_common::error::{DiscoveryError, SystemError};
use lanscout_common::network::device::UNKNOWN_VENDOR;
use lanscout_core::discovery::DiscoveryService;
use lanscout_core::probe::{CancelFlag, ProbeSender};
use lanscout_core::resolver::NameResolver;
use lanscout_core::system::{InterfaceInfo, SystemRepository};
use lanscout_core::vendors::VendorRepository;

fn local_ip() -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 1, 50)
}

fn local_mac() -> MacAddr {
    MacAddr::new(0xde, 0xad, 0xbe, 0xef, 0x00, 0x01)
}

/*************************************************************
                      Mock collaborators
**************************************************************/

struct MockSystem {
    unsupported: bool,
    netmask: String,
    /// `None` simulates a failed neighbor-table fetch.
    table: Option<String>,
}

impl MockSystem {
    fn with_table(table: &str) -> Self {
        Self {
            unsupported: false,
            netmask: "255.255.255.0".to_string(),
            table: Some(table.to_string()),
        }
    }
}

impl SystemRepository for MockSystem {
    fn interface_info(&self) -> Result<InterfaceInfo, SystemError> {
        if self.unsupported {
            return Err(SystemError::UnsupportedPlatform("plan9"));
        }
        Ok(InterfaceInfo {
            ip: local_ip(),
            mac: Some(local_mac()),
            netmask: self.netmask.clone(),
        })
    }

    fn neighbor_table(&self) -> Result<String, SystemError> {
        self.table
            .clone()
            .ok_or_else(|| SystemError::Unavailable("mock fetch failure".to_string()))
    }
}

struct RecordingProbe {
    seen: Mutex<Vec<Ipv4Addr>>,
}

impl RecordingProbe {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
        })
    }

    fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl ProbeSender for RecordingProbe {
    async fn send_probe(&self, ip: Ipv4Addr, _timeout: Duration) {
        // Simulates an unanswered probe: record the send, report nothing.
        self.seen.lock().unwrap().push(ip);
    }
}

struct StaticNames {
    hostname: &'static str,
    reverse: HashMap<Ipv4Addr, String>,
}

impl StaticNames {
    fn new(hostname: &'static str) -> Self {
        Self {
            hostname,
            reverse: HashMap::new(),
        }
    }
}

impl NameResolver for StaticNames {
    fn local_hostname(&self) -> anyhow::Result<String> {
        Ok(self.hostname.to_string())
    }

    fn resolve_name(&self, _hostname: &str) -> anyhow::Result<Ipv4Addr> {
        Ok(local_ip())
    }

    fn resolve_addr(&self, ip: Ipv4Addr) -> Option<String> {
        self.reverse.get(&ip).cloned()
    }
}

struct StaticVendors(HashMap<MacAddr, String>);

impl VendorRepository for StaticVendors {
    fn get_vendor(&self, mac: MacAddr) -> Option<String> {
        self.0.get(&mac).cloned()
    }
}

fn test_config() -> Config {
    Config {
        probe_timeout: Duration::from_millis(5),
        settle_time: Duration::ZERO,
        pool_size: 16,
    }
}

fn service(
    system: MockSystem,
    probe: Arc<RecordingProbe>,
    names: StaticNames,
    vendors: StaticVendors,
) -> DiscoveryService {
    DiscoveryService::new(
        Box::new(system),
        probe,
        Box::new(names),
        Box::new(vendors),
        test_config(),
    )
}

/*************************************************************
                            Tests
**************************************************************/

const NEIGH_TABLE: &str = "\
192.168.1.1 dev wlan0 lladdr a4:2b:b0:c9:00:01 REACHABLE
192.168.1.77 dev wlan0 lladdr 3c:22:fb:09:aa:10 STALE
192.168.1.50 dev wlan0 lladdr de:ad:be:ef:00:01 REACHABLE
192.168.1.200 dev wlan0 FAILED
";

#[tokio::test]
async fn full_run_merges_neighbors_with_local_priority() {
    let mut names = StaticNames::new("testhost");
    names
        .reverse
        .insert(Ipv4Addr::new(192, 168, 1, 1), "router.lan".to_string());

    let mut vendors = HashMap::new();
    vendors.insert(
        MacAddr::new(0xa4, 0x2b, 0xb0, 0xc9, 0x00, 0x01),
        "Acme Routers".to_string(),
    );

    let probe = RecordingProbe::new();
    let svc = service(
        MockSystem::with_table(NEIGH_TABLE),
        probe.clone(),
        names,
        StaticVendors(vendors),
    );

    let discovery = svc.run(&CancelFlag::new()).await.expect("run should succeed");

    assert_eq!(discovery.network, Ipv4Addr::new(192, 168, 1, 0));
    assert_eq!(probe.count(), 254, "every usable /24 address gets probed");
    assert_eq!(discovery.devices.len(), 3, "one device per IP, host deduped");

    let router = &discovery.devices[0];
    assert_eq!(router.ip, Ipv4Addr::new(192, 168, 1, 1));
    assert_eq!(router.hostname, "router.lan");
    assert_eq!(router.vendor, "Acme Routers");

    // The local host appears once, with identity-resolved fields winning
    // over its own neighbor-table echo.
    let local = &discovery.devices[1];
    assert_eq!(local.ip, local_ip());
    assert_eq!(local.hostname, "testhost");
    assert_eq!(local.mac, Some(local_mac()));

    // No reverse record and no vendor entry: both fields degrade.
    let unknown = &discovery.devices[2];
    assert_eq!(unknown.ip, Ipv4Addr::new(192, 168, 1, 77));
    assert_eq!(unknown.hostname, "192.168.1.77");
    assert_eq!(unknown.vendor, UNKNOWN_VENDOR);
}

#[tokio::test]
async fn unsupported_platform_is_fatal() {
    let system = MockSystem {
        unsupported: true,
        netmask: "255.255.255.0".to_string(),
        table: Some(String::new()),
    };
    let probe = RecordingProbe::new();
    let svc = service(
        system,
        probe.clone(),
        StaticNames::new("testhost"),
        StaticVendors(HashMap::new()),
    );

    let err = svc.run(&CancelFlag::new()).await.expect_err("must fail");
    assert!(matches!(
        err,
        DiscoveryError::System(SystemError::UnsupportedPlatform(_))
    ));
    assert_eq!(probe.count(), 0, "no probes before a fatal abort");
}

#[tokio::test]
async fn invalid_netmask_is_fatal() {
    let system = MockSystem {
        unsupported: false,
        netmask: "255.255.255".to_string(),
        table: Some(String::new()),
    };
    let probe = RecordingProbe::new();
    let svc = service(
        system,
        probe.clone(),
        StaticNames::new("testhost"),
        StaticVendors(HashMap::new()),
    );

    let err = svc.run(&CancelFlag::new()).await.expect_err("must fail");
    assert!(matches!(err, DiscoveryError::InvalidNetmask(_)));
    assert_eq!(probe.count(), 0);
}

#[tokio::test]
async fn silent_subnet_still_completes_with_local_host() {
    let svc = service(
        MockSystem::with_table(""),
        RecordingProbe::new(),
        StaticNames::new("testhost"),
        StaticVendors(HashMap::new()),
    );

    let discovery = svc.run(&CancelFlag::new()).await.expect("run should succeed");

    assert_eq!(discovery.devices.len(), 1);
    assert_eq!(discovery.devices[0].ip, local_ip());
    assert_eq!(discovery.devices[0].hostname, "testhost");
}

#[tokio::test]
async fn neighbor_table_failure_degrades_to_empty() {
    let system = MockSystem {
        unsupported: false,
        netmask: "255.255.255.0".to_string(),
        table: None,
    };
    let svc = service(
        system,
        RecordingProbe::new(),
        StaticNames::new("testhost"),
        StaticVendors(HashMap::new()),
    );

    let discovery = svc.run(&CancelFlag::new()).await.expect("fetch failure is non-fatal");
    assert_eq!(discovery.devices.len(), 1);
}

#[tokio::test]
async fn cancelled_run_does_not_sit_out_the_settle_time() {
    let probe = RecordingProbe::new();
    let svc = DiscoveryService::new(
        Box::new(MockSystem::with_table(NEIGH_TABLE)),
        probe,
        Box::new(StaticNames::new("testhost")),
        Box::new(StaticVendors(HashMap::new())),
        Config {
            settle_time: Duration::from_secs(60),
            ..test_config()
        },
    );

    let cancel = CancelFlag::new();
    cancel.cancel();

    // Far below the configured settle time; a cancelled run must not
    // wait it out before reconciling.
    let discovery = tokio::time::timeout(Duration::from_secs(5), svc.run(&cancel))
        .await
        .expect("cancelled run should finish without settling")
        .expect("cancellation is not an error");
    assert_eq!(discovery.devices.len(), 3);
}

#[tokio::test]
async fn cancelled_run_skips_probing_but_completes() {
    let probe = RecordingProbe::new();
    let svc = service(
        MockSystem::with_table(NEIGH_TABLE),
        probe.clone(),
        StaticNames::new("testhost"),
        StaticVendors(HashMap::new()),
    );

    let cancel = CancelFlag::new();
    cancel.cancel();
    let discovery = svc.run(&cancel).await.expect("cancellation is not an error");

    assert_eq!(probe.count(), 0);
    // Reconciliation still ran over the existing table.
    assert_eq!(discovery.devices.len(), 3);
}

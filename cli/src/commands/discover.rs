use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::*;
use tracing::warn;

use lanscout_common::config::Config;
use lanscout_common::network::device::Device;
use lanscout_core::discovery::{Discovery, DiscoveryService};
use lanscout_core::probe::{CancelFlag, PingSender};
use lanscout_core::resolver::DnsResolver;
use lanscout_core::system::OsSystemRepo;
use lanscout_core::vendors::OuiRepo;

use crate::commands::DiscoverArgs;
use crate::terminal::{print, spinner};

pub async fn discover(args: DiscoverArgs) -> anyhow::Result<()> {
    let cfg = Config {
        probe_timeout: Duration::from_secs(args.timeout),
        settle_time: Duration::from_secs(args.settle),
        pool_size: args.workers,
    };

    let service = DiscoveryService::new(
        Box::new(OsSystemRepo),
        Arc::new(PingSender),
        Box::new(DnsResolver),
        Box::new(OuiRepo::new()?),
        cfg,
    );

    let cancel = CancelFlag::new();
    let ctrl_c_flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing with what we have...");
            ctrl_c_flag.cancel();
        }
    });

    let progress = spinner::start("Probing the subnet...");
    let start_time = Instant::now();
    let result = service.run(&cancel).await;
    progress.finish_and_clear();

    let discovery = result?;
    print_discovery(&discovery, start_time.elapsed());
    Ok(())
}

fn print_discovery(discovery: &Discovery, elapsed: Duration) {
    print::status(format!("Network address: {}", discovery.network));
    println!();

    for (idx, device) in discovery.devices.iter().enumerate() {
        print_device(idx, device);
        if idx + 1 != discovery.devices.len() {
            println!();
        }
    }

    let count = format!("{} device(s)", discovery.devices.len()).bold().green();
    let time = format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow();
    println!();
    print::status(format!("Discovery complete: {count} identified in {time}"));
}

fn print_device(idx: usize, device: &Device) {
    print::tree_head(idx, &device.hostname);
    print::aligned_line("IP", device.ip.to_string());
    match device.mac {
        Some(mac) => print::aligned_line("MAC", mac.to_string()),
        None => print::aligned_line("MAC", "unavailable".to_string()),
    }
    print::aligned_line("Vendor", device.vendor.clone());
}

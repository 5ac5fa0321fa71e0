//! # Reachability Prober
//!
//! Fires one echo probe at every address in the usable range so that
//! replies populate the OS neighbor table. The prober never reads
//! results: a non-reply is the expected outcome for most of a /24, and
//! the neighbor table is the only place answers are observed.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, trace};

/// Cooperative cancellation handle shared between the CLI and the run.
///
/// Cancelling during the probe sweep stops issuing further probes; the
/// run then proceeds to reconciliation with whatever was already sent.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Issues a single reachability probe. Fire-and-forget: implementations
/// must return within `timeout` and never report per-address failure.
#[async_trait]
pub trait ProbeSender: Send + Sync {
    async fn send_probe(&self, ip: Ipv4Addr, timeout: Duration);
}

/// Fans probes out across a bounded worker pool.
pub struct Prober {
    sender: Arc<dyn ProbeSender>,
    pool_size: usize,
    timeout: Duration,
}

impl Prober {
    pub fn new(sender: Arc<dyn ProbeSender>, pool_size: usize, timeout: Duration) -> Self {
        Self {
            sender,
            pool_size: pool_size.max(1),
            timeout,
        }
    }

    /// Probes every address in `addrs`, at most `pool_size` in flight.
    ///
    /// Returns once every issued probe has finished or timed out, which
    /// establishes the "all probes issued" edge the caller's settle wait
    /// builds on.
    pub async fn sweep(&self, addrs: impl Iterator<Item = Ipv4Addr>, cancel: &CancelFlag) {
        let pool = Arc::new(Semaphore::new(self.pool_size));
        let mut tasks: JoinSet<()> = JoinSet::new();
        let mut issued: usize = 0;

        for ip in addrs {
            if cancel.is_cancelled() {
                debug!("probe sweep cancelled after {issued} probes");
                break;
            }

            let Ok(permit) = pool.clone().acquire_owned().await else {
                break;
            };
            let sender = self.sender.clone();
            let timeout = self.timeout;

            issued += 1;
            tasks.spawn(async move {
                sender.send_probe(ip, timeout).await;
                drop(permit);
            });
        }

        while tasks.join_next().await.is_some() {}
        debug!("probe sweep finished, {issued} probes issued");
    }
}

/// Probes by shelling out to the system `ping`, one echo per address.
///
/// Requires no privileges, and feeding the neighbor cache is exactly the
/// kernel-side effect of the echo exchange.
pub struct PingSender;

#[async_trait]
impl ProbeSender for PingSender {
    async fn send_probe(&self, ip: Ipv4Addr, timeout: Duration) {
        let wait_secs = timeout.as_secs().max(1).to_string();
        let target = ip.to_string();

        #[cfg(target_os = "linux")]
        let args = ["-c", "1", "-W", wait_secs.as_str(), target.as_str()];
        #[cfg(not(target_os = "linux"))]
        let args = ["-c", "1", "-t", wait_secs.as_str(), target.as_str()];

        let mut command = tokio::process::Command::new("ping");
        command
            .args(args)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null());

        // The outer timeout also covers ping binaries that ignore their
        // wait flag; either way the outcome is discarded.
        match tokio::time::timeout(timeout + Duration::from_millis(500), command.output()).await {
            Ok(Ok(output)) if output.status.success() => trace!("{ip} replied"),
            _ => trace!("{ip} did not reply"),
        }
    }
}

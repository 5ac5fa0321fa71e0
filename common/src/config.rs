use std::time::Duration;

/// Tuning knobs for a discovery run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound for a single reachability probe.
    pub probe_timeout: Duration,

    /// How long to wait after the last probe was issued before the
    /// neighbor table is read. Replies are never observed directly,
    /// so this is the only synchronization point with the OS cache.
    pub settle_time: Duration,

    /// Number of probes allowed in flight at once.
    pub pool_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(1),
            settle_time: Duration::from_secs(2),
            pool_size: 64,
        }
    }
}

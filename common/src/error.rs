use thiserror::Error;

/// Failures raised by the OS-facing collaborators.
///
/// "We don't know how to ask this platform" and "we asked and got nothing"
/// are kept distinct so callers can report them differently.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(&'static str),

    #[error("network information unavailable: {0}")]
    Unavailable(String),
}

/// Fatal failures of a discovery run.
///
/// Everything here aborts before any probing happens. Per-device trouble
/// (no ping reply, hostname or vendor lookup miss) never surfaces as an
/// error; those fields degrade to sentinel values instead.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid netmask format: {0:?}")]
    InvalidNetmask(String),

    #[error("prefix length {0} out of range (0-32)")]
    PrefixOutOfRange(u8),

    #[error("failed to resolve local host: {0}")]
    HostResolution(String),

    #[error(transparent)]
    System(#[from] SystemError),
}

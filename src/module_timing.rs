#![allow(clippy::if_same_then_else)]

use embassy_time::Duration;

/// Time to wait for module to boot
pub const fn boot_time() -> Duration {
    if cfg!(feature = "sara-r422") {
        Duration::from_secs(3)
    } else if cfg!(any(feature = "sara-r410m", feature = "sara-r412m")) {
        Duration::from_secs(5)
    } else {
        Duration::from_secs(5)
    }
}

/// Upper bound for the module to answer `AT` again after `AT+CFUN=15`.
///
/// Twice the boot time, to allow auto bauding to kick in.
pub const fn resync_timeout() -> Duration {
    Duration::from_ticks(boot_time().as_ticks() * 2)
}

/// Deadline for a single provisioning query (`+UMNOPROF`, `+CPSMS`, `+URAT`,
/// `+UBANDMASK`, `+COPS`)
pub const fn query_timeout() -> Duration {
    Duration::from_secs(2)
}

/// Deadline for each command of the detach, set, restart batch
pub const fn apply_timeout() -> Duration {
    Duration::from_secs(2)
}

/// Deadline for the `+CIND` indicator query
pub const fn indicator_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Blocking delay after `AT+CFUN=15`, before the module is expected to
/// restart. Found empirically.
pub const fn restart_settle_time() -> Duration {
    Duration::from_secs(3)
}

/// Delay before polling the network status ahead of a data session.
pub const fn pre_connect_settle_time() -> Duration {
    Duration::from_secs(1)
}

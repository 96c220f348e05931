use embassy_time::Duration;

use crate::command::network_service::types::RatIndex;
use crate::module_timing;

/// Compile-time provisioning targets and timing for a module.
///
/// The setup sequence converges the persistent configuration of the module
/// towards these values, restarting the module whenever one of them has to
/// change.
pub trait ProvisioningConfig {
    /// Mobile network operator profile (`+UMNOPROF`). `None` leaves the
    /// profile stored in the module untouched.
    const MNO_PROFILE: Option<u16>;

    /// Radio access technology selection (`+URAT`), verbatim as the module
    /// reports it, e.g. `"7"` or `"7,8"`. At most 15 characters.
    const RAT: &'static str;

    /// Band mask for LTE Cat M1 (`+UBANDMASK` RAT 0)
    const BANDMASK_CAT_M1: u64;

    /// Band mask for NB-IoT (`+UBANDMASK` RAT 1)
    const BANDMASK_NB_IOT: u64;

    /// Desired 3GPP power saving mode (`+CPSMS`)
    const PSM_ENABLED: bool = false;

    /// Take the operator for manual selection (`+COPS`) from the cached
    /// operator id instead of asking the module for the current one.
    const CACHE_OPERATOR: bool = false;

    /// Number of setup passes `Provisioner::provision` runs before giving up
    /// on a module that keeps requesting a restart.
    const MAX_SETUP_ATTEMPTS: u8 = 5;

    const QUERY_TIMEOUT: Duration = module_timing::query_timeout();
    const APPLY_TIMEOUT: Duration = module_timing::apply_timeout();
    const INDICATOR_TIMEOUT: Duration = module_timing::indicator_timeout();
    const RESTART_SETTLE_TIME: Duration = module_timing::restart_settle_time();
    const PRE_CONNECT_SETTLE_TIME: Duration = module_timing::pre_connect_settle_time();
    const RESYNC_TIMEOUT: Duration = module_timing::resync_timeout();

    fn band_mask(rat: RatIndex) -> u64 {
        match rat {
            RatIndex::CatM1 => Self::BANDMASK_CAT_M1,
            RatIndex::NbIot => Self::BANDMASK_NB_IOT,
        }
    }
}

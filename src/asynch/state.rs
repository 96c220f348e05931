use heapless::String;

use crate::command::{
    network_service::types::RatIndex,
    parse::{Indicators, RAT_COUNT, RAT_MAX_LEN},
};

/// Last known configuration and network status of the module.
///
/// Fields only ever hold values decoded from module replies; a query that
/// fails leaves its field untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    /// Active MNO profile, `None` if unknown or reported as `-1`
    pub profile: Option<u16>,
    pub psm_enabled: bool,
    /// Active RAT selection, verbatim
    pub rat: String<RAT_MAX_LEN>,
    /// Band mask per [`RatIndex`], `0` until reported
    pub band_mask: [u64; RAT_COUNT],
    pub signal_strength: i32,
    /// `1` when registered to the network
    pub network_service: i32,
    pub roaming: Option<bool>,
    pub sim_status: i32,
    /// Numeric operator id used for manual operator selection
    pub operator: Option<u32>,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceState {
    pub const fn new() -> Self {
        Self {
            profile: None,
            psm_enabled: false,
            rat: String::new(),
            band_mask: [0; RAT_COUNT],
            signal_strength: 0,
            network_service: 0,
            roaming: None,
            sim_status: 0,
            operator: None,
        }
    }

    pub fn band_mask(&self, rat: RatIndex) -> u64 {
        self.band_mask[rat.index()]
    }

    /// Store the reported masks, keeping the previous value of any RAT the
    /// module did not report.
    pub(crate) fn set_band_masks(&mut self, masks: [Option<u64>; RAT_COUNT]) {
        for (slot, mask) in self.band_mask.iter_mut().zip(masks) {
            if let Some(mask) = mask {
                *slot = mask;
            }
        }
    }

    pub(crate) fn set_indicators(&mut self, ind: &Indicators) {
        self.signal_strength = ind.signal;
        self.network_service = ind.service;
        self.roaming = ind.roaming;
        self.sim_status = ind.sim_status;
    }

    pub fn is_registered(&self) -> bool {
        self.network_service == 1
    }
}

//! ### 7 - Network service
pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use responses::{
    BandMasks, MnoProfile, OperatorSelection, PowerSavingModeStatus, RadioAccessTechnology,
};
use types::{OperatorSelectionMode, PowerSavingMode, RatIndex};

use super::{query_cmd, write_command, NoResponse};
use crate::command::parse::RAT_MAX_LEN;

/// 7.5 Operator selection +COPS
///
/// Forces an attempt to select and register with the GSM/LTE network
/// operator, that can be chosen in the list of network operators returned
/// by the test command. Only the `<mode>` and `<format>` are set here, e.g.
/// `AT+COPS=3,2` to have the read command report numeric operator ids.
#[derive(Clone, AtatCmd)]
#[at_cmd("+COPS", NoResponse, attempts = 1, timeout_ms = 180000)]
pub struct SetOperatorSelection {
    #[at_arg(position = 0)]
    pub mode: OperatorSelectionMode,
    #[at_arg(position = 1)]
    pub format: Option<u8>,
}

/// 7.5 Operator selection +COPS
///
/// Registers with the operator given by `<oper>`, without falling back to
/// automatic selection.
#[derive(Clone, AtatCmd)]
#[at_cmd("+COPS", NoResponse, attempts = 1, timeout_ms = 180000)]
pub struct SetManualOperatorSelection<'a> {
    #[at_arg(position = 0)]
    pub mode: OperatorSelectionMode,
    #[at_arg(position = 1)]
    pub format: u8,
    #[at_arg(position = 2, len = 10)]
    pub oper: &'a str,
}

/// 7.5 Operator selection +COPS
///
/// Reads the current mode and the currently selected operator.
#[derive(Clone)]
pub struct GetOperatorSelection;

query_cmd!(GetOperatorSelection, "+COPS?", OperatorSelection, 2000);

/// 7.8 Radio Access Technology (RAT) selection +URAT
///
/// Forces the selection of the Radio Access Technology (RAT) in the protocol
/// stack. The RAT list is sent verbatim, e.g. `AT+URAT=7,8`, and is cut at
/// 15 characters.
#[derive(Clone)]
pub struct SetRadioAccessTechnology<'a> {
    pub rat: &'a str,
}

impl atat::AtatCmd for SetRadioAccessTechnology<'_> {
    type Response = NoResponse;

    const MAX_LEN: usize = "AT+URAT=".len() + RAT_MAX_LEN + 2;
    const MAX_TIMEOUT_MS: u32 = 10000;

    fn write(&self, buf: &mut [u8]) -> usize {
        let rat = self.rat.as_bytes();
        write_command(buf, &[b"+URAT=", &rat[..rat.len().min(RAT_MAX_LEN)]])
    }

    fn parse(
        &self,
        resp: Result<&[u8], atat::InternalError>,
    ) -> Result<Self::Response, atat::Error> {
        resp.map_err(atat::Error::from)?;
        Ok(NoResponse)
    }
}

/// 7.8 Radio Access Technology (RAT) selection +URAT
#[derive(Clone)]
pub struct GetRadioAccessTechnology;

query_cmd!(GetRadioAccessTechnology, "+URAT?", RadioAccessTechnology, 2000);

/// Band selection bitmask +UBANDMASK
///
/// Sets the bands available to the protocol stack of one RAT, as a bitmask
/// where bit 0 is band 1.
#[derive(Clone, AtatCmd)]
#[at_cmd("+UBANDMASK", NoResponse, attempts = 1, timeout_ms = 2000)]
pub struct SetBandMask {
    #[at_arg(position = 0)]
    pub rat: RatIndex,
    #[at_arg(position = 1)]
    pub mask: u64,
}

/// Band selection bitmask +UBANDMASK
#[derive(Clone)]
pub struct GetBandMask;

query_cmd!(GetBandMask, "+UBANDMASK?", BandMasks, 2000);

/// Mobile Network Operator profile +UMNOPROF
///
/// Selects the MNO profile that configures the module for the mobile
/// network operator. Takes effect after a module restart.
#[derive(Clone, AtatCmd)]
#[at_cmd("+UMNOPROF", NoResponse, attempts = 1, timeout_ms = 2000)]
pub struct SetMnoProfile {
    #[at_arg(position = 0)]
    pub profile: u16,
}

/// Mobile Network Operator profile +UMNOPROF
#[derive(Clone)]
pub struct GetMnoProfile;

query_cmd!(GetMnoProfile, "+UMNOPROF?", MnoProfile, 2000);

/// Power Saving Mode setting +CPSMS
///
/// Controls the setting of the UEs power saving mode (PSM) parameters.
/// Only `<mode>` is set; the requested timers keep their stored values.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CPSMS", NoResponse, attempts = 1, timeout_ms = 2000)]
pub struct SetPowerSavingMode {
    #[at_arg(position = 0)]
    pub mode: PowerSavingMode,
}

/// Power Saving Mode setting +CPSMS
#[derive(Clone)]
pub struct GetPowerSavingMode;

query_cmd!(GetPowerSavingMode, "+CPSMS?", PowerSavingModeStatus, 2000);

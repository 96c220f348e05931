//! Responses for Network service Commands
//!
//! These replies are decoded positionally by [`crate::command::parse`]
//! instead of through `serde_at`.
use heapless::String;

use crate::command::parse::{self, ParseError, RAT_COUNT, RAT_MAX_LEN};

/// Mobile Network Operator profile +UMNOPROF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnoProfile {
    /// `None` when the module reports `-1`
    pub profile: Option<u16>,
}

/// Power Saving Mode setting +CPSMS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerSavingModeStatus {
    pub enabled: bool,
}

/// 7.8 Radio Access Technology (RAT) selection +URAT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioAccessTechnology {
    /// The RAT list verbatim, e.g. `7,8`
    pub rat: String<RAT_MAX_LEN>,
}

/// Band selection bitmask +UBANDMASK
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandMasks {
    /// Indexed by [`super::types::RatIndex`]; `None` for a RAT the module did
    /// not report
    pub masks: [Option<u64>; RAT_COUNT],
}

/// 7.5 Operator selection +COPS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorSelection {
    /// Numeric operator id (MCC + MNC), if reported in numeric format
    pub operator: Option<u32>,
}

impl atat::AtatResp for MnoProfile {}
impl atat::AtatResp for PowerSavingModeStatus {}
impl atat::AtatResp for RadioAccessTechnology {}
impl atat::AtatResp for BandMasks {}
impl atat::AtatResp for OperatorSelection {}

impl MnoProfile {
    pub(crate) fn parse(line: &[u8]) -> Result<Self, ParseError> {
        Ok(Self {
            profile: parse::mno_profile(line)?,
        })
    }
}

impl PowerSavingModeStatus {
    pub(crate) fn parse(line: &[u8]) -> Result<Self, ParseError> {
        Ok(Self {
            enabled: parse::psm_enabled(line)?,
        })
    }
}

impl RadioAccessTechnology {
    pub(crate) fn parse(line: &[u8]) -> Result<Self, ParseError> {
        Ok(Self {
            rat: parse::rat(line)?,
        })
    }
}

impl BandMasks {
    pub(crate) fn parse(line: &[u8]) -> Result<Self, ParseError> {
        Ok(Self {
            masks: parse::band_masks(line)?,
        })
    }
}

impl OperatorSelection {
    pub(crate) fn parse(line: &[u8]) -> Result<Self, ParseError> {
        Ok(Self {
            operator: parse::operator(line)?,
        })
    }
}

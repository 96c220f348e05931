//! Responses for Mobile equipment control and status Commands
use crate::command::parse::{self, Indicators, ParseError};

/// 5.4 Indicator control +CIND
///
/// Only the indications the driver acts on are kept, see [`Indicators`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorControl {
    /// "signal": signal level
    pub signal: i32,
    /// "service": network service availability
    /// o 0: not registered to any network
    /// o 1: registered to the network
    /// o 65535: indication not available
    pub service: i32,
    /// "roam": registration on a roaming network, `None` if not available
    pub roaming: Option<bool>,
    /// "simind": SIM detection
    pub sim_status: i32,
}

impl atat::AtatResp for IndicatorControl {}

impl IndicatorControl {
    pub(crate) fn parse(line: &[u8]) -> Result<Self, ParseError> {
        let Indicators {
            signal,
            service,
            roaming,
            sim_status,
        } = parse::indicators(line)?;

        Ok(Self {
            signal,
            service,
            roaming,
            sim_status,
        })
    }
}

impl From<IndicatorControl> for Indicators {
    fn from(ind: IndicatorControl) -> Self {
        Self {
            signal: ind.signal,
            service: ind.service,
            roaming: ind.roaming,
            sim_status: ind.sim_status,
        }
    }
}

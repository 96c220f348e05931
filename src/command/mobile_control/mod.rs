//! ### 5 - Mobile equipment control and status Commands
//!

pub mod responses;
pub mod types;
use atat::atat_derive::AtatCmd;
use responses::IndicatorControl;
use types::Functionality;

use super::{query_cmd, NoResponse};
use crate::module_timing;

/// 5.3 Set module functionality +CFUN
///
/// Selects the level of functionality <fun> in the MT.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CFUN", NoResponse, attempts = 1, timeout_ms = 2000)]
pub struct SetModuleFunctionality {
    #[at_arg(position = 0)]
    pub fun: Functionality,
}

/// 5.4 Indicator control +CIND
///
/// Provides indication states related to network status, battery information and so on.
/// The list of indications for the read command follows the indexes reported in the <descr> parameter, so
/// that the first <ind> corresponds to "battchg" and so on
#[derive(Clone)]
pub struct GetIndicatorControl;

query_cmd!(
    GetIndicatorControl,
    "+CIND?",
    IndicatorControl,
    module_timing::indicator_timeout().as_millis() as u32
);

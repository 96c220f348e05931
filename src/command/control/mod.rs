//! ### 15 - V24 control and V25ter
//! These commands, unless specifically stated, do not implement set syntax using "=", read ("?"), or test ("=?").
//! If such commands are used, the "+CME ERROR: unknown" or "+CME ERROR: 100" error result code is provided
//! (depending on the +CMEE AT command setting).
pub mod types;

use super::NoResponse;
use atat::atat_derive::AtatCmd;
use types::Echo;

/// 15.25 Command echo E
///
/// Configures whether or not the MT echoes the characters received from the
/// DTE during command state.
#[derive(Clone, AtatCmd)]
#[at_cmd("E", NoResponse, value_sep = false)]
pub struct SetEcho {
    #[at_arg(position = 0)]
    pub enabled: Echo,
}

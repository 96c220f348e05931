//! Argument and parameter types used by Mobile equipment control and status Commands and Responses
use atat::atat_derive::AtatEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum Functionality {
    /// 0: Sets the MT to minimum functionality (disable both transmit and receive RF
    /// circuits by deactivating both CS and PS services)
    Minimum = 0,

    /// 1 (factory-programmed value): sets the MT to full functionality, e.g. from airplane
    /// mode or minimum functionality
    Full = 1,

    /// 15: MT silent reset (with detach from network and saving of NVM parameters),
    /// without reset of the SIM card. Applies the configuration stored in NVM.
    SilentReset = 15,

    /// 16: MT silent reset (with detach from network and saving of NVM parameters), with
    /// reset of the SIM card
    SilentResetWithSimReset = 16,
}

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod asynch;
pub mod command;
pub mod config;
pub mod error;
mod module_timing;

#[cfg(test)]
mod test_helpers;

pub use asynch::network::Readiness;
pub use asynch::provisioner::Provisioner;
pub use asynch::setup::{SetupOutcome, StepOutcome};
pub use asynch::state::DeviceState;
pub use asynch::AtHandle;
pub use config::ProvisioningConfig;
pub use error::Error;

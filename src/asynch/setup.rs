//! Convergence of the persistent module configuration.
//!
//! Each step queries one setting, compares it against the
//! [`ProvisioningConfig`] target and, on a mismatch, writes the target with
//! the module detached from the network, followed by a silent reset. The
//! reset drops all session state, so the caller has to run the whole setup
//! again once the module answers.

use core::fmt::Write as _;

use atat::asynch::AtatClient;
use embassy_time::Timer;
use heapless::String;

use super::{state::DeviceState, AtHandle, Session};
use crate::command::{
    control::{types::Echo, SetEcho},
    mobile_control::{types::Functionality, SetModuleFunctionality},
    network_service::{
        responses::MnoProfile,
        types::{OperatorSelectionMode, PowerSavingMode, RatIndex, OPERATOR_FORMAT_NUMERIC},
        GetBandMask, GetMnoProfile, GetOperatorSelection, GetPowerSavingMode,
        GetRadioAccessTechnology, SetBandMask, SetManualOperatorSelection, SetMnoProfile,
        SetOperatorSelection, SetPowerSavingMode, SetRadioAccessTechnology,
    },
    parse::RAT_MAX_LEN,
};
use crate::config::ProvisioningConfig;
use crate::error::Error;

/// Result of a single convergence step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// The module already matches the target.
    Unchanged,
    /// The target was written and the module is restarting.
    NeedsRestart,
}

/// Result of a full setup pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupOutcome {
    /// Every setting matches its target.
    Ready,
    /// A setting was changed and the module is restarting.
    NeedsRestart,
}

pub(crate) trait ConvergenceStep<C: ProvisioningConfig> {
    const NAME: &'static str;

    /// Whether there is a target to converge to at all.
    fn has_target() -> bool {
        true
    }

    /// Refresh the setting in `state` from the module.
    async fn query<AT: AtatClient>(
        at: &AtHandle<'_, AT>,
        state: &mut DeviceState,
    ) -> Result<(), Error>;

    fn diverges(state: &DeviceState) -> bool;

    /// Write the target, while the module is detached.
    async fn correct<AT: AtatClient>(session: &mut Session<'_, AT>) -> Result<(), Error>;
}

pub(crate) struct MnoProfileStep;
pub(crate) struct PsmStep;
pub(crate) struct RatStep;
pub(crate) struct BandMaskStep;

impl<C: ProvisioningConfig> ConvergenceStep<C> for MnoProfileStep {
    const NAME: &'static str = "MNO profile";

    fn has_target() -> bool {
        C::MNO_PROFILE.is_some()
    }

    async fn query<AT: AtatClient>(
        at: &AtHandle<'_, AT>,
        state: &mut DeviceState,
    ) -> Result<(), Error> {
        match at.send(&GetMnoProfile, C::QUERY_TIMEOUT).await {
            Ok(MnoProfile { profile }) => {
                state.profile = profile;
                Ok(())
            }
            Err(Error::MalformedResponse) => {
                state.profile = None;
                Err(Error::MalformedResponse)
            }
            Err(e) => Err(e),
        }
    }

    fn diverges(state: &DeviceState) -> bool {
        // An unknown profile is never corrected.
        match (C::MNO_PROFILE, state.profile) {
            (Some(target), Some(current)) => target != current,
            _ => false,
        }
    }

    async fn correct<AT: AtatClient>(session: &mut Session<'_, AT>) -> Result<(), Error> {
        if let Some(profile) = C::MNO_PROFILE {
            session.send(&SetMnoProfile { profile }).await?;
        }
        Ok(())
    }
}

impl<C: ProvisioningConfig> ConvergenceStep<C> for PsmStep {
    const NAME: &'static str = "PSM";

    async fn query<AT: AtatClient>(
        at: &AtHandle<'_, AT>,
        state: &mut DeviceState,
    ) -> Result<(), Error> {
        state.psm_enabled = at
            .send(&GetPowerSavingMode, C::QUERY_TIMEOUT)
            .await?
            .enabled;
        Ok(())
    }

    fn diverges(state: &DeviceState) -> bool {
        state.psm_enabled != C::PSM_ENABLED
    }

    async fn correct<AT: AtatClient>(session: &mut Session<'_, AT>) -> Result<(), Error> {
        session
            .send(&SetPowerSavingMode {
                mode: PowerSavingMode::from(C::PSM_ENABLED),
            })
            .await?;
        Ok(())
    }
}

impl<C: ProvisioningConfig> ConvergenceStep<C> for RatStep {
    const NAME: &'static str = "RAT";

    async fn query<AT: AtatClient>(
        at: &AtHandle<'_, AT>,
        state: &mut DeviceState,
    ) -> Result<(), Error> {
        state.rat = at
            .send(&GetRadioAccessTechnology, C::QUERY_TIMEOUT)
            .await?
            .rat;
        Ok(())
    }

    fn diverges(state: &DeviceState) -> bool {
        // Compared the way it is written, cut at RAT_MAX_LEN.
        let target = C::RAT.as_bytes();
        state.rat.as_bytes() != &target[..target.len().min(RAT_MAX_LEN)]
    }

    async fn correct<AT: AtatClient>(session: &mut Session<'_, AT>) -> Result<(), Error> {
        session
            .send(&SetRadioAccessTechnology { rat: C::RAT })
            .await?;
        Ok(())
    }
}

impl<C: ProvisioningConfig> ConvergenceStep<C> for BandMaskStep {
    const NAME: &'static str = "band mask";

    async fn query<AT: AtatClient>(
        at: &AtHandle<'_, AT>,
        state: &mut DeviceState,
    ) -> Result<(), Error> {
        let masks = at.send(&GetBandMask, C::QUERY_TIMEOUT).await?.masks;
        state.set_band_masks(masks);
        Ok(())
    }

    fn diverges(state: &DeviceState) -> bool {
        RatIndex::ALL
            .iter()
            .any(|&rat| state.band_mask(rat) != C::band_mask(rat))
    }

    async fn correct<AT: AtatClient>(session: &mut Session<'_, AT>) -> Result<(), Error> {
        for rat in RatIndex::ALL {
            session
                .send(&SetBandMask {
                    rat,
                    mask: C::band_mask(rat),
                })
                .await?;
        }
        Ok(())
    }
}

/// Query, compare and, if needed, correct a single setting.
pub(crate) async fn converge<S, C, AT>(
    at: &AtHandle<'_, AT>,
    state: &mut DeviceState,
) -> Result<StepOutcome, Error>
where
    S: ConvergenceStep<C>,
    C: ProvisioningConfig,
    AT: AtatClient,
{
    if !S::has_target() {
        debug!("No {} target, skipping", S::NAME);
        return Ok(StepOutcome::Unchanged);
    }

    if let Err(e) = S::query(at, state).await {
        error!("Failed to query {}: {:?}", S::NAME, e);
        return Err(e);
    }

    if !S::diverges(state) {
        debug!("{} matches target", S::NAME);
        return Ok(StepOutcome::Unchanged);
    }

    info!("{} differs from target, reconfiguring module", S::NAME);

    let applied = async {
        let mut session = at.session(C::APPLY_TIMEOUT).await;
        session.send(&SetEcho { enabled: Echo::Off }).await?;
        session
            .send(&SetModuleFunctionality {
                fun: Functionality::Minimum,
            })
            .await?;
        S::correct(&mut session).await?;
        session
            .send(&SetModuleFunctionality {
                fun: Functionality::SilentReset,
            })
            .await?;
        Ok::<(), Error>(())
    }
    .await;

    if let Err(e) = applied {
        error!("Failed to apply {}: {:?}", S::NAME, e);
        return Err(e);
    }

    Timer::after(C::RESTART_SETTLE_TIME).await;

    Ok(StepOutcome::NeedsRestart)
}

/// Run all convergence steps in order, stopping at the first one that
/// restarts the module or fails. Once everything matches, select the
/// operator manually.
pub(crate) async fn setup_hook<AT: AtatClient, C: ProvisioningConfig>(
    at: &AtHandle<'_, AT>,
    state: &mut DeviceState,
) -> Result<SetupOutcome, Error> {
    if converge::<MnoProfileStep, C, AT>(at, state).await? == StepOutcome::NeedsRestart
        || converge::<PsmStep, C, AT>(at, state).await? == StepOutcome::NeedsRestart
        || converge::<RatStep, C, AT>(at, state).await? == StepOutcome::NeedsRestart
        || converge::<BandMaskStep, C, AT>(at, state).await? == StepOutcome::NeedsRestart
    {
        return Ok(SetupOutcome::NeedsRestart);
    }

    select_operator_manually::<AT, C>(at, state).await;

    Ok(SetupOutcome::Ready)
}

/// Lock the module to a single operator. Failures are logged and otherwise
/// ignored.
async fn select_operator_manually<AT: AtatClient, C: ProvisioningConfig>(
    at: &AtHandle<'_, AT>,
    state: &mut DeviceState,
) {
    let operator = if C::CACHE_OPERATOR {
        state.operator
    } else {
        match current_operator::<AT, C>(at).await {
            Ok(operator) => {
                if operator.is_some() {
                    state.operator = operator;
                }
                operator
            }
            Err(e) => {
                warn!("Failed to read current operator: {:?}", e);
                return;
            }
        }
    };

    let Some(operator) = operator else {
        warn!("No operator to select manually");
        return;
    };

    let mut oper = String::<10>::new();
    if write!(oper, "{}", operator).is_err() {
        warn!("Operator {} does not fit command", operator);
        return;
    }

    match at
        .send(
            &SetManualOperatorSelection {
                mode: OperatorSelectionMode::Manual,
                format: OPERATOR_FORMAT_NUMERIC,
                oper: &oper,
            },
            C::QUERY_TIMEOUT,
        )
        .await
    {
        Ok(_) => debug!("Selected operator {}", operator),
        Err(e) => warn!("Failed to select operator {}: {:?}", operator, e),
    }
}

async fn current_operator<AT: AtatClient, C: ProvisioningConfig>(
    at: &AtHandle<'_, AT>,
) -> Result<Option<u32>, Error> {
    at.send(
        &SetOperatorSelection {
            mode: OperatorSelectionMode::FormatOnly,
            format: Some(OPERATOR_FORMAT_NUMERIC),
        },
        C::QUERY_TIMEOUT,
    )
    .await?;

    Ok(at
        .send(&GetOperatorSelection, C::QUERY_TIMEOUT)
        .await?
        .operator)
}

use atat::asynch::AtatClient;
use embassy_time::Timer;

use super::{state::DeviceState, AtHandle};
use crate::command::{mobile_control::GetIndicatorControl, parse::Indicators};
use crate::config::ProvisioningConfig;
use crate::error::Error;

/// Whether the module is registered and a data session can be brought up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Readiness {
    Ready,
    NotReady,
}

/// Read the indicators once and judge readiness by network service alone.
pub(crate) async fn poll_network_status<AT: AtatClient, C: ProvisioningConfig>(
    at: &AtHandle<'_, AT>,
    state: &mut DeviceState,
) -> Result<Readiness, Error> {
    let indicators = at
        .send(&GetIndicatorControl, C::INDICATOR_TIMEOUT)
        .await
        .map_err(|e| {
            warn!("Failed to read indicators: {:?}", e);
            e
        })?;

    state.set_indicators(&Indicators::from(indicators));

    debug!(
        "Network service: {}, signal: {}, sim: {}",
        state.network_service, state.signal_strength, state.sim_status
    );

    Ok(if state.is_registered() {
        Readiness::Ready
    } else {
        Readiness::NotReady
    })
}

pub(crate) async fn pre_connect_hook<AT: AtatClient, C: ProvisioningConfig>(
    at: &AtHandle<'_, AT>,
    state: &mut DeviceState,
) -> Result<Readiness, Error> {
    Timer::after(C::PRE_CONNECT_SETTLE_TIME).await;
    poll_network_status::<AT, C>(at, state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MockModem, Reply, TestConfig};
    use embassy_futures::block_on;
    use embassy_sync::{blocking_mutex::raw::NoopRawMutex, mutex::Mutex};

    fn poll(reply: Reply) -> (Result<Readiness, Error>, DeviceState, usize) {
        let client = Mutex::<NoopRawMutex, _>::new(MockModem::new().reply("AT+CIND?", reply));
        let at = AtHandle::new(&client);
        let mut state = DeviceState::new();

        let res = block_on(pre_connect_hook::<_, TestConfig>(&at, &mut state));
        let sent = block_on(client.lock()).count("AT+CIND?");
        (res, state, sent)
    }

    #[test]
    fn registered_is_ready() {
        let (res, state, sent) = poll(Reply::Line("+CIND: 5,4,1,0,0,0,1,0,0,0,0,1"));
        assert_eq!(res, Ok(Readiness::Ready));
        assert_eq!(sent, 1);
        assert_eq!(state.signal_strength, 4);
        assert_eq!(state.roaming, Some(true));
        assert_eq!(state.sim_status, 1);
    }

    #[test]
    fn unregistered_is_not_ready() {
        let (res, state, _) = poll(Reply::Line("+CIND: 5,0,0,0,0,0,0,0,0,0,0,1"));
        assert_eq!(res, Ok(Readiness::NotReady));
        assert_eq!(state.network_service, 0);
    }

    #[test]
    fn short_indicator_reply_fails() {
        let (res, state, _) = poll(Reply::Line("+CIND: 5,4,1"));
        assert_eq!(res, Err(Error::MalformedResponse));
        assert_eq!(state, DeviceState::new());
    }

    #[test]
    fn silent_module_times_out() {
        let (res, _, sent) = poll(Reply::Silent);
        assert_eq!(res, Err(Error::Timeout));
        assert_eq!(sent, 1);
    }
}

use core::marker::PhantomData;

use atat::asynch::AtatClient;
use embassy_time::{with_timeout, Duration, Timer};

use super::{
    network::{self, Readiness},
    setup::{self, SetupOutcome},
    state::DeviceState,
    AtHandle,
};
use crate::command::AT;
use crate::config::ProvisioningConfig;
use crate::error::Error;

/// Drives a module towards the configuration given by `C`, and gates data
/// sessions on network registration.
pub struct Provisioner<'d, AT: AtatClient, C: ProvisioningConfig> {
    at: AtHandle<'d, AT>,
    state: DeviceState,
    _config: PhantomData<C>,
}

impl<'d, AT: AtatClient, C: ProvisioningConfig> Provisioner<'d, AT, C> {
    pub fn new(at: AtHandle<'d, AT>) -> Self {
        Self {
            at,
            state: DeviceState::new(),
            _config: PhantomData,
        }
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Operator to select manually when `C::CACHE_OPERATOR` is set, e.g.
    /// restored from non-volatile storage.
    pub fn set_cached_operator(&mut self, operator: Option<u32>) {
        self.state.operator = operator;
    }

    /// Run a single setup pass over MNO profile, PSM, RAT and band mask.
    ///
    /// On [`SetupOutcome::NeedsRestart`] the module is restarting, and the
    /// caller must wait for it and run setup again.
    pub async fn setup_hook(&mut self) -> Result<SetupOutcome, Error> {
        setup::setup_hook::<AT, C>(&self.at, &mut self.state).await
    }

    /// Check network registration ahead of a data session.
    pub async fn pre_connect_hook(&mut self) -> Result<Readiness, Error> {
        network::pre_connect_hook::<AT, C>(&self.at, &mut self.state).await
    }

    pub async fn poll_network_status(&mut self) -> Result<Readiness, Error> {
        network::poll_network_status::<AT, C>(&self.at, &mut self.state).await
    }

    /// Run setup until the module is fully configured, waiting for the
    /// module after every restart. Gives up after `C::MAX_SETUP_ATTEMPTS`
    /// passes, running at least one.
    pub async fn provision(&mut self) -> Result<(), Error> {
        let max_attempts = C::MAX_SETUP_ATTEMPTS.max(1);

        for attempt in 1..=max_attempts {
            match self.setup_hook().await? {
                SetupOutcome::Ready => {
                    info!("Module configured after {} setup pass(es)", attempt);
                    return Ok(());
                }
                SetupOutcome::NeedsRestart => {
                    warn!(
                        "Module restarting to apply configuration [{}/{}]",
                        attempt, max_attempts
                    );
                    self.wait_for_restart().await?;
                }
            }
        }

        error!(
            "Module configuration did not settle in {} passes",
            max_attempts
        );
        Err(Error::ConvergenceExhausted)
    }

    /// Poll `AT` until the module answers again.
    async fn wait_for_restart(&mut self) -> Result<(), Error> {
        with_timeout(C::RESYNC_TIMEOUT, async {
            loop {
                if self.at.send(&AT, C::QUERY_TIMEOUT).await.is_ok() {
                    break;
                }
                Timer::after(Duration::from_millis(100)).await;
            }
        })
        .await
        .map_err(|_| {
            error!("Module did not come back after restart");
            Error::RestartTimeout
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MockModem, Reply, TestConfig};
    use embassy_futures::block_on;
    use embassy_sync::{blocking_mutex::raw::NoopRawMutex, mutex::Mutex};

    #[test]
    fn provisions_after_restart() {
        let modem = MockModem::converged()
            .set_reply("AT+URAT?", Reply::Line("+URAT: 8"))
            .reply("AT+URAT?", Reply::Line("+URAT: 7"));
        let client = Mutex::<NoopRawMutex, _>::new(modem);
        let mut provisioner = Provisioner::<_, TestConfig>::new(AtHandle::new(&client));

        assert_eq!(block_on(provisioner.provision()), Ok(()));
        assert_eq!(provisioner.state().rat.as_str(), "7");
        assert_eq!(provisioner.state().operator, Some(24008));

        let modem = block_on(client.lock());
        assert_eq!(modem.count("AT+URAT=7"), 1);
        assert_eq!(modem.count("AT"), 1);
        assert_eq!(modem.count("AT+UMNOPROF?"), 2);
        assert_eq!(modem.count("AT+COPS=1,2,\"24008\""), 1);
    }

    #[test]
    fn gives_up_on_module_that_never_settles() {
        let modem = MockModem::converged().set_reply("AT+UMNOPROF?", Reply::Line("+UMNOPROF: 1"));
        let client = Mutex::<NoopRawMutex, _>::new(modem);
        let mut provisioner = Provisioner::<_, TestConfig>::new(AtHandle::new(&client));

        assert_eq!(
            block_on(provisioner.provision()),
            Err(Error::ConvergenceExhausted)
        );

        let modem = block_on(client.lock());
        assert_eq!(
            modem.count("AT+UMNOPROF=100"),
            TestConfig::MAX_SETUP_ATTEMPTS as usize
        );
        assert_eq!(modem.count("AT+CPSMS?"), 0);
    }

    #[test]
    fn silent_module_after_restart() {
        let modem = MockModem::converged()
            .set_reply("AT+CPSMS?", Reply::Line("+CPSMS: 1,,,"))
            .reply("AT", Reply::Timeout);
        let client = Mutex::<NoopRawMutex, _>::new(modem);
        let mut provisioner = Provisioner::<_, TestConfig>::new(AtHandle::new(&client));

        assert_eq!(block_on(provisioner.provision()), Err(Error::RestartTimeout));
        assert_eq!(block_on(client.lock()).count("AT+CPSMS=0"), 1);
    }

    #[test]
    fn setup_failure_is_returned() {
        let modem = MockModem::converged().set_reply("AT+UBANDMASK?", Reply::Error);
        let client = Mutex::<NoopRawMutex, _>::new(modem);
        let mut provisioner = Provisioner::<_, TestConfig>::new(AtHandle::new(&client));

        assert_eq!(
            block_on(provisioner.provision()),
            Err(Error::Atat(atat::Error::Error))
        );
    }

    #[test]
    fn pre_connect_reports_registration() {
        let client = Mutex::<NoopRawMutex, _>::new(MockModem::converged());
        let mut provisioner = Provisioner::<_, TestConfig>::new(AtHandle::new(&client));

        assert_eq!(block_on(provisioner.pre_connect_hook()), Ok(Readiness::Ready));
        assert_eq!(provisioner.state().signal_strength, 4);
    }

    struct NoRetryConfig;

    impl ProvisioningConfig for NoRetryConfig {
        const MNO_PROFILE: Option<u16> = Some(100);
        const RAT: &'static str = "7";
        const BANDMASK_CAT_M1: u64 = 524420;
        const BANDMASK_NB_IOT: u64 = 185473183;
        const MAX_SETUP_ATTEMPTS: u8 = 0;

        const QUERY_TIMEOUT: Duration = Duration::from_millis(20);
        const RESTART_SETTLE_TIME: Duration = Duration::from_ticks(0);
        const RESYNC_TIMEOUT: Duration = Duration::from_millis(50);
    }

    #[test]
    fn zero_attempts_still_runs_one_pass() {
        let client = Mutex::<NoopRawMutex, _>::new(MockModem::converged());
        let mut provisioner = Provisioner::<_, NoRetryConfig>::new(AtHandle::new(&client));

        assert_eq!(block_on(provisioner.provision()), Ok(()));
        assert_eq!(block_on(client.lock()).count("AT+UMNOPROF?"), 1);
    }

    #[test]
    fn zero_attempts_gives_up_after_one_restart() {
        let modem = MockModem::converged().set_reply("AT+UMNOPROF?", Reply::Line("+UMNOPROF: 1"));
        let client = Mutex::<NoopRawMutex, _>::new(modem);
        let mut provisioner = Provisioner::<_, NoRetryConfig>::new(AtHandle::new(&client));

        assert_eq!(
            block_on(provisioner.provision()),
            Err(Error::ConvergenceExhausted)
        );
        assert_eq!(block_on(client.lock()).count("AT+UMNOPROF=100"), 1);
    }
}

pub mod network;
pub mod provisioner;
pub mod setup;
pub mod state;

use atat::{asynch::AtatClient, AtatCmd};
use embassy_sync::{
    blocking_mutex::raw::NoopRawMutex,
    mutex::{Mutex, MutexGuard},
};
use embassy_time::{with_timeout, Duration};

use crate::error::Error;

/// Shared access to the AT client.
///
/// Every exchange locks the client for its own duration and carries its own
/// deadline, so a late reply can never complete a later request.
pub struct AtHandle<'d, AT: AtatClient>(&'d Mutex<NoopRawMutex, AT>);

impl<'d, AT: AtatClient> AtHandle<'d, AT> {
    pub fn new(client: &'d Mutex<NoopRawMutex, AT>) -> Self {
        Self(client)
    }

    /// Send a single command, failing with [`Error::Timeout`] if no final
    /// result arrives within `timeout`.
    pub(crate) async fn send<Cmd: AtatCmd>(
        &self,
        cmd: &Cmd,
        timeout: Duration,
    ) -> Result<Cmd::Response, Error> {
        let client = self.0;
        with_timeout(timeout, async { client.lock().await.send(cmd).await })
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Error::from)
    }

    /// Lock the client for a batch of commands that must not be interleaved
    /// with other traffic. Each command of the batch gets its own `timeout`.
    pub(crate) async fn session(&self, timeout: Duration) -> Session<'d, AT> {
        Session {
            client: self.0.lock().await,
            timeout,
        }
    }
}

pub(crate) struct Session<'d, AT: AtatClient> {
    client: MutexGuard<'d, NoopRawMutex, AT>,
    timeout: Duration,
}

impl<AT: AtatClient> Session<'_, AT> {
    pub(crate) async fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<Cmd::Response, Error> {
        with_timeout(self.timeout, self.client.send(cmd))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Error::from)
    }
}

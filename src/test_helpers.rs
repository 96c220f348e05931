//! Scripted AT client for driving the async code in tests.

use std::collections::VecDeque;
use std::string::{String, ToString};
use std::vec::Vec;

use atat::{asynch::AtatClient, AtatCmd};
use embassy_time::{Duration, Timer};

use crate::config::ProvisioningConfig;

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// Information response followed by `OK`
    Line(&'static str),
    /// Bare `OK`
    Ok,
    /// `ERROR`
    Error,
    /// Report a transport timeout
    Timeout,
    /// Never answer
    Silent,
}

/// Answers each command line (without `\r\n`) from its own queue of replies.
/// The last reply in a queue repeats; commands without a queue get `OK`.
#[derive(Default)]
pub struct MockModem {
    replies: Vec<(&'static str, VecDeque<Reply>)>,
    pub sent: Vec<String>,
}

impl MockModem {
    pub fn new() -> Self {
        Self::default()
    }

    /// A module whose configuration already matches [`TestConfig`].
    pub fn converged() -> Self {
        Self::new()
            .reply("AT+UMNOPROF?", Reply::Line("+UMNOPROF: 100"))
            .reply("AT+CPSMS?", Reply::Line("+CPSMS: 0,,,\"01000011\",\"00000011\""))
            .reply("AT+URAT?", Reply::Line("+URAT: 7"))
            .reply("AT+UBANDMASK?", Reply::Line("+UBANDMASK: 0,524420,1,185473183"))
            .reply("AT+COPS?", Reply::Line("+COPS: 0,2,\"24008\",7"))
            .reply("AT+CIND?", Reply::Line("+CIND: 5,4,1,0,0,0,0,0,0,0,0,1"))
    }

    /// Queue `reply` for `cmd`, behind any replies already queued.
    pub fn reply(mut self, cmd: &'static str, reply: Reply) -> Self {
        match self.replies.iter_mut().find(|(c, _)| *c == cmd) {
            Some((_, queue)) => queue.push_back(reply),
            None => self.replies.push((cmd, VecDeque::from([reply]))),
        }
        self
    }

    /// Replace all queued replies for `cmd` with `reply`.
    pub fn set_reply(mut self, cmd: &'static str, reply: Reply) -> Self {
        self.replies.retain(|(c, _)| *c != cmd);
        self.reply(cmd, reply)
    }

    pub fn count(&self, cmd: &str) -> usize {
        self.sent.iter().filter(|c| *c == cmd).count()
    }

    /// The tail of the log, starting at the last occurrence of `from`.
    pub fn sent_from(&self, from: &str) -> Vec<&str> {
        let start = self.sent.iter().rposition(|c| c == from).unwrap_or(0);
        self.sent[start..].iter().map(String::as_str).collect()
    }

    fn next_reply(&mut self, cmd: &str) -> Reply {
        match self.replies.iter_mut().find(|(c, _)| *c == cmd) {
            Some((_, queue)) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some((_, queue)) => *queue.front().unwrap(),
            None => Reply::Ok,
        }
    }
}

impl AtatClient for MockModem {
    async fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<Cmd::Response, atat::Error> {
        let mut buf = std::vec![0u8; Cmd::MAX_LEN];
        let len = cmd.write(&mut buf);
        let line = std::str::from_utf8(&buf[..len])
            .unwrap()
            .trim_end()
            .to_string();

        let reply = self.next_reply(&line);
        self.sent.push(line);

        match reply {
            Reply::Line(resp) => cmd.parse(Ok(resp.as_bytes())),
            Reply::Ok => cmd.parse(Ok(&b""[..])),
            Reply::Error => Err(atat::Error::Error),
            Reply::Timeout => Err(atat::Error::Timeout),
            Reply::Silent => core::future::pending().await,
        }
    }
}

/// Answers like the wrapped [`MockModem`], each reply `delay` late.
pub struct SlowModem {
    pub modem: MockModem,
    pub delay: Duration,
}

impl AtatClient for SlowModem {
    async fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<Cmd::Response, atat::Error> {
        Timer::after(self.delay).await;
        self.modem.send(cmd).await
    }
}

pub struct TestConfig;

impl ProvisioningConfig for TestConfig {
    const MNO_PROFILE: Option<u16> = Some(100);
    const RAT: &'static str = "7";
    const BANDMASK_CAT_M1: u64 = 524420;
    const BANDMASK_NB_IOT: u64 = 185473183;

    const MAX_SETUP_ATTEMPTS: u8 = 3;

    const QUERY_TIMEOUT: Duration = Duration::from_millis(20);
    const APPLY_TIMEOUT: Duration = Duration::from_millis(20);
    const INDICATOR_TIMEOUT: Duration = Duration::from_millis(20);
    const RESTART_SETTLE_TIME: Duration = Duration::from_ticks(0);
    const PRE_CONNECT_SETTLE_TIME: Duration = Duration::from_ticks(0);
    const RESYNC_TIMEOUT: Duration = Duration::from_millis(50);
}

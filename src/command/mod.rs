//! AT Commands for u-blox SARA-R4 provisioning\
//! Following the [u-blox SARA-R4 AT commands manual](https://www.u-blox.com/sites/default/files/SARA-R4_ATCommands_%28UBX-17003787%29.pdf)

pub mod control;
pub mod mobile_control;
pub mod network_service;
pub mod parse;

use atat::atat_derive::{AtatCmd, AtatResp};

#[derive(Clone, AtatResp)]
pub struct NoResponse;

#[derive(Clone, AtatCmd)]
#[at_cmd("", NoResponse)]
pub struct AT;

/// Writes `AT<parts...>\r\n` into `buf`, returning the number of bytes
/// written.
///
/// Used by the commands that carry unquoted free-form arguments or whose
/// replies need the positional parsers in [`parse`], and therefore implement
/// [`atat::AtatCmd`] by hand.
pub(crate) fn write_command(buf: &mut [u8], parts: &[&[u8]]) -> usize {
    let mut len = 0;
    for part in core::iter::once(&b"AT"[..])
        .chain(parts.iter().copied())
        .chain(core::iter::once(&b"\r\n"[..]))
    {
        buf[len..len + part.len()].copy_from_slice(part);
        len += part.len();
    }
    len
}

/// Implements [`atat::AtatCmd`] for a read command whose response is decoded
/// by one of the [`parse`] functions.
macro_rules! query_cmd {
    ($cmd:ty, $at:literal, $resp:ty, $timeout_ms:expr) => {
        impl atat::AtatCmd for $cmd {
            type Response = $resp;

            const MAX_LEN: usize = $at.len() + 4;
            const MAX_TIMEOUT_MS: u32 = $timeout_ms;

            fn write(&self, buf: &mut [u8]) -> usize {
                $crate::command::write_command(buf, &[$at.as_bytes()])
            }

            fn parse(
                &self,
                resp: Result<&[u8], atat::InternalError>,
            ) -> Result<Self::Response, atat::Error> {
                let line = resp.map_err(atat::Error::from)?;
                <$resp>::parse(line).map_err(|_| atat::Error::Parse)
            }
        }
    };
}

pub(crate) use query_cmd;

//! Decoders for the terse, positional replies of the provisioning queries.
//!
//! Every parser takes the full response line as handed over by the digester
//! (echo and final result code already stripped, e.g. `+URAT: 7,8`) and
//! either returns the decoded value or [`ParseError`]. Nothing here touches
//! device state.

use heapless::String;

/// Maximum number of characters kept from a `+URAT` reply.
pub const RAT_MAX_LEN: usize = 15;

/// Number of radio access technologies with a band mask: Cat M1 and NB-IoT.
pub const RAT_COUNT: usize = 2;

/// Number of fields in a `+CIND` reply.
pub const INDICATOR_COUNT: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError;

/// Indicator fields of a `+CIND` reply that the driver cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Indicators {
    /// Position 1, "signal"
    pub signal: i32,
    /// Position 2, "service": 1 when registered to the network
    pub service: i32,
    /// Position 6, "roam": `None` when the module reports neither 0 nor 1
    pub roaming: Option<bool>,
    /// Position 11, "simind"
    pub sim_status: i32,
}

fn line_str(line: &[u8]) -> Result<&str, ParseError> {
    core::str::from_utf8(line)
        .map(str::trim)
        .map_err(|_| ParseError)
}

fn after_first_space(line: &str) -> &str {
    line.split_once(' ').map_or(line, |(_, rest)| rest)
}

fn int(token: &str) -> Result<i64, ParseError> {
    token.trim().parse().map_err(|_| ParseError)
}

/// `+UMNOPROF: <profile>`
///
/// A profile of `-1` decodes to `None`.
pub fn mno_profile(line: &[u8]) -> Result<Option<u16>, ParseError> {
    let (_, value) = line_str(line)?.split_once(':').ok_or(ParseError)?;
    let value = value.strip_prefix(' ').ok_or(ParseError)?;

    match int(value)? {
        -1 => Ok(None),
        profile => u16::try_from(profile)
            .map(Some)
            .map_err(|_| ParseError),
    }
}

/// `+CPSMS: <mode>[,...]`
///
/// Only the first character of `<mode>` is looked at.
pub fn psm_enabled(line: &[u8]) -> Result<bool, ParseError> {
    let (_, value) = line_str(line)?.split_once(':').ok_or(ParseError)?;
    let value = value.strip_prefix(' ').unwrap_or(value);
    let mode = value.bytes().next().ok_or(ParseError)?;

    Ok(mode.wrapping_sub(b'0') == 1)
}

/// `+URAT: <rat>[,<rat>...]`
///
/// Everything after the first space, kept verbatim and cut at
/// [`RAT_MAX_LEN`] characters.
pub fn rat(line: &[u8]) -> Result<String<RAT_MAX_LEN>, ParseError> {
    let mut rat = String::new();
    for c in after_first_space(line_str(line)?).chars() {
        if rat.push(c).is_err() {
            break;
        }
    }
    Ok(rat)
}

/// `+UBANDMASK: <rat>,<mask>[,<rat>,<mask>...]`
///
/// Returns the mask of every RAT index below [`RAT_COUNT`]; pairs for any
/// other index are skipped.
pub fn band_masks(line: &[u8]) -> Result<[Option<u64>; RAT_COUNT], ParseError> {
    let mut masks = [None; RAT_COUNT];
    let mut tokens = after_first_space(line_str(line)?).split(',');

    while let Some(rat) = tokens.next() {
        let rat = int(rat)?;
        let mask = tokens
            .next()
            .ok_or(ParseError)?
            .trim()
            .parse::<u64>()
            .map_err(|_| ParseError)?;

        match usize::try_from(rat) {
            Ok(index) if index < RAT_COUNT => masks[index] = Some(mask),
            _ => trace!("Ignoring band mask for RAT {}", rat),
        }
    }

    Ok(masks)
}

/// `+CIND: <battchg>,<signal>,<service>,<sounder>,<message>,<call>,<roam>,
/// <smsfull>,<gprs>,<callsetup>,<callheld>,<simind>`
///
/// The `+CIND:` prefix is optional.
pub fn indicators(line: &[u8]) -> Result<Indicators, ParseError> {
    let line = line_str(line)?;
    let fields = line.split_once(':').map_or(line, |(_, rest)| rest);

    let mut values = [0i32; INDICATOR_COUNT];
    let mut count = 0;
    for (position, token) in fields.split(',').enumerate() {
        let value = i32::try_from(int(token)?).map_err(|_| ParseError)?;
        if let Some(slot) = values.get_mut(position) {
            *slot = value;
        }
        count += 1;
    }

    if count < INDICATOR_COUNT {
        return Err(ParseError);
    }

    Ok(Indicators {
        signal: values[1],
        service: values[2],
        roaming: match values[6] {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        },
        sim_status: values[11],
    })
}

/// `+COPS: <mode>[,<format>,<oper>[,<AcT>]]`
///
/// The numeric operator id, if the module reports the operator in numeric
/// format (`<format>` 2).
pub fn operator(line: &[u8]) -> Result<Option<u32>, ParseError> {
    let (_, fields) = line_str(line)?.split_once(':').ok_or(ParseError)?;
    let mut fields = fields.split(',').map(str::trim);

    int(fields.next().ok_or(ParseError)?)?;

    match (fields.next(), fields.next()) {
        (Some("2"), Some(oper)) => oper
            .trim_matches('"')
            .parse()
            .map(Some)
            .map_err(|_| ParseError),
        _ => Ok(None),
    }
}

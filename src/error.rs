#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// No matching response arrived within the deadline of the exchange.
    Timeout,

    /// The response prefix matched, but the payload could not be parsed.
    MalformedResponse,

    /// The module did not answer `AT` in time after a configuration restart.
    RestartTimeout,

    /// The module reported a configuration change on every setup attempt.
    ConvergenceExhausted,

    Atat(atat::Error),
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter<'_>) {
        match self {
            Self::Timeout => defmt::write!(f, "Timeout"),
            Self::MalformedResponse => defmt::write!(f, "MalformedResponse"),
            Self::RestartTimeout => defmt::write!(f, "RestartTimeout"),
            Self::ConvergenceExhausted => defmt::write!(f, "ConvergenceExhausted"),
            Self::Atat(e) => defmt::write!(f, "Atat({:?})", e),
        }
    }
}

impl From<atat::Error> for Error {
    fn from(e: atat::Error) -> Self {
        match e {
            atat::Error::Timeout => Self::Timeout,
            atat::Error::Parse => Self::MalformedResponse,
            e => Self::Atat(e),
        }
    }
}

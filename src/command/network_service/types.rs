//! Argument and parameter types used by Network service Commands and Responses
use atat::atat_derive::AtatEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum OperatorSelectionMode {
    /// • 0 (default value and factory-programmed value): automatic (<oper> field is ignored)
    Automatic = 0,
    /// • 1: manual
    Manual = 1,
    /// • 2: deregister from network
    Deregister = 2,
    /// • 3: set only <format>
    FormatOnly = 3,
    /// • 4: manual/automatic
    ManualAutomatic = 4,
}

/// <format> of the operator name in +COPS
pub const OPERATOR_FORMAT_NUMERIC: u8 = 2;

/// 3GPP power saving mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum PowerSavingMode {
    /// • 0 (default value): disable the use of PSM
    Disabled = 0,
    /// • 1: enable the use of PSM
    Enabled = 1,
}

impl From<bool> for PowerSavingMode {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// Radio access technology a band mask applies to, as indexed by +UBANDMASK
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RatIndex {
    /// • 0: LTE Cat M1
    CatM1 = 0,
    /// • 1: NB-IoT
    NbIot = 1,
}

impl RatIndex {
    pub const ALL: [RatIndex; 2] = [RatIndex::CatM1, RatIndex::NbIot];

    pub const fn index(self) -> usize {
        self as usize
    }
}

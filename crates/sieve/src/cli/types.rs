//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::domain::Mode;

/// Operating mode for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Load the whole source and index it by key
    #[value(alias = "in-memory")]
    Materializing,
    /// Filter line by line without keeping the dataset
    #[value(alias = "split")]
    Streaming,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Materializing => Mode::Materializing,
            ModeArg::Streaming => Mode::Streaming,
        }
    }
}

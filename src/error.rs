use thiserror::Error;

/// Errors raised while building diagnostic values from raw producer input.
///
/// Every value type in this crate is total once constructed, so these can
/// only surface at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The raw severity is not exactly one of the known flags. A filter
    /// mask such as `Abort | Error` lands here.
    #[error("invalid severity: {bits:#04x} is not a single severity flag")]
    InvalidSeverity { bits: u8 },

    /// Fewer than four coordinates were supplied for a location.
    #[error("invalid coordinates: expected 4 values, got {len}")]
    InvalidCoordinates { len: usize },

    /// A severity filter expression names something that is not a severity.
    #[error("unknown severity `{0}`")]
    UnknownSeverity(String),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

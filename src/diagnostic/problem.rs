use std::fmt;

use crate::{capability::Adaptable, error::Result, source::Location};

use super::severity::Severity;

/// A single problem found while analyzing a module.
///
/// A [`Problem`] is an immutable value: once the analyzer has built one, it
/// travels unchanged to whichever collector or consumer asks for it. Two
/// problems with the same location, message and severity are equal and hash
/// the same, even when they were built separately.
///
/// Consumers that need a richer view of a problem (an editor marker, a
/// quick-fix) ask for it through [`Adaptable::resolve_capability`]; the
/// problem itself knows nothing about them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    location: Location,
    message: Option<String>,
    severity: Severity,
}

impl Problem {
    /// Creates a problem with no message and the sentinel location.
    ///
    /// Useful when analysis fails before any module context exists.
    pub fn new(severity: Severity) -> Self {
        Problem::at(None, None, severity)
    }

    /// Creates a problem from raw producer coordinates, laid out as
    /// `[begin_line, begin_column, end_line, end_column]`.
    ///
    /// The location is normalized the same way as
    /// [`Location::from_coordinates`].
    pub fn with_coordinates(
        module_name: Option<&str>,
        coordinates: Option<[i32; 4]>,
        message: Option<String>,
        severity: Severity,
    ) -> Self {
        Problem::at(
            Some(Location::from_coordinates(module_name, coordinates)),
            message,
            severity,
        )
    }

    /// Creates a problem at the given location. A missing location is
    /// replaced with [`Location::nil`].
    pub fn at(
        location: Option<Location>,
        message: Option<String>,
        severity: Severity,
    ) -> Self {
        Problem {
            location: location.unwrap_or_default(),
            message,
            severity,
        }
    }

    /// Creates a problem from untyped producer input.
    ///
    /// `severity_bits` must be exactly one severity flag and `coordinates`,
    /// if present, must hold at least four values; anything else is rejected
    /// here rather than stored.
    pub fn from_raw(
        module_name: Option<&str>,
        coordinates: Option<&[i32]>,
        message: Option<String>,
        severity_bits: u8,
    ) -> Result<Self> {
        let severity = Severity::from_bits(severity_bits)?;
        let location = Location::try_from_slice(module_name, coordinates)?;
        Ok(Problem::at(Some(location), message, severity))
    }

    pub fn abort(location: Location, message: impl Into<String>) -> Self {
        Problem::at(Some(location), Some(message.into()), Severity::Abort)
    }

    pub fn error(location: Location, message: impl Into<String>) -> Self {
        Problem::at(Some(location), Some(message.into()), Severity::Error)
    }

    pub fn warning(location: Location, message: impl Into<String>) -> Self {
        Problem::at(Some(location), Some(message.into()), Severity::Warning)
    }

    /// Returns where this problem was found.
    #[inline]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Returns the message, if the producer supplied one.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Describes the location of this problem, e.g.
    /// `from line 3, column 7 to line 3, column 15 of module Spec`.
    ///
    /// Never fails: a sentinel location renders its `-1` coordinates and
    /// unknown module name literally.
    pub fn formatted_location(&self) -> String {
        self.location.to_string()
    }
}

impl Adaptable for Problem {}

/// Formats as `error: unexpected token (from line 3, column 7 to ...)`.
impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => {
                write!(f, "{}: {} ({})", self.severity, message, self.location)
            }
            None => write!(f, "{} ({})", self.severity, self.location),
        }
    }
}

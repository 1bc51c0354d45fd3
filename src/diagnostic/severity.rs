use std::{cmp::Ordering, fmt, ops::{BitAnd, BitOr}, str::FromStr};

use crate::error::{Error, Result};

/// How serious a single problem is.
///
/// Each variant is one bit of a flag domain, so that filters over severities
/// can be expressed as a [`SeverityMask`]. A problem always carries exactly
/// one severity; "all of them" only exists as a mask.
///
/// Severities are ordered by gravity: `Warning < Error < Abort`. The bit
/// values run the other way and play no part in the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Severity {
    /// Analysis could not continue.
    Abort = 16,

    /// The input is wrong.
    Error = 32,

    /// The input is suspicious but usable.
    Warning = 64,
}

impl Severity {
    /// All severities, from the most to the least severe.
    pub const VARIANTS: [Severity; 3] =
        [Severity::Abort, Severity::Error, Severity::Warning];

    /// Returns the flag bit of this severity.
    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Converts a raw flag value coming from a producer.
    ///
    /// Only a single known flag is accepted. Zero, unknown bits, and masks
    /// combining several flags (including [`SeverityMask::ALL`]) are
    /// rejected with [`Error::InvalidSeverity`].
    pub fn from_bits(bits: u8) -> Result<Self> {
        Severity::VARIANTS
            .into_iter()
            .find(|severity| severity.bits() == bits)
            .ok_or(Error::InvalidSeverity { bits })
    }

    /// Returns the lower-case name of this severity.
    pub fn name(self) -> &'static str {
        match self {
            Severity::Abort => "abort",
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Severity::Warning => 0,
            Severity::Error => 1,
            Severity::Abort => 2,
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Severity {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self> {
        Severity::from_bits(bits)
    }
}

/// A set of severities, used by consumers to filter problems.
///
/// Masks are built by or-ing severities together and tested with
/// [`SeverityMask::contains`]:
///
/// ```
/// use problem::{Severity, SeverityMask};
///
/// let mask = Severity::Error | Severity::Warning;
/// assert!(mask.contains(Severity::Warning));
/// assert!(!mask.contains(Severity::Abort));
/// ```
///
/// Serialized masks are plain integers and go through
/// [`SeverityMask::from_bits`] when read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u8", into = "u8"))]
pub struct SeverityMask {
    bits: u8,
}

impl SeverityMask {
    /// The empty mask.
    pub const NONE: SeverityMask = SeverityMask { bits: 0 };

    /// Every severity: `Abort | Error | Warning`.
    pub const ALL: SeverityMask = SeverityMask {
        bits: Severity::Abort as u8
            | Severity::Error as u8
            | Severity::Warning as u8,
    };

    /// Builds a mask from raw bits. Bits that are not a severity flag are
    /// dropped.
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        SeverityMask { bits: bits & Self::ALL.bits }
    }

    /// Returns the raw bits of this mask.
    #[inline]
    pub fn bits(self) -> u8 {
        self.bits
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if `severity` is part of this mask.
    #[inline]
    pub fn contains(self, severity: Severity) -> bool {
        self.bits & severity.bits() != 0
    }

    /// Adds `severity` to this mask.
    #[inline]
    pub fn insert(&mut self, severity: Severity) {
        self.bits |= severity.bits();
    }

    /// Iterates over the severities in this mask, most severe first.
    pub fn iter(self) -> impl Iterator<Item = Severity> {
        Severity::VARIANTS.into_iter().filter(move |s| self.contains(*s))
    }

    /// Returns the most severe member of this mask.
    ///
    /// This is how a composite value is normalized to a single severity:
    /// `Abort` wins over `Error`, which wins over `Warning`.
    pub fn most_severe(self) -> Option<Severity> {
        self.iter().max()
    }
}

impl From<Severity> for SeverityMask {
    fn from(severity: Severity) -> Self {
        SeverityMask { bits: severity.bits() }
    }
}

impl From<u8> for SeverityMask {
    fn from(bits: u8) -> Self {
        SeverityMask::from_bits(bits)
    }
}

impl From<SeverityMask> for u8 {
    fn from(mask: SeverityMask) -> Self {
        mask.bits
    }
}

impl<T: Into<SeverityMask>> BitOr<T> for SeverityMask {
    type Output = SeverityMask;

    fn bitor(self, rhs: T) -> SeverityMask {
        SeverityMask { bits: self.bits | rhs.into().bits }
    }
}

impl<T: Into<SeverityMask>> BitOr<T> for Severity {
    type Output = SeverityMask;

    fn bitor(self, rhs: T) -> SeverityMask {
        SeverityMask::from(self) | rhs
    }
}

impl<T: Into<SeverityMask>> BitAnd<T> for SeverityMask {
    type Output = SeverityMask;

    fn bitand(self, rhs: T) -> SeverityMask {
        SeverityMask { bits: self.bits & rhs.into().bits }
    }
}

impl FromIterator<Severity> for SeverityMask {
    fn from_iter<I: IntoIterator<Item = Severity>>(iter: I) -> Self {
        let mut mask = SeverityMask::NONE;
        for severity in iter {
            mask.insert(severity);
        }
        mask
    }
}

/// Parses filter expressions such as `error|warning`, `all` or `none`.
///
/// Names are case-insensitive and may be padded with whitespace. An empty
/// string is the empty mask.
impl FromStr for SeverityMask {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut mask = SeverityMask::NONE;
        for part in s.split('|').map(str::trim).filter(|p| !p.is_empty()) {
            mask = match part.to_ascii_lowercase().as_str() {
                "all" => mask | SeverityMask::ALL,
                "none" => mask,
                "abort" => mask | Severity::Abort,
                "error" => mask | Severity::Error,
                "warning" => mask | Severity::Warning,
                _ => return Err(Error::UnknownSeverity(part.to_owned())),
            };
        }
        Ok(mask)
    }
}

impl fmt::Display for SeverityMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == SeverityMask::ALL {
            return f.write_str("all");
        }
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for severity in self.iter() {
            if !first {
                f.write_str("|")?;
            }
            first = false;
            f.write_str(severity.name())?;
        }
        Ok(())
    }
}

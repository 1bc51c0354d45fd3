use std::fmt;

use crate::{capability::Adaptable, error::{Error, Result}};

use super::pos::Position;

/// Represents a span of source text inside a named module.
///
/// A [`Location`] is always fully populated. When the analyzer cannot tell
/// where a problem is, it uses [`Location::nil`]: the module name is
/// [`Location::UNKNOWN_MODULE`] and all four coordinates are `-1`. There is
/// no "missing location"; downstream formatting and equality rely on these
/// literal sentinel values.
///
/// Equality and hashing are structural over the module name and the four
/// coordinates. The module name is compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// The name of the module this span belongs to.
    module_name: String,

    /// Where the span starts.
    begin: Position,

    /// Where the span ends.
    end: Position,
}

impl Location {
    /// The module name used when the producer does not know which module a
    /// problem belongs to.
    pub const UNKNOWN_MODULE: &'static str = "-- unknown --";

    /// Creates a location from a module name and four coordinates.
    ///
    /// Any integer is accepted, including the `-1` unknown marker. A missing
    /// module name is replaced with [`Location::UNKNOWN_MODULE`].
    pub fn new(
        module_name: Option<&str>,
        begin_line: i32,
        begin_column: i32,
        end_line: i32,
        end_column: i32,
    ) -> Self {
        Location {
            module_name: module_name
                .unwrap_or(Self::UNKNOWN_MODULE)
                .to_owned(),
            begin: Position::new(begin_line, begin_column),
            end: Position::new(end_line, end_column),
        }
    }

    /// Creates a location from a module name and a coordinate array laid
    /// out as `[begin_line, begin_column, end_line, end_column]`.
    ///
    /// Missing coordinates default to `[-1, -1, -1, -1]`.
    pub fn from_coordinates(
        module_name: Option<&str>,
        coordinates: Option<[i32; 4]>,
    ) -> Self {
        let [begin_line, begin_column, end_line, end_column] =
            coordinates.unwrap_or([Position::UNKNOWN_COORD; 4]);
        Location::new(module_name, begin_line, begin_column, end_line, end_column)
    }

    /// Like [`Location::from_coordinates`], but for coordinates whose length
    /// is only known at runtime.
    ///
    /// A slice shorter than four elements is rejected with
    /// [`Error::InvalidCoordinates`]. Elements past the fourth are ignored.
    pub fn try_from_slice(
        module_name: Option<&str>,
        coordinates: Option<&[i32]>,
    ) -> Result<Self> {
        let coordinates = match coordinates {
            None => None,
            Some(&[begin_line, begin_column, end_line, end_column, ..]) => {
                Some([begin_line, begin_column, end_line, end_column])
            }
            Some(short) => {
                return Err(Error::InvalidCoordinates { len: short.len() })
            }
        };
        Ok(Location::from_coordinates(module_name, coordinates))
    }

    /// Returns the sentinel location used when no position can be
    /// determined.
    ///
    /// Every call returns an equal value.
    pub fn nil() -> Self {
        Location {
            module_name: Self::UNKNOWN_MODULE.to_owned(),
            begin: Position::UNKNOWN,
            end: Position::UNKNOWN,
        }
    }

    /// Returns `true` if this location is structurally equal to
    /// [`Location::nil`].
    pub fn is_nil(&self) -> bool {
        self.module_name == Self::UNKNOWN_MODULE
            && self.begin.is_unknown()
            && self.end.is_unknown()
    }

    /// Returns the module name of this location.
    #[inline]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Returns the start of the span.
    #[inline]
    pub fn begin(&self) -> Position {
        self.begin
    }

    /// Returns the end of the span.
    #[inline]
    pub fn end(&self) -> Position {
        self.end
    }

    #[inline]
    pub fn begin_line(&self) -> i32 {
        self.begin.line()
    }

    #[inline]
    pub fn begin_column(&self) -> i32 {
        self.begin.column()
    }

    #[inline]
    pub fn end_line(&self) -> i32 {
        self.end.line()
    }

    #[inline]
    pub fn end_column(&self) -> i32 {
        self.end.column()
    }

    /// Returns the coordinates in the order they were supplied.
    pub fn coordinates(&self) -> [i32; 4] {
        [
            self.begin_line(),
            self.begin_column(),
            self.end_line(),
            self.end_column(),
        ]
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::nil()
    }
}

impl Adaptable for Location {}

/// Formats as `from line 3, column 7 to line 3, column 15 of module Spec`.
///
/// Unknown coordinates are printed literally as `-1`.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "from line {}, column {} to line {}, column {} of module {}",
            self.begin_line(),
            self.begin_column(),
            self.end_line(),
            self.end_column(),
            self.module_name,
        )
    }
}

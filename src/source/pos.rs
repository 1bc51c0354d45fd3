/// Represents one end of a source span, as a line and a column.
///
/// The analyzer that discovers a problem decides whether lines and columns
/// are 0-based or 1-based; a [`Position`] stores whatever it is given. The
/// only reserved value is `-1`, which means "unknown". [`Position::UNKNOWN`]
/// has both components set to it.
///
/// Signed integers are used on purpose so that the unknown marker survives
/// unchanged into formatted output and equality checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    line: i32,
    column: i32,
}

impl Position {
    /// The coordinate value used when a line or column is not known.
    pub const UNKNOWN_COORD: i32 = -1;

    /// A position whose line and column are both unknown.
    pub const UNKNOWN: Position = Position {
        line: Self::UNKNOWN_COORD,
        column: Self::UNKNOWN_COORD,
    };

    /// Creates a new [`Position`] from a line and a column.
    #[inline]
    pub fn new(line: i32, column: i32) -> Self {
        Position { line, column }
    }

    /// Returns the line of this position.
    #[inline]
    pub fn line(&self) -> i32 {
        self.line
    }

    /// Returns the column of this position.
    #[inline]
    pub fn column(&self) -> i32 {
        self.column
    }

    /// Returns `true` if both the line and the column are unknown.
    #[inline]
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

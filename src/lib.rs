//! Diagnostic values for language tools.
//!
//! An analyzer reports what it finds as [`Problem`]s: a message, a
//! [`Severity`] and a [`Location`] inside a module. Locations are always
//! populated; when nothing is known about where a problem is, the sentinel
//! [`Location::nil`] is used instead.
//!
//! ```
//! use problem::{Problem, Severity};
//!
//! let problem = Problem::with_coordinates(
//!     None,
//!     Some([3, 7, 3, 15]),
//!     Some("unexpected token".to_owned()),
//!     Severity::Error,
//! );
//! assert_eq!(
//!     problem.formatted_location(),
//!     "from line 3, column 7 to line 3, column 15 of module -- unknown --",
//! );
//! ```
//!
//! Consumers that need a richer view of a problem register a provider on
//! the [`CapabilityRegistry`] and resolve it through [`Adaptable`].

pub mod capability;
pub mod diagnostic;
pub mod error;
pub mod source;

pub use capability::{Adaptable, CapabilityRegistry, Resolution};
pub use diagnostic::{Problem, ProblemCollector, Severity, SeverityMask};
pub use error::{Error, Result};
pub use source::{Location, Position};

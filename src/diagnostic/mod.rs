mod collector;
mod problem;
mod severity;

pub use collector::ProblemCollector;
pub use problem::Problem;
pub use severity::{Severity, SeverityMask};

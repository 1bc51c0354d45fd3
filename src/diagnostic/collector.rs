use indexmap::IndexSet;
use tracing::{error, warn};

use crate::source::Location;

use super::{problem::Problem, severity::{Severity, SeverityMask}};

/// Gathers the problems reported while analyzing one or more modules.
///
/// Problems are kept in the order they were reported. A problem equal to one
/// already held is ignored, so re-running a pass does not duplicate output.
#[derive(Debug, Clone, Default)]
pub struct ProblemCollector {
    problems: IndexSet<Problem>,
}

impl ProblemCollector {
    pub fn new() -> Self {
        ProblemCollector {
            problems: IndexSet::new(),
        }
    }

    /// Adds `problem` unless an equal one was already reported. Returns
    /// `true` if it was added.
    pub fn report(&mut self, problem: Problem) -> bool {
        self.problems.insert(problem)
    }

    pub fn abort(&mut self, location: Location, message: String) -> bool {
        self.report(Problem::abort(location, message))
    }

    pub fn error(&mut self, location: Location, message: String) -> bool {
        self.report(Problem::error(location, message))
    }

    pub fn warning(&mut self, location: Location, message: String) -> bool {
        self.report(Problem::warning(location, message))
    }

    /// Drops every problem located in `module_name`, typically before that
    /// module is analyzed again. Returns how many problems were dropped.
    pub fn clear_module(&mut self, module_name: &str) -> usize {
        let before = self.problems.len();
        self.problems
            .retain(|problem| problem.location().module_name() != module_name);
        before - self.problems.len()
    }

    /// Iterates over all problems in the order they were reported.
    pub fn iter(&self) -> impl Iterator<Item = &Problem> {
        self.problems.iter()
    }

    /// Iterates over the problems whose severity is in `mask`.
    pub fn filter(
        &self, mask: SeverityMask,
    ) -> impl Iterator<Item = &Problem> {
        self.problems
            .iter()
            .filter(move |problem| mask.contains(problem.severity()))
    }

    pub fn count(&self, mask: SeverityMask) -> usize {
        self.filter(mask).count()
    }

    /// Returns `true` if any problem is an error or an abort.
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Abort | Severity::Error) > 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Hands the collected problems over, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Problem> {
        std::mem::take(&mut self.problems).into_iter().collect()
    }
}

impl ProblemCollector {
    /// Logs every problem through `tracing`.
    pub fn emit(&self) {
        for problem in &self.problems {
            let module = problem.location().module_name();
            let message = problem.message().unwrap_or("");
            let location = problem.formatted_location();
            match problem.severity() {
                Severity::Abort => {
                    error!(module, %location, "abort: {}", message)
                }
                Severity::Error => error!(module, %location, "{}", message),
                Severity::Warning => warn!(module, %location, "{}", message),
            }
        }
    }
}

impl<'a> IntoIterator for &'a ProblemCollector {
    type Item = &'a Problem;
    type IntoIter = indexmap::set::Iter<'a, Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.problems.iter()
    }
}

impl Extend<Problem> for ProblemCollector {
    fn extend<I: IntoIterator<Item = Problem>>(&mut self, iter: I) {
        for problem in iter {
            self.report(problem);
        }
    }
}

#[cfg(test)]
mod collector_tests {
    use std::{
        collections::HashMap,
        fmt,
        sync::{Arc, Mutex},
    };

    use tracing::{
        field::{Field, Visit},
        Event, Level, Subscriber,
    };
    use tracing_subscriber::{
        layer::{Context, SubscriberExt},
        Layer,
    };

    use crate::source::Position;

    use super::*;

    type Events = Arc<Mutex<Vec<(Level, HashMap<String, String>)>>>;

    /// Records the level and fields of every event it sees.
    struct Capture {
        events: Events,
    }

    struct Fields(HashMap<String, String>);

    impl Visit for Fields {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{:?}", value));
        }
    }

    impl<S: Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = Fields(HashMap::new());
            event.record(&mut fields);
            self.events
                .lock()
                .unwrap()
                .push((*event.metadata().level(), fields.0));
        }
    }

    fn loc(module: &str, line: i32) -> Location {
        Location::new(Some(module), line, 1, line, 10)
    }

    #[test]
    fn test_report_deduplicates() {
        let mut diag = ProblemCollector::new();
        assert!(diag.error(loc("A", 1), "bad".to_owned()));
        assert!(!diag.error(loc("A", 1), "bad".to_owned()));
        assert!(diag.warning(loc("A", 1), "bad".to_owned()));
        assert!(diag.error(loc("A", 2), "bad".to_owned()));
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_order_is_preserved() {
        let mut diag = ProblemCollector::new();
        diag.warning(loc("A", 3), "c".to_owned());
        diag.error(loc("A", 1), "a".to_owned());
        diag.abort(Location::nil(), "b".to_owned());

        let messages: Vec<_> = diag.iter().filter_map(Problem::message).collect();
        assert_eq!(messages, ["c", "a", "b"]);
    }

    #[test]
    fn test_filter_by_mask() {
        let mut diag = ProblemCollector::new();
        diag.warning(loc("A", 1), "w".to_owned());
        diag.error(loc("A", 2), "e".to_owned());
        diag.abort(loc("A", 3), "x".to_owned());

        assert_eq!(diag.count(SeverityMask::ALL), 3);
        assert_eq!(diag.count(SeverityMask::NONE), 0);
        assert_eq!(diag.count(Severity::Error | Severity::Warning), 2);
        assert_eq!(
            diag.filter(Severity::Abort.into())
                .map(Problem::severity)
                .collect::<Vec<_>>(),
            [Severity::Abort],
        );
    }

    #[test]
    fn test_has_errors() {
        let mut diag = ProblemCollector::new();
        assert!(!diag.has_errors());
        diag.warning(loc("A", 1), "w".to_owned());
        assert!(!diag.has_errors());
        diag.abort(Location::nil(), "x".to_owned());
        assert!(diag.has_errors());
    }

    #[test]
    fn test_clear_module() {
        let mut diag = ProblemCollector::new();
        diag.error(loc("A", 1), "a1".to_owned());
        diag.error(loc("B", 1), "b1".to_owned());
        diag.warning(loc("A", 2), "a2".to_owned());

        assert_eq!(diag.clear_module("A"), 2);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.clear_module("A"), 0);

        // A cleared problem can be reported again.
        assert!(diag.error(loc("A", 1), "a1".to_owned()));
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_values_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<Position>();
        assert_send_sync::<Location>();
        assert_send_sync::<Severity>();
        assert_send_sync::<SeverityMask>();
        assert_send_sync::<Problem>();
        assert_send_sync::<ProblemCollector>();
    }

    #[test]
    fn test_take_and_extend() {
        let mut diag = ProblemCollector::new();
        diag.extend([
            Problem::new(Severity::Abort),
            Problem::new(Severity::Abort),
            Problem::error(loc("M", 1), "e"),
        ]);
        assert_eq!(diag.len(), 2);

        let taken = diag.take();
        assert_eq!(taken.len(), 2);
        assert!(diag.is_empty());
        assert!(diag.report(Problem::new(Severity::Abort)));
    }

    #[test]
    fn test_emit_levels_and_fields() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry()
            .with(Capture { events: Arc::clone(&events) });

        let mut diag = ProblemCollector::new();
        diag.warning(loc("A", 1), "w".to_owned());
        diag.error(loc("B", 2), "e".to_owned());
        diag.abort(Location::nil(), "x".to_owned());
        tracing::subscriber::with_default(subscriber, || diag.emit());

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 3);

        let (level, fields) = &events[0];
        assert_eq!(*level, Level::WARN);
        assert_eq!(fields["message"], "w");
        assert_eq!(fields["module"], "A");
        assert_eq!(
            fields["location"],
            "from line 1, column 1 to line 1, column 10 of module A",
        );

        let (level, fields) = &events[1];
        assert_eq!(*level, Level::ERROR);
        assert_eq!(fields["message"], "e");
        assert_eq!(fields["module"], "B");

        let (level, fields) = &events[2];
        assert_eq!(*level, Level::ERROR);
        assert_eq!(fields["message"], "abort: x");
        assert_eq!(fields["module"], "-- unknown --");

        assert_eq!((&diag).into_iter().count(), 3);
    }
}

use std::fmt;
use tracing::debug;

/// Outcome of an operation whose individual failures do not stop the run.
///
/// Each item is either counted as done or recorded with the reason it was
/// skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BestEffortTally {
    pub operation: String,
    pub attempted: usize,
    pub succeeded: usize,
    pub skipped: Vec<String>,
}

impl BestEffortTally {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            ..Default::default()
        }
    }

    pub fn success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    pub fn skip(&mut self, item: impl fmt::Display, reason: impl fmt::Display) {
        self.attempted += 1;
        let entry = format!("{}: {}", item, reason);
        debug!(operation = %self.operation, skipped = %entry, "Best-effort item skipped");
        self.skipped.push(entry);
    }

    /// Records the result of one attempt
    pub fn record<T, E: fmt::Display>(&mut self, item: impl fmt::Display, result: Result<T, E>) {
        match result {
            Ok(_) => self.success(),
            Err(e) => self.skip(item, e),
        }
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl fmt::Display for BestEffortTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} done",
            self.operation, self.succeeded, self.attempted
        )
    }
}

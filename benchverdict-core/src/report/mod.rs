use crate::result::Results;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait Reporter: Send + Sync {
    fn report(&self, results: &Results) -> Result<(), ReportError>;
}

/// Last path segment of a qualified case name (`app.benches.ListCase` -> `ListCase`).
pub fn short_case_name(case: &str) -> &str {
    case.rsplit(['.', ':']).next().unwrap_or(case)
}

mod terminal;
pub use terminal::TerminalReporter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_case_name() {
        assert_eq!(short_case_name("app.benches.ListCase"), "ListCase");
        assert_eq!(short_case_name("benches::orders::Checkout"), "Checkout");
        assert_eq!(short_case_name("Plain"), "Plain");
    }
}

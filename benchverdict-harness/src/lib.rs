//! Benchmark registration and sampling runtime for benchverdict.
//!
//! Benchmarks are registered explicitly: a [`Suite`] is an ordered list of
//! [`BenchmarkCase`]s, each holding named benchmark functions and a flag
//! telling whether the function leaves persisted state untouched.

mod environment;
mod runner;
mod warmup;

pub use environment::{Environment, NullEnvironment, OperationLog, RecordingEnvironment};
pub use runner::{invoke, run_benchmark, run_case, run_suite, Invocation, RunError};
pub use warmup::warmup;

use benchverdict_core::report::short_case_name;

/// A benchmark function; one call performs one unit of work.
pub type BenchmarkFn = Box<dyn FnMut()>;

/// A registered benchmark.
pub struct Benchmark {
    name: String,
    func: BenchmarkFn,
    pure: bool,
}

impl Benchmark {
    pub fn new<F>(name: impl Into<String>, pure: bool, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self {
            name: name.into(),
            func: Box::new(f),
            pure,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pure benchmarks do not modify persisted state, so no reset is needed
    /// between their samples.
    pub fn is_pure(&self) -> bool {
        self.pure
    }

    fn call(&mut self) {
        (self.func)()
    }
}

/// A named group of benchmarks sharing a setup hook.
pub struct BenchmarkCase {
    name: String,
    setup: Option<Box<dyn FnMut()>>,
    benchmarks: Vec<Benchmark>,
}

impl BenchmarkCase {
    /// Create an empty case. The name is usually qualified, e.g. `app.benches.ListCase`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            setup: None,
            benchmarks: Vec::new(),
        }
    }

    /// Run `f` before every sample of every benchmark in this case.
    pub fn with_setup<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.setup = Some(Box::new(f));
        self
    }

    /// Register a benchmark that mutates persisted state.
    pub fn bench<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.register(name, false, f);
        self
    }

    /// Register a benchmark that leaves persisted state untouched.
    pub fn pure_bench<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.register(name, true, f);
        self
    }

    /// Register a benchmark function with the given name and purity.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut case = BenchmarkCase::new("app.benches.OrderCase");
    /// case.register("bench_list_orders", true, || {
    ///     // ... do work ...
    /// });
    /// ```
    pub fn register<F>(&mut self, name: impl Into<String>, pure: bool, f: F)
    where
        F: FnMut() + 'static,
    {
        self.benchmarks.push(Benchmark::new(name, pure, f));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Benchmark names in registration order.
    pub fn list(&self) -> Vec<String> {
        self.benchmarks.iter().map(|b| b.name.clone()).collect()
    }

    pub fn benchmarks(&self) -> &[Benchmark] {
        &self.benchmarks
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    /// Whether `pattern` selects this case: the full name, a suffix of it, or
    /// the short name.
    pub fn matches(&self, pattern: &str) -> bool {
        self.name == pattern || self.name.ends_with(pattern) || short_case_name(&self.name) == pattern
    }
}

/// Ordered collection of benchmark cases.
#[derive(Default)]
pub struct Suite {
    cases: Vec<BenchmarkCase>,
}

impl Suite {
    pub fn new() -> Self {
        Self { cases: Vec::new() }
    }

    pub fn add(&mut self, case: BenchmarkCase) {
        self.cases.push(case);
    }

    pub fn with_case(mut self, case: BenchmarkCase) -> Self {
        self.add(case);
        self
    }

    /// Keep only the cases selected by any of `patterns`; no patterns keeps all.
    pub fn filter(self, patterns: &[String]) -> Self {
        if patterns.is_empty() {
            return self;
        }
        let cases = self
            .cases
            .into_iter()
            .filter(|case| patterns.iter().any(|p| case.matches(p)))
            .collect();
        Self { cases }
    }

    /// Case names in registration order.
    pub fn list(&self) -> Vec<String> {
        self.cases.iter().map(|c| c.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suite() -> Suite {
        Suite::new()
            .with_case(
                BenchmarkCase::new("app.benches.OrderCase")
                    .bench("bench_checkout", || {})
                    .pure_bench("bench_list", || {}),
            )
            .with_case(BenchmarkCase::new("app.benches.UserCase").pure_bench("bench_login", || {}))
    }

    #[test]
    fn test_case_register_and_list() {
        let mut case = BenchmarkCase::new("app.benches.OrderCase")
            .bench("bench_checkout", || {})
            .pure_bench("bench_list", || {});
        case.register("bench_refund", false, || {});

        assert_eq!(case.len(), 3);
        assert_eq!(case.list(), vec!["bench_checkout", "bench_list", "bench_refund"]);
        assert!(!case.benchmarks()[0].is_pure());
        assert!(case.benchmarks()[1].is_pure());
        assert!(!case.benchmarks()[2].is_pure());
    }

    #[test]
    fn test_case_new_is_empty() {
        let case = BenchmarkCase::new("app.Empty");
        assert!(case.is_empty());
        assert_eq!(case.name(), "app.Empty");
    }

    #[test]
    fn test_case_matches() {
        let case = BenchmarkCase::new("app.benches.OrderCase");

        assert!(case.matches("app.benches.OrderCase"));
        assert!(case.matches("benches.OrderCase"));
        assert!(case.matches("OrderCase"));
        assert!(!case.matches("UserCase"));
    }

    #[test]
    fn test_suite_filter() {
        let all = suite().filter(&[]);
        assert_eq!(all.len(), 2);

        let users = suite().filter(&["UserCase".to_string()]);
        assert_eq!(users.list(), vec!["app.benches.UserCase"]);

        let none = suite().filter(&["Missing".to_string()]);
        assert!(none.is_empty());
    }

    #[test]
    fn test_suite_default() {
        let suite = Suite::default();
        assert!(suite.is_empty());
    }
}

//! Hooks into the system under benchmark: counting auxiliary operations and
//! resetting persisted state between samples.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use benchverdict_core::OperationRecord;

/// The state a benchmark runs against.
///
/// `begin_capture`/`end_capture` bracket exactly one benchmark invocation;
/// every operation reported by `end_capture` is attributed to that
/// invocation. `reset` runs after every sample of a non-pure benchmark.
pub trait Environment {
    fn begin_capture(&mut self) {}

    fn end_capture(&mut self) -> Vec<OperationRecord> {
        Vec::new()
    }

    fn reset(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// An environment without operations or state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEnvironment;

impl Environment for NullEnvironment {}

/// Shared log that instrumented code appends operations to.
///
/// Clones share the same log, so a handle can be moved into benchmark
/// closures while the [`RecordingEnvironment`] owns another.
#[derive(Debug, Clone, Default)]
pub struct OperationLog {
    records: Rc<RefCell<Vec<OperationRecord>>>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, description: impl Into<String>, duration: Duration) {
        self.records
            .borrow_mut()
            .push(OperationRecord::new(description, duration));
    }

    /// Run `f`, recording it as one operation.
    pub fn time<T>(&self, description: impl Into<String>, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let value = f();
        self.record(description, start.elapsed());
        value
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    fn clear(&self) {
        self.records.borrow_mut().clear();
    }

    fn take(&self) -> Vec<OperationRecord> {
        std::mem::take(&mut *self.records.borrow_mut())
    }
}

type ResetFn = Box<dyn FnMut() -> anyhow::Result<()>>;

/// Environment backed by an [`OperationLog`] and an optional reset hook.
pub struct RecordingEnvironment {
    log: OperationLog,
    on_reset: Option<ResetFn>,
    resets: usize,
}

impl RecordingEnvironment {
    pub fn new(log: OperationLog) -> Self {
        Self {
            log,
            on_reset: None,
            resets: 0,
        }
    }

    /// Call `f` whenever persisted state must be reset.
    pub fn with_reset<F>(mut self, f: F) -> Self
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.on_reset = Some(Box::new(f));
        self
    }

    pub fn log(&self) -> &OperationLog {
        &self.log
    }

    /// Number of resets performed so far.
    pub fn reset_count(&self) -> usize {
        self.resets
    }
}

impl Environment for RecordingEnvironment {
    fn begin_capture(&mut self) {
        self.log.clear();
    }

    fn end_capture(&mut self) -> Vec<OperationRecord> {
        self.log.take()
    }

    fn reset(&mut self) -> anyhow::Result<()> {
        self.resets += 1;
        match self.on_reset.as_mut() {
            Some(f) => f(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_environment() {
        let mut env = NullEnvironment;
        env.begin_capture();
        assert!(env.end_capture().is_empty());
        assert!(env.reset().is_ok());
    }

    #[test]
    fn test_log_shared_between_clones() {
        let log = OperationLog::new();
        let handle = log.clone();

        handle.record("SELECT 1", Duration::from_micros(5));
        let answer = handle.time("SELECT 2", || 42);

        assert_eq!(answer, 42);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_capture_clears_previous_records() {
        let log = OperationLog::new();
        let mut env = RecordingEnvironment::new(log.clone());

        log.record("stale", Duration::ZERO);
        env.begin_capture();
        log.record("fresh", Duration::ZERO);
        let records = env.end_capture();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "fresh");
        assert!(log.is_empty());
    }

    #[test]
    fn test_reset_hook() {
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let mut env = RecordingEnvironment::new(OperationLog::new()).with_reset(move || {
            *counter.borrow_mut() += 1;
            Ok(())
        });

        env.reset().unwrap();
        env.reset().unwrap();

        assert_eq!(env.reset_count(), 2);
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_reset_failure_propagates() {
        let mut env = RecordingEnvironment::new(OperationLog::new())
            .with_reset(|| Err(anyhow::anyhow!("flush failed")));

        let err = env.reset().unwrap_err();
        assert_eq!(err.to_string(), "flush failed");
    }
}

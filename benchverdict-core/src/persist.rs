//! JSON result files used as baselines for later runs.
//!
//! Only aggregates are stored: per benchmark the average operation count and
//! the timing average, standard deviation and variance. Comparisons and
//! captured operations are runtime-only and are dropped on save.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::result::Results;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid result data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read results previously written by [`write_results`].
pub fn load_results(reader: impl Read) -> Result<Results, PersistError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Serialize results as JSON.
pub fn write_results(mut writer: impl Write, results: &Results) -> Result<(), PersistError> {
    serde_json::to_writer(&mut writer, results)?;
    writer.flush()?;
    Ok(())
}

pub fn load_results_file(path: &Path) -> Result<Results, PersistError> {
    let file = File::open(path)?;
    load_results(BufReader::new(file))
}

pub fn write_results_file(path: &Path, results: &Results) -> Result<(), PersistError> {
    let file = File::create(path)?;
    write_results(BufWriter::new(file), results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{BenchmarkResult, Comparison, CostSample, OperationRecord};
    use crate::stats::{TimingComparison, TimingSample};
    use std::time::Duration;
    use tempfile::tempdir;

    fn sample_results() -> Results {
        let mut result = BenchmarkResult::new(
            CostSample::new(
                2.5,
                vec![OperationRecord::new("SELECT 1", Duration::from_micros(40))],
            ),
            TimingSample::from_secs(&[0.011, 0.0123, 0.0098, 0.0105]).unwrap(),
        );
        result.comparison = Some(Comparison {
            cost_delta: 1.0,
            timing: TimingComparison {
                signed_delta: 0.002,
                negligible: false,
            },
        });

        let mut results = Results::new();
        results
            .entry("app.benches.ListCase".to_string())
            .or_default()
            .insert("bench_list".to_string(), result);
        results
    }

    #[test]
    fn test_roundtrip_keeps_aggregates_only() {
        let results = sample_results();
        let mut buffer = Vec::new();
        write_results(&mut buffer, &results).unwrap();

        let loaded = load_results(buffer.as_slice()).unwrap();
        let original = &results["app.benches.ListCase"]["bench_list"];
        let reloaded = &loaded["app.benches.ListCase"]["bench_list"];

        assert_eq!(reloaded.cost.value, original.cost.value);
        assert_eq!(reloaded.timing, original.timing);
        assert!(reloaded.cost.operations.is_empty());
        assert!(reloaded.comparison.is_none());
    }

    #[test]
    fn test_written_shape() {
        let mut buffer = Vec::new();
        write_results(&mut buffer, &sample_results()).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        let bench = &json["app.benches.ListCase"]["bench_list"];

        assert_eq!(bench["cost"]["value"], 2.5);
        assert!(bench["timing"]["average"].is_number());
        assert!(bench["timing"]["stdev"].is_number());
        assert!(bench["timing"]["variance"].is_number());
        assert!(bench["cost"].get("operations").is_none());
        assert!(bench.get("comparison").is_none());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("baseline.json");

        write_results_file(&path, &sample_results()).unwrap();
        let loaded = load_results_file(&path).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["app.benches.ListCase"].len(), 1);
    }

    #[test]
    fn test_malformed_file() {
        let result = load_results("{\"case\": [1, 2, 3]}".as_bytes());
        assert!(matches!(result, Err(PersistError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_results_file(Path::new("/nonexistent/baseline.json"));
        assert!(matches!(result, Err(PersistError::Io(_))));
    }
}

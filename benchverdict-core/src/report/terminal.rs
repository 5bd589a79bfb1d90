use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use super::{short_case_name, ReportError, Reporter};
use crate::result::{BenchmarkResult, Results};
use crate::verdict::Verdict;

/// A reporter that outputs comparison results to the terminal.
#[derive(Debug, Clone)]
pub struct TerminalReporter {
    /// Whether to use colors in output (defaults to true).
    use_colors: bool,
    /// Whether to list the operations captured during the last run.
    show_operations: bool,
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalReporter {
    /// Create a new terminal reporter with default settings.
    pub fn new() -> Self {
        Self {
            use_colors: true,
            show_operations: false,
        }
    }

    /// Create a terminal reporter with color output disabled.
    pub fn without_colors() -> Self {
        Self {
            use_colors: false,
            show_operations: false,
        }
    }

    /// List captured operations under each benchmark.
    pub fn with_operations(mut self, show_operations: bool) -> Self {
        self.show_operations = show_operations;
        self
    }

    fn paint(verdict: Verdict) -> ColoredString {
        let text = verdict.pretty();
        match verdict {
            Verdict::Regression => text.red().bold(),
            Verdict::Improvement => text.green().bold(),
            Verdict::Mixed => text.magenta().bold(),
            Verdict::Unchanged => text.normal(),
            Verdict::NoPreviousData => text.yellow(),
        }
    }

    fn format_verdict(&self, verdict: Verdict) -> String {
        if self.use_colors {
            Self::paint(verdict).to_string()
        } else {
            verdict.pretty().to_string()
        }
    }

    /// `3.0 (No previous data)` or `3.0 (+1.0, Regression)`.
    fn format_cost(&self, result: &BenchmarkResult) -> String {
        let cost = result.cost_comparison();
        let verdict = self.format_verdict(cost.verdict());
        match cost.signed_delta {
            None => format!("{:.1} ({})", cost.value, verdict),
            Some(_) => format!("{:.1} ({}, {})", cost.value, cost.pretty_diff(), verdict),
        }
    }

    /// `1.0000±0.0100 (No previous data)` or `1.0000±0.0100 (+0.0100, Regression)`.
    fn format_timing(&self, result: &BenchmarkResult) -> String {
        let timing = &result.timing;
        let verdict = self.format_verdict(result.timing_verdict());
        let spread = format!("{:.4}±{:.4}", timing.average, timing.standard_deviation);
        match result.timing_comparison() {
            None => format!("{} ({})", spread, verdict),
            Some(diff) => format!("{} ({}, {})", spread, diff.pretty(), verdict),
        }
    }

    fn print_case(&self, writer: &mut impl Write, case: &str) -> io::Result<()> {
        let name = short_case_name(case);
        if self.use_colors {
            writeln!(writer, "- {}", name.bold())
        } else {
            writeln!(writer, "- {}", name)
        }
    }

    /// Print a single benchmark block.
    fn print_benchmark(
        &self,
        writer: &mut impl Write,
        name: &str,
        result: &BenchmarkResult,
    ) -> io::Result<()> {
        writeln!(
            writer,
            "  > {:<30}: {}",
            name,
            self.format_verdict(result.verdict())
        )?;
        writeln!(
            writer,
            "    ~ {:<28}: {}",
            "Number of operations",
            self.format_cost(result)
        )?;

        if self.show_operations {
            for (i, op) in result.cost.operations.iter().enumerate() {
                writeln!(writer, "      - Operation {}:", i + 1)?;
                writeln!(writer, "        > Description: {}", op.description)?;
                writeln!(
                    writer,
                    "        > Timing: {:.6}",
                    op.duration.as_secs_f64()
                )?;
            }
        }

        writeln!(
            writer,
            "    ~ {:<28}: {}",
            "Timing (seconds)",
            self.format_timing(result)
        )?;
        Ok(())
    }

    /// Print verdict counts and the number of cases.
    fn print_summary(&self, writer: &mut impl Write, results: &Results) -> io::Result<()> {
        let mut counts = [0usize; 5];
        for result in results.values().flat_map(|benchmarks| benchmarks.values()) {
            let verdict = result.verdict();
            if let Some(i) = Verdict::PRECEDENCE.iter().position(|v| *v == verdict) {
                counts[i] += 1;
            }
        }

        writeln!(writer)?;
        let parts: Vec<String> = Verdict::PRECEDENCE
            .iter()
            .zip(counts)
            .map(|(verdict, count)| {
                let text = format!("{} {}", count, verdict.pretty().to_lowercase());
                if self.use_colors && count > 0 {
                    match verdict {
                        Verdict::Regression => text.red().to_string(),
                        Verdict::Improvement => text.green().to_string(),
                        Verdict::Mixed => text.magenta().to_string(),
                        _ => text,
                    }
                } else {
                    text
                }
            })
            .collect();

        let summary_label = "Summary:";
        if self.use_colors {
            writeln!(writer, "{} {}", summary_label.bold(), parts.join(", "))?;
        } else {
            writeln!(writer, "{} {}", summary_label, parts.join(", "))?;
        }

        let count = results.len();
        writeln!(
            writer,
            "Ran {} case{}.",
            count,
            if count != 1 { "s" } else { "" }
        )?;
        Ok(())
    }

    /// Render the full report.
    pub fn render(&self, writer: &mut impl Write, results: &Results) -> io::Result<()> {
        writeln!(writer, "Results:")?;

        for (case, benchmarks) in results {
            self.print_case(writer, case)?;
            for (name, result) in benchmarks {
                self.print_benchmark(writer, name, result)?;
            }
        }

        self.print_summary(writer, results)
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, results: &Results) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();

        self.render(&mut writer, results)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Comparison, CostSample, OperationRecord};
    use crate::stats::{TimingComparison, TimingSample};
    use std::time::Duration;

    fn make_result(cost: f64, comparison: Option<Comparison>) -> BenchmarkResult {
        BenchmarkResult {
            cost: CostSample::new(
                cost,
                vec![
                    OperationRecord::new("SELECT * FROM orders", Duration::from_micros(120)),
                    OperationRecord::new("UPDATE orders SET paid = 1", Duration::from_micros(80)),
                ],
            ),
            timing: TimingSample::from_mean_and_stdev(1.0, 0.01),
            comparison,
        }
    }

    fn make_results() -> Results {
        let regression = Comparison {
            cost_delta: 1.0,
            timing: TimingComparison {
                signed_delta: 0.01,
                negligible: false,
            },
        };
        let unchanged = Comparison {
            cost_delta: 0.0,
            timing: TimingComparison {
                signed_delta: 0.0001,
                negligible: true,
            },
        };

        let mut results = Results::new();
        let case = results.entry("app.benches.OrderCase".to_string()).or_default();
        case.insert("bench_checkout".to_string(), make_result(3.0, Some(regression)));
        case.insert("bench_list".to_string(), make_result(2.0, Some(unchanged)));
        case.insert("bench_new".to_string(), make_result(1.0, None));
        results
    }

    fn render(reporter: &TerminalReporter, results: &Results) -> String {
        let mut buffer = Vec::new();
        reporter.render(&mut buffer, results).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_default_uses_colors() {
        let reporter = TerminalReporter::default();

        assert!(reporter.use_colors);
        assert!(!reporter.show_operations);
    }

    #[test]
    fn test_report_to_buffer() {
        let output = render(&TerminalReporter::without_colors(), &make_results());

        assert!(output.starts_with("Results:\n- OrderCase\n"));
        assert!(output.contains(&format!("  > {:<30}: Regression", "bench_checkout")));
        assert!(output.contains("3.0 (+1.0, Regression)"));
        assert!(output.contains("1.0000±0.0100 (+0.0100, Regression)"));
        assert!(output.contains("2.0 (no change, Unchanged)"));
        assert!(output.contains("1.0 (No previous data)"));
        assert!(output.contains("1.0000±0.0100 (No previous data)"));
        assert!(output.contains(
            "Summary: 0 mixed, 1 regression, 0 improvement, 1 unchanged, 1 no previous data"
        ));
        assert!(output.ends_with("Ran 1 case.\n"));
        assert!(!output.contains("SELECT"));
    }

    #[test]
    fn test_report_with_operations() {
        let reporter = TerminalReporter::without_colors().with_operations(true);
        let output = render(&reporter, &make_results());

        assert!(output.contains("      - Operation 1:"));
        assert!(output.contains("        > Description: SELECT * FROM orders"));
        assert!(output.contains("        > Timing: 0.000120"));
        assert!(output.contains("      - Operation 2:"));
    }

    #[test]
    fn test_report_empty_results() {
        let output = render(&TerminalReporter::without_colors(), &Results::new());

        assert!(output.starts_with("Results:\n"));
        assert!(output.ends_with("Ran 0 cases.\n"));
    }

    #[test]
    fn test_reporter_trait() {
        let reporter = TerminalReporter::without_colors();
        assert!(reporter.report(&make_results()).is_ok());
    }
}

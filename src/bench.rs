//! Benchmark harness comparing the four algorithms.
//!
//! Every configured algorithm sorts two inputs derived from the records, in both
//! directions, once each on a fresh copy:
//! - **Labels**: the distinct values of the label field (e.g. region names).
//! - **Aggregated**: one record per label with the summed count under [`TOTAL`],
//!   ordered by that total.
//!
//! Timing is a single wall-clock measurement per sample. Samples run strictly one after
//! another in a fixed order (algorithm, shape, direction), and the report lists them
//! fastest first.

use crate::algo::{Algorithm, insertion_sort_by};
use crate::core::{
    COUNT, Direction, FieldKey, Identity, KeyAccessor, REGION, Record, TOTAL, validate_values,
};
use crate::dataset::{distinct, totals_by};
use crate::error::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Which fields feed the benchmark inputs and which algorithms run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Field whose distinct values form the label input and group the aggregated input.
    pub label_field: String,
    /// Integer field summed into the aggregated input.
    pub count_field: String,
    pub algorithms: Vec<Algorithm>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            label_field: REGION.to_owned(),
            count_field: COUNT.to_owned(),
            algorithms: Algorithm::ALL.to_vec(),
        }
    }
}

impl BenchmarkConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The two benchmarked input shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputShape {
    Labels,
    Aggregated,
}

impl InputShape {
    pub const BOTH: [InputShape; 2] = [InputShape::Labels, InputShape::Aggregated];

    fn describe(self, label_field: &str, items: usize) -> String {
        match self {
            InputShape::Labels => format!("{label_field} labels ({items} items)"),
            InputShape::Aggregated => format!("{label_field} totals table ({items} rows)"),
        }
    }
}

/// One timed run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BenchmarkSample {
    pub algorithm: Algorithm,
    pub shape: InputShape,
    pub direction: Direction,
    pub items: usize,
    pub elapsed: Duration,
    description: String,
}

impl BenchmarkSample {
    /// `"<algorithm> sorting <shape> <direction>: <seconds> seconds"`.
    pub fn line(&self) -> String {
        format!(
            "{} sorting {} {}: {:.9} seconds",
            self.algorithm.name(),
            self.description,
            self.direction.describe(),
            self.elapsed.as_secs_f64()
        )
    }
}

/// Samples ordered by ascending elapsed time.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BenchmarkReport {
    samples: Vec<BenchmarkSample>,
}

impl BenchmarkReport {
    pub fn samples(&self) -> &[BenchmarkSample] {
        &self.samples
    }

    pub fn fastest(&self) -> Option<&BenchmarkSample> {
        self.samples.first()
    }

    pub fn slowest(&self) -> Option<&BenchmarkSample> {
        self.samples.last()
    }

    pub fn lines(&self) -> Vec<String> {
        self.samples.iter().map(BenchmarkSample::line).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs the comparison described by a [`BenchmarkConfig`].
#[derive(Clone, Debug, Default)]
pub struct Benchmark {
    config: BenchmarkConfig,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Times every (algorithm, shape, direction) combination over `records`.
    pub fn run(&self, records: &[Record]) -> Result<BenchmarkReport> {
        let label_field = self.config.label_field.as_str();

        let labels = distinct(records, label_field)?;
        validate_values(&labels)?;
        let table = totals_by(records, label_field, &self.config.count_field)?;
        let total = FieldKey::resolve(&table, TOTAL)?;

        let mut samples = Vec::with_capacity(self.config.algorithms.len() * 4);
        for &algorithm in &self.config.algorithms {
            for shape in InputShape::BOTH {
                for direction in Direction::BOTH {
                    let (items, elapsed) = match shape {
                        InputShape::Labels => (
                            labels.len(),
                            time_sample(algorithm, &labels, &Identity, direction),
                        ),
                        InputShape::Aggregated => (
                            table.len(),
                            time_sample(algorithm, &table, &total, direction),
                        ),
                    };
                    let sample = BenchmarkSample {
                        algorithm,
                        shape,
                        direction,
                        items,
                        elapsed,
                        description: shape.describe(label_field, items),
                    };
                    debug!("{}", sample.line());
                    samples.push(sample);
                }
            }
        }

        insertion_sort_by(&mut samples, |a, b| a.elapsed.cmp(&b.elapsed));
        if let Some(fastest) = samples.first() {
            info!(
                "benchmark finished: {} samples, fastest {}",
                samples.len(),
                fastest.line()
            );
        }
        Ok(BenchmarkReport { samples })
    }
}

/// Sorts a fresh copy of `input` once and returns the elapsed time.
fn time_sample<T, A>(
    algorithm: Algorithm,
    input: &[T],
    accessor: &A,
    direction: Direction,
) -> Duration
where
    T: Clone,
    A: KeyAccessor<T>,
{
    let mut data = input.to_vec();
    let start = Instant::now();
    algorithm.sort(black_box(&mut data), accessor, direction);
    let elapsed = start.elapsed();
    black_box(&data);
    elapsed
}

/// Runs the default benchmark and returns the report lines, fastest first.
///
/// ```
/// use crimesort::prelude::*;
///
/// let records = vec![
///     Record::crime("Seoul", "Theft", 120),
///     Record::crime("Busan", "Theft", 80),
///     Record::crime("Seoul", "Fraud", 40),
/// ];
/// let lines = run_benchmark(&records).unwrap();
/// assert_eq!(lines.len(), 16);
/// ```
pub fn run_benchmark(records: &[Record]) -> Result<Vec<String>> {
    Ok(Benchmark::default().run(records)?.lines())
}

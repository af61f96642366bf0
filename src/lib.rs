//! # crimesort
//!
//! `crimesort` orders crime-statistics records with four classic comparison sorts and
//! measures how they compare.
//!
//! It implements **Selection Sort**, **Bubble Sort**, **Insertion Sort** and **Quicksort**
//! generically over two shapes of input: flat sequences of scalars (e.g. region names),
//! and records ordered by one named field (e.g. an occurrence count).
//!
//! ## Key Features
//!
//! - **One comparator abstraction**: The [`KeyAccessor`] trait projects an element onto the
//!   scalar it is ordered by. [`Identity`] covers bare values and [`FieldKey`] covers
//!   records, validated up front so a sort never runs on keys it cannot order.
//! - **Tagged input shapes**: [`Sequence`] is either `Values` or `Records { key }`;
//!   [`sort`] validates it and hands back the same shape, permuted.
//! - **Top-K**: [`top_k`] returns the `k` most extreme records without reordering the
//!   caller's data.
//! - **Benchmarking**: [`run_benchmark`] times every algorithm on both shapes in both
//!   directions and reports the 16 samples fastest first.
//!
//! ## Usage
//!
//! ### Sorting
//!
//! ```rust
//! use crimesort::prelude::*;
//!
//! let records = vec![
//!     Record::crime("Seoul", "Theft", 120),
//!     Record::crime("Busan", "Theft", 80),
//!     Record::crime("Daegu", "Fraud", 95),
//! ];
//!
//! let sorted = sort(
//!     Sequence::records(records, "count"),
//!     Algorithm::Quick(PivotPolicy::First),
//!     Direction::Descending,
//! )
//! .unwrap();
//!
//! let regions: Vec<_> = sorted
//!     .into_records()
//!     .unwrap()
//!     .iter()
//!     .map(|r| r.region().unwrap().to_owned())
//!     .collect();
//! assert_eq!(regions, vec!["Seoul", "Daegu", "Busan"]);
//! ```
//!
//! ### Top-K
//!
//! ```rust
//! use crimesort::prelude::*;
//!
//! let records = vec![
//!     Record::crime("Seoul", "Theft", 120),
//!     Record::crime("Busan", "Theft", 80),
//!     Record::crime("Daegu", "Fraud", 95),
//! ];
//!
//! let top = top_k(&records, 2, "count", Direction::Descending).unwrap();
//! assert_eq!(top[0].region(), Some("Seoul"));
//! assert_eq!(top[1].region(), Some("Daegu"));
//! ```
//!
//! ## Performance Characteristics
//!
//! | Algorithm | Comparisons | Stable |
//! |-----------|-------------|--------|
//! | Selection | O(N²) always | no |
//! | Bubble | O(N²) always | yes |
//! | Insertion | O(N) sorted, O(N²) reversed | yes |
//! | Quick | O(N log N) average, O(N²) on sorted input with [`PivotPolicy::First`] | no |
//!
//! Selection and bubble sort deliberately skip the usual early exits so the benchmark
//! shows their full cost.

pub mod algo;
pub mod bench;
pub mod core;
pub mod dataset;
pub mod error;
pub mod sequence;
pub mod topk;

pub use crate::algo::{Algorithm, PivotPolicy, sort_slice};
pub use crate::bench::{Benchmark, BenchmarkConfig, BenchmarkReport, run_benchmark};
pub use crate::core::{Direction, FieldKey, Identity, KeyAccessor, Record, Value};
pub use crate::error::{Error, Result};
pub use crate::sequence::{Sequence, sort};
pub use crate::topk::{top_k, top_k_with};

pub mod prelude {
    pub use crate::algo::{Algorithm, PivotPolicy, sort_slice};
    pub use crate::bench::{Benchmark, BenchmarkConfig, run_benchmark};
    pub use crate::core::{Direction, FieldKey, Identity, KeyAccessor, Record, Value};
    pub use crate::sequence::{Sequence, sort};
    pub use crate::topk::{top_k, top_k_with};
}

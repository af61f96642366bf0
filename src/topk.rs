//! Top-K extraction: the `k` records with the most extreme key.
//!
//! The records are never reordered. An index permutation is sorted instead and only the
//! first `k` records are cloned out, so a cached source can be passed in directly.

use crate::algo::Algorithm;
use crate::core::{Direction, FieldKey, Record};
use crate::error::{Error, Result};
use std::fmt::Display;

/// Returns the `k` most extreme records by `key`, most extreme first.
///
/// Uses selection sort, so ties go to the record that appears first.
/// See [`top_k_with`] to pick another algorithm.
///
/// ```
/// use crimesort::prelude::*;
///
/// let records: Vec<Record> = [5, 1, 9, 3]
///     .into_iter()
///     .map(|c| Record::new().with("count", c))
///     .collect();
///
/// let top = top_k(&records, 3, "count", Direction::Descending).unwrap();
/// let counts: Vec<_> = top.iter().map(|r| r.count().unwrap()).collect();
/// assert_eq!(counts, vec![9, 5, 3]);
/// ```
pub fn top_k<K>(records: &[Record], k: K, key: &str, direction: Direction) -> Result<Vec<Record>>
where
    K: TryInto<usize> + Copy + Display,
{
    top_k_with(Algorithm::Selection, records, k, key, direction)
}

/// [`top_k`] with an explicit sorting algorithm. Ties follow that algorithm's order.
pub fn top_k_with<K>(
    algorithm: Algorithm,
    records: &[Record],
    k: K,
    key: &str,
    direction: Direction,
) -> Result<Vec<Record>>
where
    K: TryInto<usize> + Copy + Display,
{
    let k: usize = k
        .try_into()
        .map_err(|_| Error::InvalidCount(k.to_string()))?;
    let accessor = FieldKey::resolve(records, key)?;

    let indices = algorithm.sort_indices(records, &accessor, direction);
    Ok(indices
        .into_iter()
        .take(k)
        .map(|i| records[i].clone())
        .collect())
}

/// Parses a count typed into the presentation layer.
///
/// ```
/// use crimesort::topk::parse_count;
///
/// assert_eq!(parse_count(" 10 ").unwrap(), 10);
/// assert!(parse_count("-1").is_err());
/// assert!(parse_count("ten").is_err());
/// ```
pub fn parse_count(text: &str) -> Result<usize> {
    text.trim()
        .parse()
        .map_err(|_| Error::InvalidCount(text.to_owned()))
}

//! The two shapes of orderable input and the validating [`sort`] entry point.

use crate::algo::Algorithm;
use crate::core::{Direction, FieldKey, Identity, Record, Value, validate_values};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// An orderable sequence: bare values, or records ordered by one named field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Sequence {
    /// Scalars ordered by themselves, e.g. distinct region names.
    Values { values: Vec<Value> },
    /// Records ordered by the value under `key`.
    Records { records: Vec<Record>, key: String },
}

impl Sequence {
    pub fn values<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Sequence::Values {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn records(records: Vec<Record>, key: impl Into<String>) -> Self {
        Sequence::Records {
            records,
            key: key.into(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Sequence::Values { values } => values.len(),
            Sequence::Records { records, .. } => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks that the sequence can be totally ordered.
    pub fn validate(&self) -> Result<()> {
        match self {
            Sequence::Values { values } => validate_values(values),
            Sequence::Records { records, key } => FieldKey::resolve(records, key).map(|_| ()),
        }
    }

    pub fn into_values(self) -> Option<Vec<Value>> {
        match self {
            Sequence::Values { values } => Some(values),
            Sequence::Records { .. } => None,
        }
    }

    pub fn into_records(self) -> Option<Vec<Record>> {
        match self {
            Sequence::Records { records, .. } => Some(records),
            Sequence::Values { .. } => None,
        }
    }
}

/// Sorts a sequence with `algorithm` and returns it permuted into `direction` order.
///
/// The sequence is validated first. On error nothing has been reordered.
///
/// ```
/// use crimesort::prelude::*;
///
/// let sorted = sort(
///     Sequence::values([3, 1, 2]),
///     Algorithm::Bubble,
///     Direction::Ascending,
/// )
/// .unwrap();
/// assert_eq!(sorted, Sequence::values([1, 2, 3]));
/// ```
pub fn sort(sequence: Sequence, algorithm: Algorithm, direction: Direction) -> Result<Sequence> {
    match sequence {
        Sequence::Values { mut values } => {
            validate_values(&values)?;
            algorithm.sort(&mut values, &Identity, direction);
            Ok(Sequence::Values { values })
        }
        Sequence::Records { mut records, key } => {
            let accessor = FieldKey::resolve(&records, &key)?;
            algorithm.sort(&mut records, &accessor, direction);
            Ok(Sequence::Records { records, key })
        }
    }
}

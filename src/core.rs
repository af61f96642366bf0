//! Core traits and types for crimesort.
//!
//! This module defines:
//! - [`Value`] and [`Record`]: the scalars and structured rows being ordered.
//! - [`Direction`]: ascending or descending order.
//! - [`KeyAccessor`]: The trait that projects an element onto the scalar it is ordered by,
//!   with [`Identity`] for bare values and [`FieldKey`] for records.

use crate::error::{Error, Result};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Field holding the region name of a long-form record.
pub const REGION: &str = "region";
/// Field holding the crime-type label of a long-form record.
pub const CATEGORY: &str = "category";
/// Field holding the occurrence count of a long-form record.
pub const COUNT: &str = "count";
/// Field holding the summed count of an aggregated record.
pub const TOTAL: &str = "total";

/// A scalar stored in a [`Record`] or sorted directly.
///
/// Numbers order by value, integers against floats included; a number equal in value
/// to a float sorts just before it. Text orders lexicographically. Numbers and text
/// are never compared by the sorting entry points: validation rejects such sequences
/// with [`Error::IncomparableKey`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(OrderedFloat<f64>),
    Text(String),
}

impl Value {
    /// Name of the value kind, used in validation messages. Integers and floats are
    /// both `"number"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) | Value::Float(_) => "number",
            Value::Text(_) => "text",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Exact comparison of an integer against a float.
fn cmp_int_float(int: i64, float: OrderedFloat<f64>) -> Ordering {
    // Rounding is monotonic, so a strict result after conversion is exact.
    match OrderedFloat(int as f64).cmp(&float) {
        Ordering::Equal => (int as i128).cmp(&(float.0 as i128)).then(Ordering::Less),
        other => other,
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.cmp(b),
            (Value::Int(a), Value::Float(b)) => cmp_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Text(_), _) => Ordering::Greater,
            (_, Value::Text(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(OrderedFloat(v))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// A structured row: a mapping from field name to [`Value`].
///
/// Records are produced once by ingestion and never mutated by the sorting code, which
/// only changes their position in a sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a long-form crime record (`region`, `category`, `count`).
    pub fn crime(region: impl Into<String>, category: impl Into<String>, count: i64) -> Self {
        let region: String = region.into();
        let category: String = category.into();
        Self::new()
            .with(REGION, region)
            .with(CATEGORY, category)
            .with(COUNT, count)
    }

    /// Returns the record with `name` set to `value`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn region(&self) -> Option<&str> {
        self.get(REGION).and_then(Value::as_str)
    }

    pub fn category(&self) -> Option<&str> {
        self.get(CATEGORY).and_then(Value::as_str)
    }

    pub fn count(&self) -> Option<i64> {
        self.get(COUNT).and_then(Value::as_int)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Sort direction. Ascending places the smaller key earlier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Both directions, ascending first.
    pub const BOTH: [Direction; 2] = [Direction::Ascending, Direction::Descending];

    /// Maps a natural ordering onto this direction.
    #[inline(always)]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }

    pub fn is_ascending(self) -> bool {
        self == Direction::Ascending
    }

    /// Phrase used in benchmark reports.
    pub fn describe(self) -> &'static str {
        match self {
            Direction::Ascending => "in ascending order",
            Direction::Descending => "in descending order",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Ascending => "ascending",
            Direction::Descending => "descending",
        })
    }
}

/// A trait for projecting an element onto the key it is ordered by, without copying.
///
/// The sorting functions in [`crate::algo`] only ever compare keys returned from here,
/// so any element type can be sorted once it has an accessor.
///
/// # Examples
///
/// Ordering users by name:
///
/// ```
/// use crimesort::core::KeyAccessor;
///
/// struct User {
///     name: String,
/// }
///
/// struct ByName;
///
/// impl KeyAccessor<User> for ByName {
///     type Key = str;
///
///     fn get_key<'a>(&self, item: &'a User) -> Option<&'a str> {
///         Some(&item.name)
///     }
/// }
/// ```
pub trait KeyAccessor<T: ?Sized> {
    /// The projected scalar.
    type Key: Ord + ?Sized;

    /// Returns the key of `item`, or `None` when the item has no key.
    ///
    /// Keyless items order before every keyed item. The crate's own entry points
    /// validate inputs so this never happens for them.
    fn get_key<'a>(&self, item: &'a T) -> Option<&'a Self::Key>;

    /// Natural (ascending) comparison of two items by key.
    #[inline(always)]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.get_key(a).cmp(&self.get_key(b))
    }
}

/// Accessor for bare-value sequences: the element is its own key.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl<T: Ord> KeyAccessor<T> for Identity {
    type Key = T;

    #[inline(always)]
    fn get_key<'a>(&self, item: &'a T) -> Option<&'a T> {
        Some(item)
    }
}

/// Accessor ordering [`Record`]s by the value under one field.
///
/// Build it with [`FieldKey::resolve`], which checks that the field can totally order
/// the given records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldKey {
    name: String,
}

impl FieldKey {
    /// Validates `name` against `records` and returns an accessor for it.
    ///
    /// Every record must carry the field and all values must be of one kind.
    ///
    /// ```
    /// use crimesort::core::{FieldKey, Record};
    ///
    /// let records = vec![Record::crime("Seoul", "Theft", 12)];
    /// assert!(FieldKey::resolve(&records, "count").is_ok());
    /// assert!(FieldKey::resolve(&records, "population").is_err());
    /// ```
    pub fn resolve(records: &[Record], name: &str) -> Result<Self> {
        check_homogeneous(name, records.iter().map(|r| r.get(name)))?;
        Ok(Self {
            name: name.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl KeyAccessor<Record> for FieldKey {
    type Key = Value;

    #[inline(always)]
    fn get_key<'a>(&self, item: &'a Record) -> Option<&'a Value> {
        item.get(&self.name)
    }
}

/// Checks that a bare-value sequence holds a single kind of [`Value`].
pub fn validate_values(values: &[Value]) -> Result<()> {
    check_homogeneous("value", values.iter().map(Some))
}

fn check_homogeneous<'a>(
    field: &str,
    keys: impl Iterator<Item = Option<&'a Value>>,
) -> Result<()> {
    let mut expected: Option<&'static str> = None;
    for (index, key) in keys.enumerate() {
        let Some(value) = key else {
            return Err(Error::incomparable(
                field,
                format!("missing from element {index}"),
            ));
        };
        match expected {
            None => expected = Some(value.kind()),
            Some(kind) if kind != value.kind() => {
                return Err(Error::incomparable(
                    field,
                    format!(
                        "element {index} holds {} but earlier elements hold {kind}",
                        value.kind()
                    ),
                ));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_reverses_ordering() {
        assert_eq!(Direction::Ascending.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Direction::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Direction::Descending.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn field_key_rejects_mixed_kinds() {
        let records = vec![
            Record::new().with("k", 1),
            Record::new().with("k", "one"),
        ];
        assert!(FieldKey::resolve(&records, "k").is_err());
    }

    #[test]
    fn field_key_accepts_integers_and_floats() {
        let records = vec![
            Record::new().with("k", 5),
            Record::new().with("k", 2.5),
        ];
        assert!(FieldKey::resolve(&records, "k").is_ok());
    }

    #[test]
    fn integers_and_floats_order_by_value() {
        assert_eq!(Value::from(2).cmp(&Value::from(2.5)), Ordering::Less);
        assert_eq!(Value::from(3).cmp(&Value::from(2.5)), Ordering::Greater);
        assert_eq!(Value::from(2.5).cmp(&Value::from(3)), Ordering::Less);
        assert_eq!(Value::from(-1).cmp(&Value::from(f64::NEG_INFINITY)), Ordering::Greater);
        assert_eq!(Value::from(i64::MAX).cmp(&Value::from(f64::NAN)), Ordering::Less);
    }

    #[test]
    fn equal_numbers_stay_distinct_and_consistent() {
        let int = Value::from(2);
        let float = Value::from(2.0);
        assert_ne!(int, float);
        assert_eq!(int.cmp(&float), Ordering::Less);
        assert_eq!(float.cmp(&int), Ordering::Greater);
    }

    #[test]
    fn large_integers_compare_exactly() {
        // 2^53 + 1 rounds to 2^53 as a float but is strictly greater.
        let big = (1i64 << 53) + 1;
        let float = Value::from((1i64 << 53) as f64);
        assert_eq!(Value::from(big).cmp(&float), Ordering::Greater);
        assert_eq!(Value::from(1i64 << 53).cmp(&float), Ordering::Less);
    }

    #[test]
    fn numbers_sort_before_text() {
        assert_eq!(Value::from(9).cmp(&Value::from("a")), Ordering::Less);
        assert_eq!(Value::from("a").cmp(&Value::from(1.5)), Ordering::Greater);
    }

    #[test]
    fn field_key_accepts_empty_input() {
        assert!(FieldKey::resolve(&[], "anything").is_ok());
    }

    #[test]
    fn missing_key_orders_first() {
        let key = FieldKey {
            name: "k".to_owned(),
        };
        let with = Record::new().with("k", 0);
        let without = Record::new();
        assert_eq!(key.compare(&without, &with), Ordering::Less);
    }

    #[test]
    fn record_serializes_as_plain_map() {
        let record = Record::crime("Busan", "Fraud", 7);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"category":"Fraud","count":7,"region":"Busan"}"#);
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}

//! Record ingestion and the aggregations the sorting code consumes.
//!
//! The source data is a wide table: a major crime category, a minor crime category, then
//! one column of occurrence counts per region. [`reshape_wide`] turns it into long-form
//! records (`region`, `category`, `count`), keeping only positive counts.
//!
//! Loaded files are memoized by [`RecordCache`], keyed by canonical path. Entries live
//! until [`RecordCache::invalidate`] or [`RecordCache::clear`] drops them.

use crate::core::{CATEGORY, COUNT, REGION, Record, TOTAL, Value};
use crate::error::{Error, Result};
use log::{info, warn};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

const BOM: char = '\u{feff}';

/// Reads a wide UTF-8 CSV table and reshapes it into long-form crime records.
///
/// The crime type is `"<major> - <minor>"`, or just `<minor>` when the major column is
/// blank. Fractional counts are truncated toward zero; empty cells, non-positive
/// counts and cells that are not numbers are dropped.
///
/// ```
/// use crimesort::dataset::reshape_wide;
///
/// let csv = "major,minor,Seoul,Busan\nViolent,Robbery,12,0\n";
/// let records = reshape_wide(csv.as_bytes()).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].region(), Some("Seoul"));
/// assert_eq!(records[0].category(), Some("Violent - Robbery"));
/// ```
pub fn reshape_wide<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.len() < 3 {
        return Err(Error::MissingColumns {
            found: headers.len(),
        });
    }
    let regions: Vec<String> = headers
        .iter()
        .skip(2)
        .map(|h| h.trim_start_matches(BOM).trim().to_owned())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let major = row.get(0).unwrap_or_default().trim();
        let minor = row.get(1).unwrap_or_default().trim();
        let category = if major.is_empty() {
            minor.to_owned()
        } else {
            format!("{major} - {minor}")
        };

        for (region, cell) in regions.iter().zip(row.iter().skip(2)) {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            match parse_cell(cell) {
                Some(count) if count > 0 => {
                    records.push(Record::crime(region.as_str(), category.as_str(), count));
                }
                Some(_) => {}
                None => warn!("skipping non-numeric count {cell:?} for {region} / {category}"),
            }
        }
    }
    Ok(records)
}

fn parse_cell(cell: &str) -> Option<i64> {
    if let Ok(count) = cell.parse::<i64>() {
        return Some(count);
    }
    let value = cell.parse::<f64>().ok()?;
    value.is_finite().then(|| value.trunc() as i64)
}

/// Loads and reshapes the wide table at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let file = File::open(path.as_ref())?;
    reshape_wide(BufReader::new(file))
}

static GLOBAL: Lazy<RecordCache> = Lazy::new(RecordCache::new);

/// Memoized loads, keyed by file identity (canonical path).
#[derive(Debug, Default)]
pub struct RecordCache {
    entries: Mutex<HashMap<PathBuf, Arc<Vec<Record>>>>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache.
    pub fn global() -> &'static RecordCache {
        &GLOBAL
    }

    /// Returns the records of `path`, loading them on first use.
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<Arc<Vec<Record>>> {
        let key = std::fs::canonicalize(path.as_ref())?;
        if let Some(records) = self.lock().get(&key) {
            return Ok(Arc::clone(records));
        }

        let records = Arc::new(load(&key)?);
        info!("loaded {} records from {}", records.len(), key.display());
        Ok(Arc::clone(self.lock().entry(key).or_insert(records)))
    }

    /// Drops the entry for `path`. Returns whether one was cached.
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        let key = std::fs::canonicalize(path.as_ref())
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        self.lock().remove(&key).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Arc<Vec<Record>>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Sums `count_field` per distinct `group_field`, in first-seen order.
///
/// Each output record has two fields: `group_field` and [`TOTAL`]. A total outside
/// the `i64` range is [`Error::Overflow`].
pub fn totals_by(records: &[Record], group_field: &str, count_field: &str) -> Result<Vec<Record>> {
    let mut positions: HashMap<&Value, usize> = HashMap::new();
    let mut totals: Vec<(&Value, i64)> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let group = record.get(group_field).ok_or_else(|| {
            Error::incomparable(group_field, format!("missing from record {index}"))
        })?;
        let count = record
            .get(count_field)
            .and_then(Value::as_int)
            .ok_or_else(|| {
                Error::incomparable(count_field, format!("record {index} has no integer count"))
            })?;

        match positions.get(group) {
            Some(&pos) => {
                let total = &mut totals[pos].1;
                *total = total.checked_add(count).ok_or_else(|| Error::Overflow {
                    field: count_field.to_owned(),
                    group: group.to_string(),
                })?;
            }
            None => {
                positions.insert(group, totals.len());
                totals.push((group, count));
            }
        }
    }

    Ok(totals
        .into_iter()
        .map(|(group, total)| Record::new().with(group_field, group.clone()).with(TOTAL, total))
        .collect())
}

/// Total occurrences per region.
pub fn region_totals(records: &[Record]) -> Result<Vec<Record>> {
    totals_by(records, REGION, COUNT)
}

/// Total occurrences per crime type.
pub fn category_totals(records: &[Record]) -> Result<Vec<Record>> {
    totals_by(records, CATEGORY, COUNT)
}

/// Distinct values of `field`, in first-seen order.
pub fn distinct(records: &[Record], field: &str) -> Result<Vec<Value>> {
    let mut seen = std::collections::HashSet::new();
    let mut values = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let value = record
            .get(field)
            .ok_or_else(|| Error::incomparable(field, format!("missing from record {index}")))?;
        if seen.insert(value) {
            values.push(value.clone());
        }
    }
    Ok(values)
}

/// Records matching `region` and `category`. `None` matches everything.
pub fn filter(records: &[Record], region: Option<&str>, category: Option<&str>) -> Vec<Record> {
    records
        .iter()
        .filter(|r| region.is_none_or(|want| r.region() == Some(want)))
        .filter(|r| category.is_none_or(|want| r.category() == Some(want)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cell_truncates_floats() {
        assert_eq!(parse_cell("42"), Some(42));
        assert_eq!(parse_cell("42.0"), Some(42));
        assert_eq!(parse_cell("4.5"), Some(4));
        assert_eq!(parse_cell("0.9"), Some(0));
        assert_eq!(parse_cell("-3.7"), Some(-3));
        assert_eq!(parse_cell("inf"), None);
        assert_eq!(parse_cell("NaN"), None);
        assert_eq!(parse_cell("1,234"), None);
    }

    #[test]
    fn totals_keep_first_seen_order() {
        let records = vec![
            Record::crime("B", "x", 1),
            Record::crime("A", "x", 2),
            Record::crime("B", "y", 3),
        ];
        let totals = region_totals(&records).unwrap();
        assert_eq!(
            totals,
            vec![
                Record::new().with(REGION, "B").with(TOTAL, 4),
                Record::new().with(REGION, "A").with(TOTAL, 2),
            ]
        );
    }
}

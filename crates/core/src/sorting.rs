//! Sorting
//!
//! Generic, stable sorting of record collections by a named field. Used by the admin product and
//! order tables.

use std::cmp::Ordering;

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    #[serde(alias = "asc")]
    Ascending,

    /// Largest first
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Field key plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortConfig {
    /// Field to sort by
    pub key: String,

    /// Direction to sort in
    pub direction: SortDirection,
}

impl SortConfig {
    /// Ascending sort on `key`.
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `key`.
    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    /// The config that results from selecting `key` while `previous` is active.
    ///
    /// Selecting the active key while ascending flips to descending; every other selection
    /// starts ascending.
    pub fn toggled(previous: Option<&SortConfig>, key: &str) -> Self {
        match previous {
            Some(previous)
                if previous.key == key && previous.direction == SortDirection::Ascending =>
            {
                Self::descending(key)
            }
            _ => Self::ascending(key),
        }
    }
}

/// A comparable field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortValue<'a> {
    /// Numeric field
    Number(Decimal),

    /// Text field, ordered lexicographically
    Text(&'a str),

    /// Calendar date
    Date(Date),
}

impl SortValue<'_> {
    /// Native ordering for values of the same kind; anything else is unordered.
    fn compare(left: Option<&Self>, right: Option<&Self>) -> Ordering {
        match (left, right) {
            (Some(SortValue::Number(a)), Some(SortValue::Number(b))) => a.cmp(b),
            (Some(SortValue::Text(a)), Some(SortValue::Text(b))) => a.cmp(b),
            (Some(SortValue::Date(a)), Some(SortValue::Date(b))) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Records that expose named fields for sorting.
pub trait Sortable {
    /// Value of the field named `key`, or `None` when there is no such field.
    fn sort_value(&self, key: &str) -> Option<SortValue<'_>>;
}

/// Return a sorted copy of `records`.
///
/// `None` returns the records in their original order. Equal keys keep their relative order,
/// and unknown keys or mismatched value kinds compare equal.
pub fn sort_records<T>(records: &[T], config: Option<&SortConfig>) -> Vec<T>
where
    T: Sortable + Clone,
{
    let Some(config) = config else {
        return records.to_vec();
    };

    stable_sort_by(records.to_vec(), &|a: &T, b: &T| {
        config.direction.apply(SortValue::compare(
            a.sort_value(&config.key).as_ref(),
            b.sort_value(&config.key).as_ref(),
        ))
    })
}

/// Top-down merge sort. Takes from the right run only when strictly less, so equal elements keep
/// their order. Never panics, even when `compare` is not a total order.
fn stable_sort_by<T, F>(mut items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = stable_sort_by(items, compare);
    let right = stable_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };

        let next = if take_right { right.next() } else { left.next() };

        merged.extend(next);
    }

    merged
}

use std::collections::BTreeMap;

use time::{Date, OffsetDateTime};

/// A single filter value as supplied by a filter control.
///
/// `Null` is the explicit "unset" marker: merging it into a filter set clears
/// the key, and it is never forwarded to the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Null,
    Text(String),
    Integer(i64),
    Flag(bool),
    DateRange(DateRange),
}

impl FilterValue {
    /// Returns `true` for values that carry nothing worth sending.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Null => true,
            FilterValue::Text(s) => s.is_empty(),
            FilterValue::DateRange(range) => range.is_empty(),
            FilterValue::Integer(_) | FilterValue::Flag(_) => false,
        }
    }

    /// Renders a scalar value as a query-parameter string.
    ///
    /// Composite values (date ranges) have no single string form and yield `None`.
    pub fn as_param(&self) -> Option<String> {
        match self {
            FilterValue::Text(s) => Some(s.clone()),
            FilterValue::Integer(n) => Some(n.to_string()),
            FilterValue::Flag(b) => Some(b.to_string()),
            FilterValue::Null | FilterValue::DateRange(_) => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Integer(n)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        FilterValue::Integer(n.into())
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Flag(b)
    }
}

impl From<DateRange> for FilterValue {
    fn from(range: DateRange) -> Self {
        FilterValue::DateRange(range)
    }
}

impl<V: Into<FilterValue>> From<Option<V>> for FilterValue {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(FilterValue::Null)
    }
}

/// One end of a date interval.
///
/// `Raw` holds whatever text the input control produced; it is reshaped when it
/// parses as a date and forwarded verbatim otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateBound {
    Date(Date),
    DateTime(OffsetDateTime),
    Raw(String),
}

impl From<Date> for DateBound {
    fn from(d: Date) -> Self {
        DateBound::Date(d)
    }
}

impl From<OffsetDateTime> for DateBound {
    fn from(dt: OffsetDateTime) -> Self {
        DateBound::DateTime(dt)
    }
}

impl From<&str> for DateBound {
    fn from(s: &str) -> Self {
        DateBound::Raw(s.to_string())
    }
}

/// Composite date-interval filter value. Either end may be open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateBound>,
    pub end: Option<DateBound>,
}

impl DateRange {
    pub fn new(start: impl Into<DateBound>, end: impl Into<DateBound>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    pub fn since(start: impl Into<DateBound>) -> Self {
        Self {
            start: Some(start.into()),
            end: None,
        }
    }

    pub fn until(end: impl Into<DateBound>) -> Self {
        Self {
            start: None,
            end: Some(end.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        let blank = |b: &Option<DateBound>| match b {
            None => true,
            Some(DateBound::Raw(s)) => s.is_empty(),
            Some(_) => false,
        };
        blank(&self.start) && blank(&self.end)
    }
}

/// Ordered mapping of filter key to value.
///
/// Ordering is by key, so two filter sets with the same entries compare equal
/// regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(BTreeMap<String, FilterValue>);

impl Filters {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Overlays `partial` onto `self`. Keys present in `partial` win; a
    /// [`FilterValue::Null`] in `partial` removes the key.
    pub fn merge(&mut self, partial: &Filters) {
        for (key, value) in partial.iter() {
            match value {
                FilterValue::Null => {
                    self.0.remove(key);
                }
                _ => {
                    self.0.insert(key.to_string(), value.clone());
                }
            }
        }
    }

    /// Returns the keys whose values differ between `self` and `other`,
    /// including keys present on only one side.
    pub fn changed_keys<'a>(&'a self, other: &'a Filters) -> Vec<&'a str> {
        let mut keys: Vec<&str> = self
            .iter()
            .filter(|(k, v)| other.get(k) != Some(*v))
            .map(|(k, _)| k)
            .collect();
        keys.extend(other.keys().filter(|k| !self.contains_key(k)));
        keys.sort_unstable();
        keys
    }

    /// Scalar entries as query-parameter pairs. Empty and composite values are skipped.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .filter(|(_, v)| !v.is_empty())
            .filter_map(|(k, v)| v.as_param().map(|p| (k.to_string(), p)))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Filters
where
    K: Into<String>,
    V: Into<FilterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

//! Client-side list filtering and summary tallies.
//!
//! Everything here is pure and synchronous: it runs against the cached
//! collection on every keystroke and never touches the network.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Filter value meaning "no constraint on this field".
pub const ALL: &str = "all";

/// A record that can be searched and filtered on the client.
pub trait Searchable {
    /// The fields free-text search looks at. Absent optional fields are
    /// reported as `""`.
    fn search_fields(&self) -> Vec<&str>;

    /// Wire value of a discrete field, `None` if the record has no such field.
    fn field_value(&self, field: &str) -> Option<Cow<'_, str>>;
}

/// An equality constraint on one discrete field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscreteFilter {
    pub field: String,
    pub value: String,
}

impl DiscreteFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.value == ALL
    }

    pub fn matches<T: Searchable + ?Sized>(&self, record: &T) -> bool {
        if self.is_unconstrained() {
            return true;
        }
        record
            .field_value(&self.field)
            .map_or(false, |value| value == self.value.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Expected field=value, got '{0}'")]
pub struct ParseFilterError(String);

impl FromStr for DiscreteFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((field, value)) if !field.trim().is_empty() => {
                Ok(DiscreteFilter::new(field.trim(), value.trim()))
            }
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

impl fmt::Display for DiscreteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}

/// The UI filter state of one list view: a search box plus dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    pub filters: Vec<DiscreteFilter>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_filter(field, value);
        self
    }

    /// Sets the dropdown for `field`, replacing any previous selection.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.filters.iter_mut().find(|f| f.field == field) {
            Some(existing) => existing.value = value,
            None => self.filters.push(DiscreteFilter { field, value }),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Resets the query and every dropdown back to "all".
    pub fn clear(&mut self) {
        self.query.clear();
        for filter in &mut self.filters {
            filter.value = ALL.to_string();
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.query.is_empty() && self.filters.iter().all(DiscreteFilter::is_unconstrained)
    }

    pub fn matches<T: Searchable + ?Sized>(&self, record: &T) -> bool {
        Matcher::new(self).matches(record)
    }
}

/// A filter state with the query lower-cased once up front.
struct Matcher<'a> {
    needle: String,
    filters: &'a [DiscreteFilter],
}

impl<'a> Matcher<'a> {
    fn new(state: &'a FilterState) -> Self {
        Self {
            needle: state.query.to_lowercase(),
            filters: &state.filters,
        }
    }

    fn matches<T: Searchable + ?Sized>(&self, record: &T) -> bool {
        let text_match = self.needle.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.needle));

        text_match && self.filters.iter().all(|f| f.matches(record))
    }
}

/// Visible subset of `items`, in original order.
pub fn apply<'a, T: Searchable>(items: &'a [T], state: &FilterState) -> Vec<&'a T> {
    let matcher = Matcher::new(state);
    items.iter().filter(|item| matcher.matches(*item)).collect()
}

/// Owned variant of [`apply`], for handing the visible rows to a renderer.
pub fn apply_cloned<T: Searchable + Clone>(items: &[T], state: &FilterState) -> Vec<T> {
    apply(items, state).into_iter().cloned().collect()
}

/// Counts of records grouped by one discrete field's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    counts: BTreeMap<String, usize>,
}

impl Tally {
    /// Single pass over the whole collection. Records without the field are skipped.
    pub fn by_field<T: Searchable>(items: &[T], field: &str) -> Self {
        let mut counts = BTreeMap::new();
        for item in items {
            if let Some(value) = item.field_value(field) {
                *counts.entry(value.into_owned()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    pub fn count(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .counts
            .iter()
            .map(|(value, count)| format!("{} {}", count, value))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

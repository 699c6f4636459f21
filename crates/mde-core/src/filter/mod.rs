//! Filter predicates and the filter set

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::Record;

/// Errors raised by filter mutations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("invalid bounds for filter '{name}': {min} > {max}")]
    InvalidBounds { name: String, min: f64, max: f64 },
}

/// One named predicate over a record attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Inclusive numeric bounds over a number field
    Range { field: String, min: f64, max: f64 },
    /// Set membership over a text field
    ///
    /// An empty set matches nothing. That is an explicit state (every
    /// category deselected in the UI), not an error.
    Categorical {
        field: String,
        allowed: BTreeSet<String>,
    },
}

impl Filter {
    /// Inclusive range over a numeric field
    pub fn range(field: impl Into<String>, min: f64, max: f64) -> Self {
        Filter::Range {
            field: field.into(),
            min,
            max,
        }
    }

    /// Membership filter over a text field
    pub fn categorical<S: Into<String>>(
        field: impl Into<String>,
        allowed: impl IntoIterator<Item = S>,
    ) -> Self {
        Filter::Categorical {
            field: field.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `record` satisfies this predicate
    ///
    /// A record that lacks the filtered field, or carries it with the wrong
    /// type, fails the filter. This matches query semantics where a bound
    /// never matches an absent attribute.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::Range { field, min, max } => record
                .number(field)
                .map(|value| *min <= value && value <= *max)
                .unwrap_or(false),
            Filter::Categorical { field, allowed } => record
                .text(field)
                .map(|value| allowed.contains(value))
                .unwrap_or(false),
        }
    }

    /// The field this predicate examines
    pub fn field(&self) -> &str {
        match self {
            Filter::Range { field, .. } => field,
            Filter::Categorical { field, .. } => field,
        }
    }
}

/// The current set of active filters
///
/// Maps filter name to predicate; predicates combine by logical AND. An
/// empty set matches every record.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: AHashMap<String, Filter>,
}

impl FilterSet {
    /// Create an empty (fully permissive) filter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace or insert the predicate for `name`
    ///
    /// A range filter with inverted (or NaN) bounds is rejected with
    /// [`FilterError::InvalidBounds`] and the previous entry for `name`, or
    /// its absence, is retained untouched.
    pub fn set_filter(
        &mut self,
        name: impl Into<String>,
        filter: Filter,
    ) -> Result<(), FilterError> {
        let name = name.into();
        if let Filter::Range { min, max, .. } = &filter {
            if !(min <= max) {
                return Err(FilterError::InvalidBounds {
                    name,
                    min: *min,
                    max: *max,
                });
            }
        }
        self.filters.insert(name, filter);
        Ok(())
    }

    /// Remove the predicate for `name`, returning it if present
    pub fn remove_filter(&mut self, name: &str) -> Option<Filter> {
        self.filters.remove(name)
    }

    /// The predicate currently set for `name`
    pub fn get(&self, name: &str) -> Option<&Filter> {
        self.filters.get(name)
    }

    /// Number of active filters
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether no filters are set
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Whether `record` satisfies every active predicate
    pub fn evaluate(&self, record: &Record) -> bool {
        self.filters.values().all(|filter| filter.matches(record))
    }

    /// Lazily filter a record sequence, preserving input order
    pub fn filter<'a, I>(&'a self, records: I) -> impl Iterator<Item = Arc<Record>> + 'a
    where
        I: IntoIterator<Item = Arc<Record>> + 'a,
    {
        records
            .into_iter()
            .filter(move |record| self.evaluate(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;

    fn movie(id: u64, vote: f64, runtime: f64) -> Arc<Record> {
        Arc::new(Record::new(
            id,
            [
                ("vote_average".to_string(), FieldValue::Number(vote)),
                ("runtime".to_string(), FieldValue::Number(runtime)),
            ],
            serde_json::Value::Null,
        ))
    }

    #[test]
    fn test_empty_set_matches_everything() {
        let filters = FilterSet::new();
        assert!(filters.evaluate(&movie(1, 7.5, 120.0)));
        assert!(filters.evaluate(&movie(2, 5.0, 90.0)));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let mut filters = FilterSet::new();
        filters
            .set_filter("vote", Filter::range("vote_average", 5.0, 7.5))
            .unwrap();

        assert!(filters.evaluate(&movie(1, 5.0, 100.0)));
        assert!(filters.evaluate(&movie(2, 7.5, 100.0)));
        assert!(!filters.evaluate(&movie(3, 4.9, 100.0)));
        assert!(!filters.evaluate(&movie(4, 7.6, 100.0)));
    }

    #[test]
    fn test_filters_combine_by_and() {
        let mut filters = FilterSet::new();
        filters
            .set_filter("vote", Filter::range("vote_average", 6.0, 10.0))
            .unwrap();
        filters
            .set_filter("runtime", Filter::range("runtime", 0.0, 100.0))
            .unwrap();

        // Passes vote but not runtime
        assert!(!filters.evaluate(&movie(1, 7.5, 120.0)));
        // Passes both
        assert!(filters.evaluate(&movie(2, 6.5, 90.0)));
    }

    #[test]
    fn test_inverted_bounds_rejected_and_prior_state_kept() {
        let mut filters = FilterSet::new();
        filters
            .set_filter("vote", Filter::range("vote_average", 0.0, 10.0))
            .unwrap();

        let err = filters
            .set_filter("vote", Filter::range("vote_average", 8.0, 2.0))
            .unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidBounds {
                name: "vote".to_string(),
                min: 8.0,
                max: 2.0,
            }
        );

        // The previous predicate is still in place
        assert_eq!(
            filters.get("vote"),
            Some(&Filter::range("vote_average", 0.0, 10.0))
        );

        // Rejection with no prior entry leaves the set empty
        let mut fresh = FilterSet::new();
        assert!(fresh
            .set_filter("vote", Filter::range("vote_average", 8.0, 2.0))
            .is_err());
        assert!(fresh.get("vote").is_none());
    }

    #[test]
    fn test_nan_bounds_rejected() {
        let mut filters = FilterSet::new();
        assert!(filters
            .set_filter("vote", Filter::range("vote_average", f64::NAN, 10.0))
            .is_err());
        assert!(filters.is_empty());
    }

    #[test]
    fn test_empty_categorical_matches_nothing() {
        let mut filters = FilterSet::new();
        filters
            .set_filter("year", Filter::categorical::<String>("year_released", []))
            .unwrap();

        let record = Arc::new(Record::new(
            1,
            [("year_released".to_string(), FieldValue::from("1999"))],
            serde_json::Value::Null,
        ));
        assert!(!filters.evaluate(&record));
    }

    #[test]
    fn test_categorical_membership() {
        let mut filters = FilterSet::new();
        filters
            .set_filter(
                "year",
                Filter::categorical("year_released", ["1994", "1999"]),
            )
            .unwrap();

        let hit = Arc::new(Record::new(
            1,
            [("year_released".to_string(), FieldValue::from("1994"))],
            serde_json::Value::Null,
        ));
        let miss = Arc::new(Record::new(
            2,
            [("year_released".to_string(), FieldValue::from("2001"))],
            serde_json::Value::Null,
        ));
        assert!(filters.evaluate(&hit));
        assert!(!filters.evaluate(&miss));
    }

    #[test]
    fn test_missing_or_mistyped_field_fails_filter() {
        let mut filters = FilterSet::new();
        filters
            .set_filter("vote", Filter::range("vote_average", 0.0, 10.0))
            .unwrap();

        let missing = Arc::new(Record::new(1, [], serde_json::Value::Null));
        assert!(!filters.evaluate(&missing));

        let mistyped = Arc::new(Record::new(
            2,
            [("vote_average".to_string(), FieldValue::from("high"))],
            serde_json::Value::Null,
        ));
        assert!(!filters.evaluate(&mistyped));
    }

    #[test]
    fn test_filter_preserves_order_and_consistency() {
        let records = vec![
            movie(1, 7.5, 120.0),
            movie(2, 5.0, 90.0),
            movie(3, 9.1, 150.0),
            movie(4, 6.0, 80.0),
        ];

        let mut filters = FilterSet::new();
        filters
            .set_filter("vote", Filter::range("vote_average", 6.0, 10.0))
            .unwrap();

        let passed: Vec<_> = filters.filter(records.iter().cloned()).collect();
        let ids: Vec<_> = passed.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![1, 3, 4]);

        // Every record in the result satisfies evaluate; every record left
        // out fails it.
        for record in &passed {
            assert!(filters.evaluate(record));
        }
        for record in &records {
            if !ids.contains(&record.id()) {
                assert!(!filters.evaluate(record));
            }
        }
    }

    #[test]
    fn test_remove_filter_restores_permissive_set() {
        let mut filters = FilterSet::new();
        filters
            .set_filter("vote", Filter::range("vote_average", 6.0, 10.0))
            .unwrap();
        assert!(!filters.evaluate(&movie(1, 5.0, 90.0)));

        let removed = filters.remove_filter("vote");
        assert!(removed.is_some());
        assert!(filters.is_empty());
        assert!(filters.evaluate(&movie(1, 5.0, 90.0)));
    }
}

//! # Paging and Sorting
//!
//! Shared list behaviour for `GET /products` and `GET /users`.
//!
//! ```text
//! ?page=1&pageSize=2&sortBy=-price
//!        │
//!        ▼
//! records ──► stable sort on "price" (descending) ──► skip 2 ──► take 2
//!        │
//!        ▼
//! { page: 1, pageSize: 2, total: <all records>, items: [..2 records..] }
//! ```
//!
//! Sort keys are wire field names. Dotted keys reach into nested objects
//! (`address.city`). A key that no record carries leaves the order as is.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::types::Page;
use crate::DEFAULT_PAGE_SIZE;

// =============================================================================
// Query
// =============================================================================

/// Sort direction and field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    /// Parses `field` or `-field`. Blank input means "no sorting".
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (field, descending) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        if field.is_empty() {
            return None;
        }
        Some(SortKey {
            field: field.to_string(),
            descending,
        })
    }
}

/// Paging and sorting parameters of a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Zero-based page index.
    pub page: usize,
    pub page_size: usize,
    pub sort: Option<SortKey>,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl ListQuery {
    /// Reads `page`, `pageSize` and `sortBy` (or `sort`) from query
    /// parameters. Other parameters are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut query = ListQuery::default();

        match parse_count(params, "page") {
            Ok(Some(page)) => query.page = page,
            Ok(None) => {}
            Err(err) => errors.push(err),
        }
        match parse_count(params, "pageSize") {
            Ok(Some(0)) | Ok(None) => {}
            Ok(Some(page_size)) => query.page_size = page_size,
            Err(err) => errors.push(err),
        }

        query.sort = params
            .get("sortBy")
            .or_else(|| params.get("sort"))
            .and_then(|raw| SortKey::parse(raw));

        if errors.is_empty() {
            Ok(query)
        } else {
            Err(errors)
        }
    }

    /// Sorts and slices `records` into a page.
    pub fn paginate<T: Serialize>(&self, records: Vec<T>) -> Page<T> {
        let total = records.len();
        let records = match &self.sort {
            Some(sort) => sort_records(records, sort),
            None => records,
        };
        let items = records
            .into_iter()
            .skip(self.page.saturating_mul(self.page_size))
            .take(self.page_size)
            .collect();

        Page {
            page: self.page,
            page_size: self.page_size,
            total,
            items,
        }
    }
}

fn parse_count(
    params: &HashMap<String, String>,
    name: &str,
) -> Result<Option<usize>, ValidationError> {
    let raw = match params.get(name).map(|value| value.trim()) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };
    raw.parse::<usize>()
        .map(Some)
        .map_err(|_| ValidationError::InvalidType {
            field: name.to_string(),
            expected: "non-negative integer".to_string(),
        })
}

// =============================================================================
// Sorting
// =============================================================================

fn sort_records<T: Serialize>(records: Vec<T>, sort: &SortKey) -> Vec<T> {
    let pointer = format!("/{}", sort.field.replace('.', "/"));
    let mut keyed: Vec<(Value, T)> = records
        .into_iter()
        .map(|record| {
            let key = serde_json::to_value(&record)
                .ok()
                .and_then(|value| value.pointer(&pointer).cloned())
                .unwrap_or(Value::Null);
            (key, record)
        })
        .collect();

    // sort_by is stable, so equal keys keep their relative order
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = compare_values(a, b);
        if sort.descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Orders JSON scalars. Values of different kinds compare equal, so a
/// missing field never reorders anything.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Row {
        id: i64,
        last_name: &'static str,
        score: f64,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, last_name: "Smith", score: 2.0 },
            Row { id: 2, last_name: "Adams", score: 3.5 },
            Row { id: 3, last_name: "Jones", score: 2.0 },
            Row { id: 4, last_name: "Brown", score: 1.0 },
        ]
    }

    fn ids(page: &Page<Row>) -> Vec<i64> {
        page.items.iter().map(|row| row.id).collect()
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let query = ListQuery::from_params(&HashMap::new()).unwrap();
        assert_eq!(query, ListQuery::default());

        let query = ListQuery::from_params(&params(&[("pageSize", "0")])).unwrap();
        assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_non_numeric_params_are_rejected() {
        let errors =
            ListQuery::from_params(&params(&[("page", "x"), ("pageSize", "-1")])).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(ValidationError::field).collect();
        assert_eq!(fields, vec!["page", "pageSize"]);
    }

    #[test]
    fn test_paging_slices_after_sorting() {
        let query =
            ListQuery::from_params(&params(&[("page", "1"), ("pageSize", "2"), ("sortBy", "lastName")]))
                .unwrap();
        let page = query.paginate(rows());
        assert_eq!(page.total, 4);
        assert_eq!(ids(&page), vec![3, 1]);
    }

    #[test]
    fn test_descending_sort_is_stable() {
        let query = ListQuery::from_params(&params(&[("sort", "-score")])).unwrap();
        assert_eq!(ids(&query.paginate(rows())), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_unknown_sort_key_keeps_order() {
        let query = ListQuery::from_params(&params(&[("sortBy", "nope")])).unwrap();
        assert_eq!(ids(&query.paginate(rows())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let query = ListQuery::from_params(&params(&[("page", "9")])).unwrap();
        let page = query.paginate(rows());
        assert!(page.items.is_empty());
        assert_eq!(page.total, 4);
    }
}

//! Criteria translation for the in-memory document backend.
//!
//! Filters become predicates over raw JSON documents (field lookup by
//! top-level key), sorts become a multi-key comparator, and pagination
//! becomes a skip/limit window. Field comparisons bridge the document
//! encodings: numbers compare as floats, identifiers as their string form.

use std::cmp::Ordering;

use serde_json::Value;

use verdant_core::criteria::{
    Criteria, Filter, FilterOperator, FilterValue, ScalarValue, Sort, SortDirection,
};

/// Selects the page of documents matching `criteria` and the full matching
/// count: filter, count, sort, skip/limit. The count derives from the same
/// snapshot as the page here, though the repository contract promises no
/// such consistency.
pub fn execute<'a>(criteria: &Criteria, docs: impl Iterator<Item = &'a Value>) -> (Vec<&'a Value>, u64) {
    let mut matches: Vec<&Value> = docs.filter(|doc| matches_all(doc, &criteria.filters)).collect();
    let total = matches.len() as u64;

    if !criteria.sorts.is_empty() {
        matches.sort_by(|a, b| compare_documents(a, b, &criteria.sorts));
    }

    let pagination = criteria.effective_pagination();
    let page: Vec<&Value> = matches
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.limit())
        .collect();

    (page, total)
}

/// Whether a document satisfies every filter (conjunction).
#[must_use]
pub fn matches_all(doc: &Value, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| matches_filter(doc, filter))
}

fn matches_filter(doc: &Value, filter: &Filter) -> bool {
    let field = doc.get(&filter.field);
    match (filter.operator, &filter.value) {
        (FilterOperator::Eq, FilterValue::Scalar(expected)) => {
            field.is_some_and(|v| scalar_cmp(v, expected) == Some(Ordering::Equal))
        }
        // NotEq and NotIn also match documents missing the field, so that
        // "status != harvested" covers records written before the field
        // existed.
        (FilterOperator::NotEq, FilterValue::Scalar(expected)) => {
            field.is_none_or(|v| scalar_cmp(v, expected) != Some(Ordering::Equal))
        }
        (FilterOperator::Gt, FilterValue::Scalar(expected)) => {
            field.is_some_and(|v| scalar_cmp(v, expected) == Some(Ordering::Greater))
        }
        (FilterOperator::Gte, FilterValue::Scalar(expected)) => field.is_some_and(|v| {
            matches!(
                scalar_cmp(v, expected),
                Some(Ordering::Greater | Ordering::Equal)
            )
        }),
        (FilterOperator::Lt, FilterValue::Scalar(expected)) => {
            field.is_some_and(|v| scalar_cmp(v, expected) == Some(Ordering::Less))
        }
        (FilterOperator::Lte, FilterValue::Scalar(expected)) => field.is_some_and(|v| {
            matches!(scalar_cmp(v, expected), Some(Ordering::Less | Ordering::Equal))
        }),
        (FilterOperator::In, operand) => {
            field.is_some_and(|v| member_of(v, operand))
        }
        (FilterOperator::NotIn, operand) => field.is_none_or(|v| !member_of(v, operand)),
        // A membership list fed to a scalar operator matches nothing; the
        // criteria was malformed and the safe translation is an empty result.
        (_, FilterValue::List(_)) => false,
    }
}

fn member_of(field: &Value, operand: &FilterValue) -> bool {
    match operand {
        // A scalar operand reads as a one-element list.
        FilterValue::Scalar(expected) => scalar_cmp(field, expected) == Some(Ordering::Equal),
        FilterValue::List(candidates) => candidates
            .iter()
            .any(|expected| scalar_cmp(field, expected) == Some(Ordering::Equal)),
    }
}

/// Compares a document field against a filter scalar, bridging encodings.
/// `None` means the two are incomparable (type mismatch).
#[allow(clippy::cast_precision_loss)]
fn scalar_cmp(field: &Value, expected: &ScalarValue) -> Option<Ordering> {
    match expected {
        ScalarValue::Str(s) => field.as_str().map(|f| f.cmp(s.as_str())),
        ScalarValue::Int(i) => field.as_f64().and_then(|f| f.partial_cmp(&(*i as f64))),
        ScalarValue::Float(x) => field.as_f64().and_then(|f| f.partial_cmp(x)),
        ScalarValue::Bool(b) => field.as_bool().map(|f| f.cmp(b)),
        ScalarValue::Id(id) => field.as_str().map(|f| f.cmp(id.to_string().as_str())),
    }
}

/// Multi-key document comparator; earlier sort keys take precedence and
/// documents missing a sort field order last.
#[must_use]
pub fn compare_documents(a: &Value, b: &Value, sorts: &[Sort]) -> Ordering {
    for sort in sorts {
        let ordering = match (a.get(&sort.field), b.get(&sort.field)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => field_cmp(left, right),
        };
        let ordering = match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn field_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(left), Value::String(right)) => left.cmp(right),
        (Value::Number(left), Value::Number(right)) => left
            .as_f64()
            .partial_cmp(&right.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::Bool(left), Value::Bool(right)) => left.cmp(right),
        // Mixed or non-scalar fields carry no useful order.
        _ => Ordering::Equal,
    }
}

//! Backend-agnostic filter/sort/pagination specification.
//!
//! A `Criteria` value describes *what* to select; each read-store backend
//! owns the translation into its native query shape. Criteria has no
//! knowledge of any backing store.

use uuid::Uuid;

/// A single comparable value in a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// String value.
    Str(String),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Entity identifier.
    Id(Uuid),
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Uuid> for ScalarValue {
    fn from(value: Uuid) -> Self {
        Self::Id(value)
    }
}

/// The right-hand side of a filter: one scalar, or a list for membership
/// operators.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// A single scalar operand.
    Scalar(ScalarValue),
    /// A list operand for `In` / `NotIn`.
    List(Vec<ScalarValue>),
}

impl From<ScalarValue> for FilterValue {
    fn from(value: ScalarValue) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<Vec<ScalarValue>> for FilterValue {
    fn from(values: Vec<ScalarValue>) -> Self {
        Self::List(values)
    }
}

/// Field comparison operators: equality, range, membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Field equals the operand.
    Eq,
    /// Field differs from the operand (also matches missing fields).
    NotEq,
    /// Field is strictly greater than the operand.
    Gt,
    /// Field is greater than or equal to the operand.
    Gte,
    /// Field is strictly less than the operand.
    Lt,
    /// Field is less than or equal to the operand.
    Lte,
    /// Field is one of the operand list.
    In,
    /// Field is none of the operand list (also matches missing fields).
    NotIn,
}

/// One predicate over a named field.
#[derive(Debug, Clone)]
pub struct Filter {
    /// Field name in the view-model document.
    pub field: String,
    /// Comparison operator.
    pub operator: FilterOperator,
    /// Right-hand operand.
    pub value: FilterValue,
}

impl Filter {
    /// Builds a filter.
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// One sort key; earlier entries take precedence.
#[derive(Debug, Clone)]
pub struct Sort {
    /// Field name in the view-model document.
    pub field: String,
    /// Direction for this key.
    pub direction: SortDirection,
}

impl Sort {
    /// Builds an ascending sort key.
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Builds a descending sort key.
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Page size applied when a criteria carries no pagination.
pub const DEFAULT_PER_PAGE: u32 = 25;

/// A 1-based page request.
///
/// `new` normalizes zeroes up to 1 so the offset arithmetic stays sound
/// regardless of caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    per_page: u32,
}

impl Pagination {
    /// Builds a pagination value; `page` and `per_page` are floored at 1.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// The requested page, 1-based.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Records to skip: `(page - 1) * per_page`.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }

    /// Maximum records to return.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.per_page as usize
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// Immutable filter/sort/pagination specification used uniformly across all
/// read repositories.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    /// Conjunctive predicates; all must hold.
    pub filters: Vec<Filter>,
    /// Sort keys in precedence order.
    pub sorts: Vec<Sort>,
    /// Page request; `None` means the backend default page.
    pub pagination: Option<Pagination>,
}

impl Criteria {
    /// Builds a criteria from its parts.
    #[must_use]
    pub fn new(filters: Vec<Filter>, sorts: Vec<Sort>, pagination: Option<Pagination>) -> Self {
        Self {
            filters,
            sorts,
            pagination,
        }
    }

    /// Matches everything, default page.
    #[must_use]
    pub fn unfiltered() -> Self {
        Self::default()
    }

    /// Adds a filter.
    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Adds a sort key.
    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    /// Sets the page request.
    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// The page request to execute: the explicit one, or the backend default.
    #[must_use]
    pub fn effective_pagination(&self) -> Pagination {
        self.pagination.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_PER_PAGE, Criteria, Pagination};

    #[test]
    fn test_offset_is_zero_based_from_one_based_pages() {
        assert_eq!(Pagination::new(1, 20).offset(), 0);
        assert_eq!(Pagination::new(3, 20).offset(), 40);
        assert_eq!(Pagination::new(3, 20).limit(), 20);
    }

    #[test]
    fn test_pagination_floors_zero_inputs() {
        let pagination = Pagination::new(0, 0);
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.per_page(), 1);
    }

    #[test]
    fn test_omitted_pagination_falls_back_to_backend_default() {
        let effective = Criteria::unfiltered().effective_pagination();
        assert_eq!(effective.page(), 1);
        assert_eq!(effective.per_page(), DEFAULT_PER_PAGE);
    }
}

use crate::types::{
    render_list, validate_column_name, Filter, FilterOperator, IntoFilterValue, IsValue,
    RequestParts,
};

/// Trait providing the filter methods of the query builders.
///
/// Each filter becomes one `column=op.value` query parameter. A filter with
/// an invalid column name is logged and skipped.
pub trait Filterable: Sized {
    /// Get a mutable reference to the collected request parts.
    fn parts_mut(&mut self) -> &mut RequestParts;

    /// Filter: column = value
    fn eq(self, column: &str, value: impl IntoFilterValue) -> Self {
        push_filter(self, "eq", column, FilterOperator::Eq, value.into_filter_value(), false)
    }

    /// Filter: column != value
    fn neq(self, column: &str, value: impl IntoFilterValue) -> Self {
        push_filter(self, "neq", column, FilterOperator::Neq, value.into_filter_value(), false)
    }

    /// Filter: column > value
    fn gt(self, column: &str, value: impl IntoFilterValue) -> Self {
        push_filter(self, "gt", column, FilterOperator::Gt, value.into_filter_value(), false)
    }

    /// Filter: column >= value
    fn gte(self, column: &str, value: impl IntoFilterValue) -> Self {
        push_filter(self, "gte", column, FilterOperator::Gte, value.into_filter_value(), false)
    }

    /// Filter: column < value
    fn lt(self, column: &str, value: impl IntoFilterValue) -> Self {
        push_filter(self, "lt", column, FilterOperator::Lt, value.into_filter_value(), false)
    }

    /// Filter: column <= value
    fn lte(self, column: &str, value: impl IntoFilterValue) -> Self {
        push_filter(self, "lte", column, FilterOperator::Lte, value.into_filter_value(), false)
    }

    /// Filter: column LIKE pattern (`*` is the wildcard)
    fn like(self, column: &str, pattern: impl IntoFilterValue) -> Self {
        push_filter(self, "like", column, FilterOperator::Like, pattern.into_filter_value(), false)
    }

    /// Filter: column ILIKE pattern (case-insensitive)
    fn ilike(self, column: &str, pattern: impl IntoFilterValue) -> Self {
        push_filter(self, "ilike", column, FilterOperator::ILike, pattern.into_filter_value(), false)
    }

    /// Filter: column IS NULL / IS NOT NULL / IS TRUE / IS FALSE / IS UNKNOWN
    fn is(self, column: &str, value: IsValue) -> Self {
        let negated = value == IsValue::NotNull;
        push_filter(self, "is", column, FilterOperator::Is, value.as_str().to_string(), negated)
    }

    /// Filter: column IN (values)
    fn in_<V: IntoFilterValue>(self, column: &str, values: impl IntoIterator<Item = V>) -> Self {
        let rendered = render_list(values.into_iter().map(|v| v.into_filter_value()).collect());
        push_filter(self, "in_", column, FilterOperator::In, rendered, false)
    }

    /// Negate an operator: `column=not.op.value`.
    fn not(self, column: &str, operator: FilterOperator, value: impl IntoFilterValue) -> Self {
        push_filter(self, "not", column, operator, value.into_filter_value(), true)
    }
}

fn push_filter<F: Filterable>(
    mut builder: F,
    filter_name: &str,
    column: &str,
    operator: FilterOperator,
    value: String,
    negated: bool,
) -> F {
    if let Err(e) = validate_column_name(column) {
        tracing::error!("Invalid column name in {filter_name} filter: {e}");
        return builder;
    }
    builder.parts_mut().filters.push(Filter {
        column: column.to_string(),
        operator,
        value,
        negated,
    });
    builder
}

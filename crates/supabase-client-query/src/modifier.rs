use crate::filter::Filterable;
use crate::types::{validate_column_name, CountOption, NullsPosition, OrderClause, OrderDirection};

/// Trait providing modifier methods (order, limit, range, single, count).
pub trait Modifiable: Filterable {
    /// Order by a column.
    fn order(mut self, column: &str, direction: OrderDirection) -> Self {
        if let Err(e) = validate_column_name(column) {
            tracing::error!("Invalid column name in order: {e}");
            return self;
        }
        self.parts_mut().orders.push(OrderClause {
            column: column.to_string(),
            direction,
            nulls: None,
        });
        self
    }

    /// Order by a column with explicit nulls positioning.
    fn order_with_nulls(
        mut self,
        column: &str,
        direction: OrderDirection,
        nulls: NullsPosition,
    ) -> Self {
        if let Err(e) = validate_column_name(column) {
            tracing::error!("Invalid column name in order_with_nulls: {e}");
            return self;
        }
        self.parts_mut().orders.push(OrderClause {
            column: column.to_string(),
            direction,
            nulls: Some(nulls),
        });
        self
    }

    /// Limit the number of rows returned.
    fn limit(mut self, count: i64) -> Self {
        self.parts_mut().limit = Some(count);
        self
    }

    /// Return rows `from..=to` (zero-based, inclusive). `to < from` selects
    /// no rows.
    fn range(mut self, from: i64, to: i64) -> Self {
        self.parts_mut().offset = Some(from);
        self.parts_mut().limit = Some(to.saturating_sub(from).saturating_add(1).max(0));
        self
    }

    /// Expect exactly one row; PostgREST answers 406 otherwise.
    fn single(mut self) -> Self {
        self.parts_mut().single = true;
        self
    }

    /// Request a row count with a specific counting strategy.
    fn count(mut self, option: CountOption) -> Self {
        self.parts_mut().count = option;
        self
    }
}

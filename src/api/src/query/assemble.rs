//! Final query assembly: base query, WHERE fragment, ORDER BY fragment.

use super::error::QueryError;
use super::field::Field;
use super::filter::{compile_filter, Condition};
use super::order_by::{compile_order_by, render_order_by, OrderTerm};
use super::value::SqlValue;

/// An entity's listing filter as seen by the query engine.
pub trait Criteria {
    type Field: Field;

    /// Active conditions, always produced in the same per-entity order.
    fn conditions(&self) -> Vec<Condition<Self::Field>>;

    /// Raw client order-by expression; empty means default ordering.
    fn order_by(&self) -> &str;
}

/// A query template plus its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

/// Default ordering: newest start time first.
pub fn default_order_by<F: Field>() -> String {
    render_order_by(&[OrderTerm::desc(F::START_TIME)])
}

/// Build `base + WHERE + ORDER BY` for a listing.
///
/// An absent filter contributes no conditions and the default ordering.
pub fn assemble<C: Criteria>(base: &str, criteria: Option<&C>) -> Result<CompiledQuery, QueryError> {
    let conditions = criteria.map(|c| c.conditions()).unwrap_or_default();
    let filter = compile_filter(&conditions)?;

    let order_by = match criteria.map(|c| c.order_by()) {
        Some(raw) if !raw.is_empty() => compile_order_by::<C::Field>(raw)?,
        _ => default_order_by::<C::Field>(),
    };

    Ok(CompiledQuery {
        sql: format!("{}{}{}", base, filter.sql, order_by),
        args: filter.args,
    })
}

//! Errors raised while compiling a listing query.

use thiserror::Error;

/// Query compilation errors.
///
/// Both variants describe bad client input. They are returned to the caller
/// as-is and never replaced by a fallback query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Malformed order-by expression: unknown field, bad direction token, or
    /// wrong number of words in a term.
    #[error("invalid order by field")]
    InvalidOrderByField,

    /// A membership condition with no values would render `IN ()`.
    #[error("membership filter on `{column}` has no values")]
    EmptyMembershipSet { column: &'static str },
}

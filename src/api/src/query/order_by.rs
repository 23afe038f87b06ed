//! Order-by expression parsing and rendering.
//!
//! Grammar: a comma-separated list of terms, each either `<field>` (ascending)
//! or `<field> desc` (descending, `desc` matched case-insensitively). An
//! explicit `asc` is not part of the grammar. Example: `meeting_id desc, id`.

use super::error::QueryError;
use super::field::Field;

const SORT_ORDER_DESC: &str = "desc";

/// Sort direction of one order term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// A validated (field, direction) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm<F> {
    pub field: F,
    pub direction: Direction,
}

impl<F: Field> OrderTerm<F> {
    pub fn desc(field: F) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }
}

/// Parse a raw order-by expression into terms, in input order.
///
/// Any malformed term fails the whole expression.
pub fn parse_order_by<F: Field>(raw: &str) -> Result<Vec<OrderTerm<F>>, QueryError> {
    raw.split(',').map(parse_term::<F>).collect()
}

fn parse_term<F: Field>(term: &str) -> Result<OrderTerm<F>, QueryError> {
    let words: Vec<&str> = term.trim_matches(' ').split(' ').collect();

    let direction = match words.as_slice() {
        [_] => Direction::Asc,
        [_, dir] if dir.eq_ignore_ascii_case(SORT_ORDER_DESC) => Direction::Desc,
        _ => return Err(QueryError::InvalidOrderByField),
    };

    let field = F::from_token(words[0]).ok_or(QueryError::InvalidOrderByField)?;

    Ok(OrderTerm { field, direction })
}

/// Render terms as ` ORDER BY a ASC, b DESC`.
///
/// Only canonical column names are written, never the client's token.
pub fn render_order_by<F: Field>(terms: &[OrderTerm<F>]) -> String {
    if terms.is_empty() {
        return String::new();
    }

    let rendered: Vec<String> = terms
        .iter()
        .map(|t| format!("{} {}", t.field.column(), t.direction.as_sql()))
        .collect();

    format!(" ORDER BY {}", rendered.join(", "))
}

/// Parse and render in one step.
pub fn compile_order_by<F: Field>(raw: &str) -> Result<String, QueryError> {
    let terms = parse_order_by::<F>(raw)?;
    Ok(render_order_by(&terms))
}

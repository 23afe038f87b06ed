//! Listing query construction shared by the race and event repositories.
//!
//! Client input (an order-by expression and a structured filter) is checked
//! against each entity's closed field set and compiled into a SQL template
//! plus positional arguments. Filter values are only ever bound as `?`
//! arguments; only canonical column names are written into the template.

pub mod assemble;
pub mod error;
pub mod field;
pub mod filter;
pub mod order_by;
pub mod status;
pub mod value;

pub use assemble::{assemble, CompiledQuery, Criteria};
pub use error::QueryError;
pub use field::Field;
pub use filter::Condition;
pub use status::Status;
pub use value::SqlValue;

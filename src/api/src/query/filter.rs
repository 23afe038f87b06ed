//! WHERE clause compilation.

use super::error::QueryError;
use super::field::Field;
use super::value::SqlValue;

/// One filter condition on a known field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition<F> {
    /// `<column> IN (?, ...)`, one placeholder per value.
    In { field: F, values: Vec<SqlValue> },
    /// `<column> = ?` bound to `true`.
    IsTrue { field: F },
}

/// Compiled WHERE fragment and its positional arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereClause {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

/// Compile conditions, in the given order, into ` WHERE a AND b`.
///
/// No conditions yield an empty fragment without the `WHERE` keyword.
pub fn compile_filter<F: Field>(conditions: &[Condition<F>]) -> Result<WhereClause, QueryError> {
    let mut clauses = Vec::with_capacity(conditions.len());
    let mut args = Vec::new();

    for condition in conditions {
        match condition {
            Condition::In { field, values } => {
                if values.is_empty() {
                    return Err(QueryError::EmptyMembershipSet {
                        column: field.column(),
                    });
                }

                let placeholders = vec!["?"; values.len()].join(",");
                clauses.push(format!("{} IN ({})", field.column(), placeholders));
                args.extend(values.iter().cloned());
            }
            Condition::IsTrue { field } => {
                clauses.push(format!("{} = ?", field.column()));
                args.push(SqlValue::Bool(true));
            }
        }
    }

    if clauses.is_empty() {
        return Ok(WhereClause::default());
    }

    Ok(WhereClause {
        sql: format!(" WHERE {}", clauses.join(" AND ")),
        args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::field::fixtures::TestField;

    fn meeting_ids(ids: &[i64]) -> Condition<TestField> {
        Condition::In {
            field: TestField::MeetingId,
            values: ids.iter().copied().map(SqlValue::from).collect(),
        }
    }

    #[test]
    fn test_no_conditions() {
        let clause = compile_filter::<TestField>(&[]).unwrap();
        assert!(clause.sql.is_empty());
        assert!(clause.args.is_empty());
        assert!(!clause.sql.contains("WHERE"));
    }

    #[test]
    fn test_membership_placeholders_match_values() {
        let clause = compile_filter(&[meeting_ids(&[7, 8, 9])]).unwrap();
        assert_eq!(clause.sql, " WHERE meeting_id IN (?,?,?)");
        assert_eq!(
            clause.args,
            vec![SqlValue::Integer(7), SqlValue::Integer(8), SqlValue::Integer(9)]
        );
    }

    #[test]
    fn test_membership_single_value() {
        let clause = compile_filter(&[meeting_ids(&[3])]).unwrap();
        assert_eq!(clause.sql, " WHERE meeting_id IN (?)");
        assert_eq!(clause.args, vec![SqlValue::Integer(3)]);
    }

    #[test]
    fn test_membership_keeps_input_order_and_duplicates() {
        let clause = compile_filter(&[meeting_ids(&[5, 1, 5])]).unwrap();
        assert_eq!(clause.sql, " WHERE meeting_id IN (?,?,?)");
        assert_eq!(
            clause.args,
            vec![SqlValue::Integer(5), SqlValue::Integer(1), SqlValue::Integer(5)]
        );
    }

    #[test]
    fn test_empty_membership_fails() {
        let err = compile_filter(&[meeting_ids(&[])]).unwrap_err();
        assert_eq!(err, QueryError::EmptyMembershipSet { column: "meeting_id" });
    }

    #[test]
    fn test_flag_binds_true() {
        let clause = compile_filter(&[Condition::IsTrue {
            field: TestField::Visible,
        }])
        .unwrap();
        assert_eq!(clause.sql, " WHERE visible = ?");
        assert_eq!(clause.args, vec![SqlValue::Bool(true)]);
    }

    #[test]
    fn test_conditions_joined_in_order() {
        let conditions = vec![
            meeting_ids(&[1, 2]),
            Condition::IsTrue {
                field: TestField::Visible,
            },
        ];
        let clause = compile_filter(&conditions).unwrap();
        assert_eq!(clause.sql, " WHERE meeting_id IN (?,?) AND visible = ?");
        assert_eq!(
            clause.args,
            vec![SqlValue::Integer(1), SqlValue::Integer(2), SqlValue::Bool(true)]
        );
    }

    #[test]
    fn test_values_never_spliced_into_sql() {
        let clause = compile_filter(&[Condition::In {
            field: TestField::Name,
            values: vec![SqlValue::from("x' OR '1'='1")],
        }])
        .unwrap();
        assert_eq!(clause.sql, " WHERE name IN (?)");
        assert!(!clause.sql.contains("OR"));
    }

    #[test]
    fn test_idempotent() {
        let conditions = vec![
            meeting_ids(&[4, 2]),
            Condition::IsTrue {
                field: TestField::Visible,
            },
        ];
        let first = compile_filter(&conditions).unwrap();
        let second = compile_filter(&conditions).unwrap();
        assert_eq!(first, second);
    }
}

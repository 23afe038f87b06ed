//! Closed field sets used to validate client-supplied sort keys.

use std::fmt::Debug;

/// A sortable field of a catalog entity.
///
/// Implemented by a fieldless enum per entity. `ALL` is the complete, closed
/// set of fields a client may sort on; `column` is the identifier written into
/// SQL. Column names are lower-case snake case.
pub trait Field: Copy + Eq + Debug + 'static {
    /// Every sortable field, in declaration order.
    const ALL: &'static [Self];

    /// Field used for the default `DESC` ordering when no order-by is given.
    const START_TIME: Self;

    /// Canonical column name.
    fn column(self) -> &'static str;

    /// Resolve a client token to a field. See [`validate`].
    fn from_token(token: &str) -> Option<Self> {
        validate(token)
    }
}

/// Resolve a client-supplied token against the field set of `F`.
///
/// Underscores are ignored on both sides, so `meeting_id` and `meetingid`
/// both resolve to `meeting_id`. The token is not case-folded: `MeetingId`
/// and `Name` are rejected.
pub fn validate<F: Field>(token: &str) -> Option<F> {
    let wanted = strip_underscores(token);
    if wanted.is_empty() {
        return None;
    }

    F::ALL
        .iter()
        .copied()
        .find(|field| strip_underscores(field.column()) == wanted)
}

fn strip_underscores(s: &str) -> String {
    s.chars().filter(|c| *c != '_').collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::TestField;
    use super::*;

    #[test]
    fn test_validate_exact_column() {
        assert_eq!(validate::<TestField>("id"), Some(TestField::Id));
        assert_eq!(validate::<TestField>("meeting_id"), Some(TestField::MeetingId));
        assert_eq!(
            validate::<TestField>("advertised_start_time"),
            Some(TestField::AdvertisedStartTime)
        );
    }

    #[test]
    fn test_validate_ignores_underscores() {
        assert_eq!(validate::<TestField>("meetingid"), Some(TestField::MeetingId));
        assert_eq!(
            validate::<TestField>("advertisedstarttime"),
            Some(TestField::AdvertisedStartTime)
        );
    }

    #[test]
    fn test_validate_rejects_capitals() {
        assert_eq!(validate::<TestField>("Name"), None);
        assert_eq!(validate::<TestField>("MeetingId"), None);
        assert_eq!(validate::<TestField>("ID"), None);
    }

    #[test]
    fn test_validate_rejects_unknown() {
        assert_eq!(validate::<TestField>("some-order-junk"), None);
        assert_eq!(validate::<TestField>("status"), None);
        assert_eq!(validate::<TestField>(""), None);
        assert_eq!(validate::<TestField>("__"), None);
        assert_eq!(validate::<TestField>("id;drop table races"), None);
    }

    #[test]
    fn test_from_token_matches_validate() {
        assert_eq!(TestField::from_token("name"), Some(TestField::Name));
        assert_eq!(TestField::from_token("nope"), None);
    }
}

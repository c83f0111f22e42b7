use serde::Serialize;
use std::fmt;

/// The field a constraint applies to.
///
/// A selector is either a plain field (`age`) or a field qualified by a
/// single association segment (`groups.name`). Deeper paths are rejected
/// by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Selector {
    /// Association segment before the `.`, if any
    pub association: Option<String>,
    /// Field name, never empty
    pub field: String,
}

impl Selector {
    /// A selector without an association.
    pub fn field(field: impl Into<String>) -> Self {
        Selector {
            association: None,
            field: field.into(),
        }
    }

    /// A selector of the form `association.field`.
    pub fn qualified(association: impl Into<String>, field: impl Into<String>) -> Self {
        Selector {
            association: Some(association.into()),
            field: field.into(),
        }
    }

    /// Splits a raw selector word on its dot.
    ///
    /// Returns `None` for empty input, empty segments or more than one dot.
    pub fn from_path(path: &str) -> Option<Self> {
        let mut parts = path.split('.');
        let first = parts.next().filter(|s| !s.is_empty())?;

        match (parts.next(), parts.next()) {
            (None, _) => Some(Selector::field(first)),
            (Some(field), None) if !field.is_empty() => Some(Selector::qualified(first, field)),
            _ => None,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.association {
            Some(assoc) => write!(f, "{}.{}", assoc, self.field),
            None => f.write_str(&self.field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Selector::from_path("age"), Some(Selector::field("age")));
        assert_eq!(
            Selector::from_path("groups.name"),
            Some(Selector::qualified("groups", "name"))
        );
        assert_eq!(Selector::from_path(""), None);
        assert_eq!(Selector::from_path("a.b.c"), None);
        assert_eq!(Selector::from_path(".a"), None);
        assert_eq!(Selector::from_path("a."), None);
    }

    #[test]
    fn test_display_round_trips_path() {
        assert_eq!(Selector::qualified("groups", "name").to_string(), "groups.name");
        assert_eq!(Selector::field("age").to_string(), "age");
    }
}

//! query decoding and attribute predicates

use std::fmt;

use crate::config::QUERY_HEADER;
use crate::data_handling::dataset::PointView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    /// plain nearest neighbor search
    VectorOnly,
    /// the categorical attribute must equal the query value
    Equality,
    /// the scalar attribute must lie in the closed query range
    Range,
    EqualityAndRange,
    /// any other code; matches nothing
    Unknown(i64),
}

impl PredicateKind {
    /// decodes the kind field, truncating toward zero
    pub fn from_field(field: f32) -> PredicateKind {
        match field as i64 {
            0 => PredicateKind::VectorOnly,
            1 => PredicateKind::Equality,
            2 => PredicateKind::Range,
            3 => PredicateKind::EqualityAndRange,
            other => PredicateKind::Unknown(other),
        }
    }

    /// slot used when tallying kinds; unknown kinds share the last one
    pub fn slot(&self) -> usize {
        match self {
            PredicateKind::VectorOnly => 0,
            PredicateKind::Equality => 1,
            PredicateKind::Range => 2,
            PredicateKind::EqualityAndRange => 3,
            PredicateKind::Unknown(_) => 4,
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateKind::VectorOnly => write!(f, "vector only"),
            PredicateKind::Equality => write!(f, "equality"),
            PredicateKind::Range => write!(f, "range"),
            PredicateKind::EqualityAndRange => write!(f, "equality + range"),
            PredicateKind::Unknown(code) => write!(f, "unknown ({code})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Predicate {
    pub kind: PredicateKind,
    /// equality value, already truncated to an integer
    pub value: f32,
    pub lower: f32,
    pub upper: f32,
}

impl Predicate {
    pub fn matches(&self, point: &PointView) -> bool {
        match self.kind {
            PredicateKind::VectorOnly => true,
            PredicateKind::Equality => self.category_matches(point),
            PredicateKind::Range => self.range_matches(point),
            PredicateKind::EqualityAndRange => {
                self.category_matches(point) && self.range_matches(point)
            }
            PredicateKind::Unknown(_) => false,
        }
    }

    fn category_matches(&self, point: &PointView) -> bool {
        point.category() == self.value
    }

    fn range_matches(&self, point: &PointView) -> bool {
        point.attribute() >= self.lower && point.attribute() <= self.upper
    }
}

/// a decoded query row: kind, equality value, range bounds, then the features
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    pub predicate: Predicate,
    pub features: &'a [f32],
}

impl<'a> Query<'a> {
    pub fn parse(row: &'a [f32]) -> Query<'a> {
        assert!(
            row.len() >= QUERY_HEADER,
            "a query needs at least {} fields, got {}",
            QUERY_HEADER,
            row.len()
        );

        Query {
            predicate: Predicate {
                kind: PredicateKind::from_field(row[0]),
                value: row[1] as i32 as f32,
                lower: row[2],
                upper: row[3],
            },
            features: &row[QUERY_HEADER..],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(row: &[f32]) -> PointView<'_> {
        PointView::new(row)
    }

    #[test]
    fn test_kind_decoding() {
        assert_eq!(PredicateKind::from_field(0.0), PredicateKind::VectorOnly);
        assert_eq!(PredicateKind::from_field(1.0), PredicateKind::Equality);
        assert_eq!(PredicateKind::from_field(2.9), PredicateKind::Range);
        assert_eq!(PredicateKind::from_field(3.0), PredicateKind::EqualityAndRange);
        assert_eq!(PredicateKind::from_field(4.0), PredicateKind::Unknown(4));
        assert_eq!(PredicateKind::from_field(-1.0), PredicateKind::Unknown(-1));
    }

    #[test]
    fn test_parse() {
        let row = [1.0, 2.7, -0.5, 0.5, 9.0, 8.0];
        let query = Query::parse(&row);
        assert_eq!(query.predicate.kind, PredicateKind::Equality);
        assert_eq!(query.predicate.value, 2.0);
        assert_eq!(query.predicate.lower, -0.5);
        assert_eq!(query.predicate.upper, 0.5);
        assert_eq!(query.features, &[9.0, 8.0]);
    }

    #[test]
    fn test_matches() {
        let inside = [2.0, 0.5, 0.0];
        let edge = [2.0, 1.0, 0.0];
        let wrong_category = [3.0, 0.5, 0.0];
        let outside = [2.0, 1.5, 0.0];

        let predicate = |kind| Predicate {
            kind,
            value: 2.0,
            lower: 0.0,
            upper: 1.0,
        };

        let equality = predicate(PredicateKind::Equality);
        assert!(equality.matches(&point(&inside)));
        assert!(equality.matches(&point(&outside)));
        assert!(!equality.matches(&point(&wrong_category)));

        let range = predicate(PredicateKind::Range);
        assert!(range.matches(&point(&inside)));
        assert!(range.matches(&point(&edge)));
        assert!(range.matches(&point(&wrong_category)));
        assert!(!range.matches(&point(&outside)));

        let both = predicate(PredicateKind::EqualityAndRange);
        assert!(both.matches(&point(&edge)));
        assert!(!both.matches(&point(&wrong_category)));
        assert!(!both.matches(&point(&outside)));

        assert!(predicate(PredicateKind::VectorOnly).matches(&point(&outside)));
        assert!(!predicate(PredicateKind::Unknown(7)).matches(&point(&inside)));
    }
}

//! filtered query evaluation

pub mod baseline;
pub mod predicate;

pub use self::baseline::{Baseline, BaselineStats, QueryAnswer};
pub use self::predicate::{Predicate, PredicateKind, Query};

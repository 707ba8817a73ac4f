pub mod evaluator;
pub mod predicate;

pub use evaluator::evaluate;
pub use predicate::{MatchKind, Predicate, PredicateError};

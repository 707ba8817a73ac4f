use thiserror::Error;

/// How the value of the match field is tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind<'a> {
    /// Case-sensitive substring match against any of the operands.
    ContainsAnyOf(&'a [&'a str]),
    /// Stringified value equals "true" or "false".
    EqualsBool(bool),
    /// The field is present, whatever its value.
    KeyExists,
}

/// Declarative predicate: which field to test and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predicate<'a> {
    pub match_key: &'a str,
    pub kind: MatchKind<'a>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredicateError {
    #[error("match key is empty")]
    EmptyMatchKey,
    #[error("contains query on '{0}' has no operands")]
    NoOperands(String),
    #[error("contains query on '{0}' has an empty operand")]
    EmptyOperand(String),
}

impl<'a> Predicate<'a> {
    pub fn contains_any_of(match_key: &'a str, operands: &'a [&'a str]) -> Self {
        Self { match_key, kind: MatchKind::ContainsAnyOf(operands) }
    }

    pub fn equals_bool(match_key: &'a str, expected: bool) -> Self {
        Self { match_key, kind: MatchKind::EqualsBool(expected) }
    }

    pub fn key_exists(match_key: &'a str) -> Self {
        Self { match_key, kind: MatchKind::KeyExists }
    }

    pub fn validate(&self) -> Result<(), PredicateError> {
        if self.match_key.is_empty() {
            return Err(PredicateError::EmptyMatchKey);
        }
        if let MatchKind::ContainsAnyOf(operands) = self.kind {
            if operands.is_empty() {
                return Err(PredicateError::NoOperands(self.match_key.to_string()));
            }
            // an empty needle would match every record
            if operands.iter().any(|op| op.is_empty()) {
                return Err(PredicateError::EmptyOperand(self.match_key.to_string()));
            }
        }
        Ok(())
    }
}

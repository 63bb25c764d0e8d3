//! Input validation shared by every clause-building method.
//!
//! Checks run before a fragment is constructed, so a failed call never leaves
//! partial state behind.

use crate::error::{SqlError, SqlResult};
use std::fmt;
use std::str::FromStr;

/// A whitelisted comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `==`
    DoubleEq,
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `<>`
    LtGt,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
    /// `!<`
    NotLt,
    /// `!>`
    NotGt,
    /// `LIKE`
    Like,
}

impl Operator {
    /// Every accepted operator, in whitelist order.
    pub const ALL: [Operator; 11] = [
        Operator::DoubleEq,
        Operator::Eq,
        Operator::Ne,
        Operator::LtGt,
        Operator::Gt,
        Operator::Lt,
        Operator::Gte,
        Operator::Lte,
        Operator::NotLt,
        Operator::NotGt,
        Operator::Like,
    ];

    /// Parse an operator token (case-insensitive, surrounding whitespace ignored).
    pub fn parse(token: &str) -> SqlResult<Self> {
        let trimmed = token.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SqlError::invalid_operator(token))
    }

    /// SQL text of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::DoubleEq => "==",
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::LtGt => "<>",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::NotLt => "!<",
            Operator::NotGt => "!>",
            Operator::Like => "LIKE",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = SqlError;

    fn from_str(s: &str) -> SqlResult<Self> {
        Self::parse(s)
    }
}

/// Validate a comparison operator token.
pub fn operator(token: &str) -> SqlResult<Operator> {
    Operator::parse(token)
}

/// Require a range argument of exactly two values and split it into its bounds.
pub fn pair<T>(values: Vec<T>) -> SqlResult<(T, T)> {
    let got = values.len();
    let mut iter = values.into_iter();
    match (iter.next(), iter.next(), iter.next()) {
        (Some(low), Some(high), None) => Ok((low, high)),
        _ => Err(SqlError::InvalidArity { expected: 2, got }),
    }
}

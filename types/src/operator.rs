//! Combination operator over required stamps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// How required stamps (and an optional score check) are combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Every requirement must hold.
    #[serde(rename = "AND")]
    And,
    /// At least one requirement must hold.
    #[serde(rename = "OR")]
    Or,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Combine a sequence of boolean outcomes.
    ///
    /// An empty sequence is never satisfied.
    pub fn combine<I>(&self, outcomes: I) -> bool
    where
        I: IntoIterator<Item = bool>,
    {
        let mut iter = outcomes.into_iter().peekable();
        if iter.peek().is_none() {
            return false;
        }
        match self {
            Self::And => iter.all(|ok| ok),
            Self::Or => iter.any(|ok| ok),
        }
    }
}

impl FromStr for Operator {
    type Err = TypeError;

    /// Matching is exact: `"and"` or `" AND"` are unsupported.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            other => Err(TypeError::UnsupportedOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("AND".parse::<Operator>(), Ok(Operator::And));
        assert_eq!("OR".parse::<Operator>(), Ok(Operator::Or));
        assert_eq!(
            "XOR".parse::<Operator>(),
            Err(TypeError::UnsupportedOperator("XOR".into()))
        );
        assert!("and".parse::<Operator>().is_err());
        assert!("".parse::<Operator>().is_err());
    }

    #[test]
    fn test_combine_and() {
        assert!(Operator::And.combine([true, true]));
        assert!(!Operator::And.combine([true, false]));
    }

    #[test]
    fn test_combine_or() {
        assert!(Operator::Or.combine([false, true]));
        assert!(!Operator::Or.combine([false, false]));
    }

    #[test]
    fn test_combine_empty_is_false() {
        assert!(!Operator::And.combine(std::iter::empty()));
        assert!(!Operator::Or.combine(std::iter::empty()));
    }
}

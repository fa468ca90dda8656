//! Strongly-typed codes for registry entities
//!
//! Records are keyed by a numeric code assigned by the store. Wrapping the
//! integer in a newtype keeps codes from being mixed with other numbers such
//! as salesperson codes or price-list numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a code string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {kind} code")]
pub struct CodeParseError {
    pub kind: &'static str,
    pub value: String,
}

/// Store-assigned code of a third party
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThirdPartyCode(i64);

impl ThirdPartyCode {
    const PREFIX: &'static str = "TER";

    /// Wraps a raw store-assigned value
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Returns the code prefix accepted when parsing
    pub fn prefix() -> &'static str {
        Self::PREFIX
    }
}

impl fmt::Display for ThirdPartyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accepts `42` or `TER-42`; the value must be positive
impl FromStr for ThirdPartyCode {
    type Err = CodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix(Self::PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .unwrap_or(trimmed);
        digits
            .parse::<i64>()
            .ok()
            .filter(|value| *value > 0)
            .map(Self)
            .ok_or_else(|| CodeParseError {
                kind: "ThirdPartyCode",
                value: s.to_string(),
            })
    }
}

impl From<i64> for ThirdPartyCode {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ThirdPartyCode> for i64 {
    fn from(code: ThirdPartyCode) -> i64 {
        code.0
    }
}

//! Location codes used to key the travel table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when a string is not a valid location code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// The code does not have exactly four characters.
    #[error("location code `{0}` must be exactly 4 characters long")]
    InvalidLength(String),
    /// The code is not four digits starting with 1-9.
    #[error("location code `{0}` must be 4 digits starting with 1-9")]
    InvalidFormat(String),
}

/// A four-digit postal-style location code (`1000`..=`9999`).
///
/// Codes are compared by value and are the only key the travel table knows.
///
/// # Examples
///
/// ```
/// use u_shipping::models::LocationCode;
///
/// let depot = LocationCode::parse("3000").unwrap();
/// assert_eq!(depot.as_str(), "3000");
/// assert!(LocationCode::parse("0300").is_err());
/// assert!(!LocationCode::is_valid("30a0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationCode(String);

impl LocationCode {
    /// Parses and validates a location code.
    pub fn parse(code: &str) -> Result<Self, LocationError> {
        if code.chars().count() != 4 {
            return Err(LocationError::InvalidLength(code.to_owned()));
        }
        let mut chars = code.chars();
        let leading_ok = chars.next().is_some_and(|c| matches!(c, '1'..='9'));
        if !leading_ok || !chars.all(|c| c.is_ascii_digit()) {
            return Err(LocationError::InvalidFormat(code.to_owned()));
        }
        Ok(Self(code.to_owned()))
    }

    /// Returns `true` if `code` would parse successfully.
    pub fn is_valid(code: &str) -> bool {
        Self::parse(code).is_ok()
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocationCode {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for LocationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LocationCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_valid() {
        for code in ["1000", "3000", "9999", "1234"] {
            let loc = LocationCode::parse(code).expect("valid");
            assert_eq!(loc.as_str(), code);
            assert_eq!(loc.to_string(), code);
        }
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(
            LocationCode::parse("100"),
            Err(LocationError::InvalidLength("100".into()))
        );
        assert!(LocationCode::parse("").is_err());
        assert!(LocationCode::parse("10000").is_err());
    }

    #[test]
    fn test_parse_wrong_format() {
        assert_eq!(
            LocationCode::parse("0999"),
            Err(LocationError::InvalidFormat("0999".into()))
        );
        assert!(LocationCode::parse("12a4").is_err());
        assert!(LocationCode::parse("-123").is_err());
        assert!(LocationCode::parse("１２３４").is_err());
    }

    #[test]
    fn test_value_equality_and_hash() {
        let a = LocationCode::parse("2000").expect("valid");
        let b: LocationCode = "2000".parse().expect("valid");
        assert_eq!(a, b);
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_serde_validates() {
        let loc: LocationCode = serde_json::from_str("\"4000\"").expect("valid");
        assert_eq!(loc.as_str(), "4000");
        assert_eq!(serde_json::to_string(&loc).expect("serializes"), "\"4000\"");
        assert!(serde_json::from_str::<LocationCode>("\"0400\"").is_err());
    }
}

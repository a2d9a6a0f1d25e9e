//! Query identifier guard
//!
//! The build transform replaces every `graphql(...)` template with the
//! numeric identifier of the extracted query document. At runtime a handle is
//! therefore only admissible if it reads as a number; anything else is query
//! text that never went through the transform.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{QueryError, Result};

/// A validated query identifier
///
/// Holds the handle exactly as received: the textual form is the key into a
/// [`DataSnapshot`](crate::snapshot::DataSnapshot).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QueryId(String);

impl QueryId {
    /// Snapshot key for this identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the identifier
    pub fn numeric(&self) -> f64 {
        to_number(&self.0)
    }
}

impl From<u64> for QueryId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<u32> for QueryId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl FromStr for QueryId {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        validate(s)
    }
}

impl TryFrom<String> for QueryId {
    type Error = QueryError;

    fn try_from(s: String) -> Result<Self> {
        if to_number(&s).is_nan() {
            return Err(QueryError::QueryNotCompiled { query: s });
        }
        Ok(Self(s))
    }
}

impl From<QueryId> for String {
    fn from(id: QueryId) -> Self {
        id.0
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate a query handle
///
/// Accepts any handle whose numeric conversion is not NaN.
///
/// # Errors
///
/// Returns `QueryNotCompiled` when the handle is not numeric, which in
/// practice means raw query text was passed instead of `graphql(...)`.
///
/// # Example
///
/// ```
/// use pagequery_core::query_id::validate;
///
/// assert_eq!(validate("3303882").unwrap().as_str(), "3303882");
/// assert!(validate("{ site { title } }").is_err());
/// ```
pub fn validate(handle: &str) -> Result<QueryId> {
    QueryId::try_from(handle.to_string())
}

/// Numeric conversion with the same acceptance rules as ECMAScript `Number()`
///
/// Surrounding whitespace is ignored, the empty string is `0`, `0x`/`0o`/`0b`
/// prefixes select a radix (unsigned only) and `Infinity` may carry a sign.
/// Everything else that is not a decimal literal is NaN.
pub fn to_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }

    let (sign, unsigned) = match trimmed.as_bytes()[0] {
        b'+' => (1.0, &trimmed[1..]),
        b'-' => (-1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    // f64::from_str also accepts "inf"/"nan" spellings and a second sign.
    let is_decimal_literal = !unsigned.is_empty()
        && unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && unsigned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !is_decimal_literal {
        return f64::NAN;
    }

    unsigned
        .parse::<f64>()
        .map(|value| sign * value)
        .unwrap_or(f64::NAN)
}

/// WhiteSpace and LineTerminator code points as `Number()` trims them
///
/// Narrower than `char::is_whitespace`, which also admits U+0085.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits
        .chars()
        .try_fold(0f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN);
    Some(value)
}

use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Custom error type for parsing credits
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum ParseCreditsError {
    EmptyInput,
    NoValidNumber,
    Negative,
}

impl Display for ParseCreditsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::EmptyInput => write!(f, "Empty input string"),
            Self::NoValidNumber => write!(f, "No valid credit value found in input"),
            Self::Negative => write!(f, "Credit values cannot be negative"),
        }
    }
}

/// The number of credits a course is worth
///
/// Half-credit courses are common, so the value is fractional
/// (the stored column is NUMERIC(3,1)).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credits(f32);

impl Credits {
    /// Fallback used when scraped text carries no usable credit value
    pub const DEFAULT: Self = Credits(0.5);

    /// Creates a credit value, rejecting negatives
    pub fn new(value: f32) -> Result<Self, ParseCreditsError> {
        if value.is_sign_negative() || !value.is_finite() {
            Err(ParseCreditsError::Negative)
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Human label with the correct singular/plural unit:
    /// "0.5 credit", "1 credit", "1.5 credits", "2 credits"
    pub fn label(self) -> String {
        let unit = if self.0 <= 1.0 { "credit" } else { "credits" };

        format!("{self} {unit}")
    }
}

impl PartialOrd for Credits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Display for Credits {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        // Format as a whole number if it's an integer
        if self.0.fract() == 0.0 {
            write!(f, "{}", self.0 as i32)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for Credits {
    type Err = ParseCreditsError;

    /// Extracts the first number from scraped credit text, e.g.
    /// "0.5 credit" or "1.0 units lecture"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(ParseCreditsError::EmptyInput);
        }

        let start = input
            .find(|c: char| c.is_ascii_digit())
            .ok_or(ParseCreditsError::NoValidNumber)?;
        let number: String = input[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        number
            .parse::<f32>()
            .map_err(|_| ParseCreditsError::NoValidNumber)
            .and_then(Self::new)
    }
}

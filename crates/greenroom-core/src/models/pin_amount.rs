use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// String-encoded decimal amount paid to pin a message.
///
/// The raw string is kept verbatim for display; comparison and equality are
/// both numeric, never lexical ("25.50" outranks "3.00", "2.50" equals
/// "2.5"). Anything that does not parse as a non-negative decimal compares
/// as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinAmount(String);

impl PinAmount {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn zero() -> Self {
        Self("0".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.key() == (0, 0)
    }

    /// Numeric comparison key: (whole units, nanos). Fractions beyond nine
    /// digits are truncated.
    fn key(&self) -> (u128, u32) {
        let raw = self.0.trim();
        let (units_str, frac_str) = match raw.split_once('.') {
            Some((u, f)) => (u, f),
            None => (raw, ""),
        };
        if units_str.chars().any(|c| !c.is_ascii_digit())
            || frac_str.chars().any(|c| !c.is_ascii_digit())
            || (units_str.is_empty() && frac_str.is_empty())
        {
            return (0, 0);
        }
        let units: u128 = units_str.parse().unwrap_or(0);
        let mut nanos: u32 = 0;
        for (i, c) in frac_str.chars().take(9).enumerate() {
            nanos += (c as u32 - '0' as u32) * 10u32.pow(8 - i as u32);
        }
        (units, nanos)
    }
}

impl Default for PinAmount {
    fn default() -> Self {
        Self::zero()
    }
}

// Equality goes through the same numeric key as the ordering, so the two
// can never disagree on distinct renderings of one value.
impl PartialEq for PinAmount {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PinAmount {}

impl Ord for PinAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for PinAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_not_lexical() {
        // Lexically "25.50" < "3.00"; numerically it is greater
        assert!(PinAmount::new("25.50") > PinAmount::new("3.00"));
        assert!(PinAmount::new("1.00") < PinAmount::new("3.00"));
    }

    #[test]
    fn test_fractional_ordering() {
        assert!(PinAmount::new("0.50") > PinAmount::new("0.05"));
        assert!(PinAmount::new("2.10") > PinAmount::new("2.09"));
        assert_eq!(
            PinAmount::new("2.50").cmp(&PinAmount::new("2.5")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_invalid_compares_as_zero() {
        assert!(PinAmount::new("garbage").is_zero());
        assert!(PinAmount::new("-1.00").is_zero());
        assert!(PinAmount::new("").is_zero());
        assert_eq!(
            PinAmount::new("nope").cmp(&PinAmount::new("0")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_equality_agrees_with_ordering() {
        // distinct renderings of the same value are equal, not just Equal
        assert_eq!(PinAmount::new("2.50"), PinAmount::new("2.5"));
        assert_eq!(PinAmount::new("07"), PinAmount::new("7.0"));
        assert_ne!(PinAmount::new("2.50"), PinAmount::new("2.51"));
        // display keeps the raw string even when values compare equal
        assert_eq!(PinAmount::new("2.50").as_str(), "2.50");
    }

    #[test]
    fn test_whole_units_dominate() {
        assert!(PinAmount::new("100") > PinAmount::new("99.999999"));
    }
}

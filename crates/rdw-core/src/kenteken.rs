//! Kenteken (Dutch license plate) normalization

use std::fmt;

/// A license plate in the canonical form RDW datasets are keyed by.
///
/// Always upper-cased, without hyphens or whitespace. The only way to obtain
/// one is [`Kenteken::normalize`], so every value that reaches a network
/// call satisfies the invariant. No plate-format validation is done; a
/// malformed plate simply yields zero rows remotely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Kenteken {
    inner: String,
}

impl Kenteken {
    /// Normalize raw user input (`"41-tdk-8"`, `"41 TDK 8"`) to `"41TDK8"`.
    pub fn normalize(raw: &str) -> Self {
        let inner = raw
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();
        Self { inner }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// True when nothing remained after normalization.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Display for Kenteken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl AsRef<str> for Kenteken {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("41TDK8", "41TDK8")]
    #[case("41-tdk-8", "41TDK8")]
    #[case("41 TDK 8", "41TDK8")]
    #[case(" 23-bgv-9 ", "23BGV9")]
    #[case("bb\t943z", "BB943Z")]
    #[case("", "")]
    #[case("---", "")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(Kenteken::normalize(input).as_str(), expected);
    }

    #[test]
    fn test_display_matches_as_str() {
        let kenteken = Kenteken::normalize("al-06-45");
        assert_eq!(kenteken.to_string(), "AL0645");
        assert_eq!(kenteken.as_ref(), "AL0645");
    }

    #[test]
    fn test_malformed_input_passes_through() {
        // Not a plate, but still upper-cased and stripped rather than rejected
        assert_eq!(Kenteken::normalize("not a plate!").as_str(), "NOTAPLATE!");
    }

    #[test]
    fn test_is_empty() {
        assert!(Kenteken::normalize(" - ").is_empty());
        assert!(!Kenteken::normalize("x").is_empty());
    }
}

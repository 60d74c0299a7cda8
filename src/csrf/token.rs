use std::fmt;

use crate::crypto::random::get_random_string;

/// An opaque CSRF token: a bearer secret of a fixed number of characters.
///
/// `Debug` is redacted so a token never ends up in logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Accepts `value` as a token only if it is exactly `length` characters
    /// long. Anything else is treated as if no token had been sent.
    ///
    /// # Example
    /// ```rust
    /// use csrf_gate::csrf::token::CsrfToken;
    ///
    /// assert!(CsrfToken::parse(&"A".repeat(32), 32).is_some());
    /// assert!(CsrfToken::parse("short", 32).is_none());
    /// ```
    pub fn parse(value: &str, length: usize) -> Option<Self> {
        (value.chars().count() == length).then(|| Self(value.to_owned()))
    }

    pub(crate) fn from_generated(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(..)")
    }
}

/// Source of fresh tokens.
///
/// Shared by every in-flight request, hence `Send + Sync`. Implementations
/// must return exactly `length` characters from a cryptographically secure
/// source.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self, length: usize) -> String;
}

/// Default [`TokenGenerator`] backed by [`get_random_string`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self, length: usize) -> String {
        get_random_string(length)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Generator that always hands out the same token.
    pub(crate) struct FixedTokenGenerator(pub(crate) &'static str);

    impl TokenGenerator for FixedTokenGenerator {
        fn generate(&self, length: usize) -> String {
            assert_eq!(self.0.len(), length, "fixture token has wrong length");
            self.0.to_owned()
        }
    }

    #[test]
    fn parse_accepts_exact_length_only() {
        let ok = "x".repeat(32);
        assert_eq!(CsrfToken::parse(&ok, 32).unwrap().as_str(), ok);

        assert!(CsrfToken::parse(&"x".repeat(31), 32).is_none());
        assert!(CsrfToken::parse(&"x".repeat(33), 32).is_none());
        assert!(CsrfToken::parse("", 32).is_none());
    }

    #[test]
    fn parse_counts_characters_not_bytes() {
        let value = "é".repeat(32);
        assert_eq!(value.len(), 64);
        assert!(CsrfToken::parse(&value, 32).is_some());
    }

    #[test]
    fn debug_output_is_redacted() {
        let token = CsrfToken::parse(&"s".repeat(32), 32).unwrap();
        let dbg = format!("{token:?}");
        assert_eq!(dbg, "CsrfToken(..)");
        assert!(!dbg.contains("sss"));
    }

    #[test]
    fn random_generator_produces_requested_length() {
        let token = RandomTokenGenerator.generate(32);
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}

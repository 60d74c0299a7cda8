use subtle::ConstantTimeEq;

/// Compares a submitted token against the expected one without leaking,
/// through timing, where the first differing byte is.
///
/// The loop always walks the whole of `expected`; a submitted value of a
/// different length is padded with zeros and rejected by the final length
/// check, which is folded into the same `Choice`.
///
/// # Example
/// ```rust
/// use csrf_gate::crypto::compare::constant_time_compare;
///
/// assert!(constant_time_compare("abc", "abc"));
/// assert!(!constant_time_compare("abd", "abc"));
/// assert!(!constant_time_compare("ab", "abc"));
/// ```
pub fn constant_time_compare(submitted: &str, expected: &str) -> bool {
    let submitted = submitted.as_bytes();
    let expected = expected.as_bytes();

    let mut equal = (submitted.len() as u64).ct_eq(&(expected.len() as u64));
    for (i, e) in expected.iter().enumerate() {
        let s = submitted.get(i).copied().unwrap_or(0);
        equal &= s.ct_eq(e);
    }

    bool::from(equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

    #[test]
    fn equal_strings_match() {
        assert!(constant_time_compare(TOKEN, TOKEN));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn single_character_difference_at_any_position_is_rejected() {
        for pos in 0..TOKEN.len() {
            let mut bytes = TOKEN.as_bytes().to_vec();
            bytes[pos] = b'B';
            let altered = String::from_utf8(bytes).unwrap();
            assert!(!constant_time_compare(&altered, TOKEN), "pos {pos}");
        }
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert!(!constant_time_compare(&TOKEN[..31], TOKEN));
        assert!(!constant_time_compare(&format!("{TOKEN}A"), TOKEN));
        assert!(!constant_time_compare("", TOKEN));
    }

    #[test]
    fn zero_padding_does_not_fake_a_match() {
        let expected = "ab\0";
        assert!(!constant_time_compare("ab", expected));
    }
}

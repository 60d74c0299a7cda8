use rand::{Rng, distr::Alphanumeric};

/// Returns a random string of `length` characters drawn from `[A-Za-z0-9]`.
///
/// Uses the thread-local CSPRNG, so concurrent callers never share state.
///
/// # Example
/// ```rust
/// use csrf_gate::crypto::random::get_random_string;
///
/// let s = get_random_string(32);
/// assert_eq!(s.len(), 32);
/// assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn get_random_string(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_requested_length() {
        for n in [0, 1, 32, 100] {
            assert_eq!(get_random_string(n).len(), n);
        }
    }

    #[test]
    fn only_alphanumeric_characters() {
        let s = get_random_string(256);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()), "{s}");
    }

    #[test]
    fn successive_calls_differ() {
        assert_ne!(get_random_string(32), get_random_string(32));
    }

    #[test]
    fn usable_from_many_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| get_random_string(32)))
            .collect();
        let mut tokens: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), 8);
    }
}

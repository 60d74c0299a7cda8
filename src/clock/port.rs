use time::OffsetDateTime;

/// A port that provides the **current instant** for the application.
///
/// # Purpose
/// Cookie expiry is computed as "now + timeout". Abstracting "now" lets
/// tests pin it and assert the exact `Expires` attribute.
///
/// # Typical Implementations
/// - `SystemClock`: Uses the OS clock
/// - `FixedClock`: Returns a constant instant (for testing)
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> OffsetDateTime;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use time::macros::datetime;

    /// Test implementation of `Clock` that always returns a fixed instant.
    pub(crate) struct FixedClock {
        at: OffsetDateTime,
    }

    impl FixedClock {
        pub(crate) fn new(at: OffsetDateTime) -> Self {
            Self { at }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> OffsetDateTime {
            self.at
        }
    }

    #[test]
    fn fixed_clock_returns_given_instant() {
        let at = datetime!(2025-10-02 12:00 UTC);
        let clock = FixedClock::new(at);

        assert_eq!(clock.now(), at);
    }

    #[test]
    fn clock_trait_object_works() {
        let at = datetime!(2024-01-15 00:00 UTC);
        let clock: Box<dyn Clock> = Box::new(FixedClock::new(at));

        assert_eq!(clock.now(), at);
    }
}

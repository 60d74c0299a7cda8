//! Time source used for cookie expiry.

mod port;
pub mod system_clock;

pub use port::Clock;
pub use system_clock::SystemClock;

#[cfg(test)]
pub(crate) use port::tests::FixedClock;

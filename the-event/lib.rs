//! Timing primitives shared by the formatter's input surfaces.
//!
//! Everything here runs on the caller's thread. Time is read through the
//! [`Clock`] trait so that rate limiting can be driven by a [`ManualClock`]
//! in tests instead of real wall-clock delays.

mod clock;
mod debounce;

pub use clock::{
  Clock,
  ManualClock,
  SystemClock,
};
pub use debounce::{
  LimiterState,
  RateLimiter,
};

//! Leading-edge rate limiting for user-facing feedback.
//!
//! The limiter has a single global slot. The first call in a burst is let
//! through immediately and opens a window of fixed length; every call that
//! lands inside that window is suppressed. The window is measured from the
//! call that opened it and is never extended by suppressed calls.

use std::time::{
  Duration,
  Instant,
};

use crate::{
  Clock,
  SystemClock,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimiterState {
  /// The next call fires.
  Ready,
  /// Calls before `until` are dropped.
  Suppressing { until: Instant },
}

#[derive(Debug, Clone)]
pub struct RateLimiter<C = SystemClock> {
  clock:  C,
  window: Duration,
  state:  LimiterState,
}

impl<C: Clock> RateLimiter<C> {
  pub fn new(clock: C, window: Duration) -> Self {
    Self {
      clock,
      window,
      state: LimiterState::Ready,
    }
  }

  /// Returns `true` when the caller should act, `false` when the call falls
  /// inside the current suppression window.
  pub fn check(&mut self) -> bool {
    let now = self.clock.now();
    if let LimiterState::Suppressing { until } = self.state
      && now < until
    {
      log::trace!("rate limiter suppressed call, {:?} left", until - now);
      return false;
    }

    self.state = LimiterState::Suppressing {
      until: now + self.window,
    };
    log::trace!("rate limiter fired, suppressing for {:?}", self.window);
    true
  }

  /// Current state, with an elapsed window reported as [`LimiterState::Ready`].
  pub fn state(&self) -> LimiterState {
    match self.state {
      LimiterState::Suppressing { until } if self.clock.now() < until => self.state,
      _ => LimiterState::Ready,
    }
  }
}

//! Host clock
//!
//! The [`Clock`] trait makes "now" injectable so date helpers such as
//! `tomorrow` can be tested deterministically. Use [`SystemClock`] in
//! production and [`FixedClock`] in tests.

use chrono::{Local, NaiveDateTime};

/// Source of the current local wall-clock time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the operating system's local time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a given instant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

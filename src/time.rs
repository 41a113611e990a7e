//! Time abstraction traits for measuring cycles against their budget.
//!
//! Units are opaque timer ticks. Pick whatever counter your platform offers
//! (a cycle counter, a free-running timer) and express the budget in it.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to ticks.
    fn as_ticks(&self) -> u32;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Free-running counters wrap; implementations should use wrapping arithmetic.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

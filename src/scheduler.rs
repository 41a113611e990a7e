//! Column scheduler: the per-cycle blank/latch/transfer state machine.
//!
//! Provides [`ColumnScheduler`], which runs one cycle each time the periodic
//! timer fires, and the [`ColumnSource`] trait supplying the column data.
//!
//! One cycle, in order:
//! 1. consume a pending revolution and restart at column 0
//! 2. assert blanking
//! 3. pulse the latch owed by the previous cycle, committing its data
//! 4. on the very first cycle only, emit one warm-up clock pulse
//! 5. release blanking
//! 6. shift the current column out and owe a latch to the next cycle
//! 7. advance the column index
//!
//! Data shifted in cycle N therefore becomes visible at the start of cycle
//! N + 1, while the LEDs are blanked. Each step is one [`CycleState`]
//! transition; the latch is only pulsed when leaving `Idle` or
//! `LatchPending`, the two states that owe one.
//!
//! # Deadlines
//! The whole cycle, rendering included, must finish before the timer fires
//! again. Exceeding the budget corrupts the output and has no recovery; the
//! scheduler only measures it, counts it and reports it in [`CycleReport`]
//! so overruns can be caught on the bench and in tests.

use crate::config::DisplayConfig;
use crate::hal::{ByteLink, DriverChain};
use crate::rotation::RotationSync;
use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// Supplies one column of data per cycle.
///
/// Called from the timer interrupt. Implementations must not block and must
/// send exactly one column's worth of bytes.
pub trait ColumnSource {
    /// Shifts the data of `column` out through `link`.
    fn render(&mut self, column: u16, link: &mut impl ByteLink);

    /// Number of columns this source holds, if it has a fixed width.
    ///
    /// [`crate::init`] checks it against the configured column count.
    fn column_count(&self) -> Option<u16> {
        None
    }
}

impl<S: ColumnSource + ?Sized> ColumnSource for &mut S {
    #[inline]
    fn render(&mut self, column: u16, link: &mut impl ByteLink) {
        (**self).render(column, link);
    }

    fn column_count(&self) -> Option<u16> {
        (**self).column_count()
    }
}

/// [`ColumnSource`] computing columns on the fly from a closure.
pub struct RenderFn<F>(pub F)
where
    F: FnMut(u16, &mut dyn ByteLink);

impl<F> ColumnSource for RenderFn<F>
where
    F: FnMut(u16, &mut dyn ByteLink),
{
    #[inline]
    fn render(&mut self, column: u16, link: &mut impl ByteLink) {
        let link: &mut dyn ByteLink = link;
        (self.0)(column, link);
    }
}

/// Phase of the cycle state machine.
///
/// Each [`ColumnScheduler::step`] moves to the next phase and performs the
/// hardware action that belongs to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleState {
    /// Initialized, no cycle has run yet. Owes the latch that commits the
    /// bring-up clear.
    Idle,
    /// Outputs blanked and the owed latch issued.
    BlankAsserted,
    /// One-time warm-up clock pulse of the very first cycle.
    WarmUpClock,
    /// Outputs show the latched column.
    BlankReleased,
    /// Column data shifted out.
    DataHandoff,
    /// Between cycles: data shifted, latch owed to the next cycle.
    LatchPending,
}

impl CycleState {
    /// Returns true if leaving this state must pulse the latch.
    #[inline]
    pub fn owes_latch(self) -> bool {
        matches!(self, CycleState::Idle | CycleState::LatchPending)
    }
}

/// Outcome of one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport<D> {
    /// Column rendered in this cycle.
    pub column: u16,
    /// The cycle restarted at column 0 because of a revolution.
    pub resynced: bool,
    /// Time the cycle took.
    pub elapsed: D,
    /// The cycle exceeded its budget. The display output is no longer trustworthy.
    pub deadline_missed: bool,
}

/// Drives the LED driver chain one column per timer cycle.
///
/// # Type Parameters
/// * `'r` - Lifetime of the rotation flag and time source references
/// * `I` - Time instant type
/// * `T` - Time source used to measure cycles
/// * `D` - Driver chain implementation
pub struct ColumnScheduler<'r, I: TimeInstant, T: TimeSource<I>, D: DriverChain> {
    chain: D,
    rotation: &'r RotationSync,
    time_source: &'r T,
    config: DisplayConfig,
    column: u16,
    state: CycleState,
    warmed_up: bool,
    cycle_start: I,
    resynced: bool,
    deadline_misses: u32,
}

impl<'r, I: TimeInstant, T: TimeSource<I>, D: DriverChain> ColumnScheduler<'r, I, T, D> {
    /// Creates an idle scheduler positioned at column 0.
    ///
    /// The chain is expected to be brought up already; see [`crate::init`].
    pub fn new(
        config: DisplayConfig,
        chain: D,
        rotation: &'r RotationSync,
        time_source: &'r T,
    ) -> Self {
        Self {
            chain,
            rotation,
            time_source,
            config,
            column: 0,
            state: CycleState::Idle,
            warmed_up: false,
            cycle_start: time_source.now(),
            resynced: false,
            deadline_misses: 0,
        }
    }

    /// Runs one full cycle. Call this from the periodic timer interrupt.
    pub fn service<S>(&mut self, source: &mut S) -> CycleReport<I::Duration>
    where
        S: ColumnSource + ?Sized,
    {
        loop {
            if let Some(report) = self.advance(source) {
                return report;
            }
        }
    }

    /// Moves one phase forward and returns the new state.
    ///
    /// [`service`](Self::service) is this in a loop until `LatchPending`.
    /// Stepping by hand is useful on the bench, to hold the chain in a phase.
    pub fn step<S>(&mut self, source: &mut S) -> CycleState
    where
        S: ColumnSource + ?Sized,
    {
        self.advance(source);
        self.state
    }

    fn advance<S>(&mut self, source: &mut S) -> Option<CycleReport<I::Duration>>
    where
        S: ColumnSource + ?Sized,
    {
        match self.state {
            CycleState::Idle | CycleState::LatchPending => {
                self.cycle_start = self.time_source.now();
                self.resynced = self.rotation.take();
                if self.resynced {
                    trace!("revolution, column {} -> 0", self.column);
                    self.column = 0;
                }

                let owes_latch = self.state.owes_latch();
                self.state = CycleState::BlankAsserted;
                self.chain.set_blank(true);
                if owes_latch {
                    self.chain.pulse_latch();
                }
                None
            }
            CycleState::BlankAsserted if !self.warmed_up => {
                self.state = CycleState::WarmUpClock;
                self.chain.pulse_clock();
                self.warmed_up = true;
                None
            }
            CycleState::BlankAsserted | CycleState::WarmUpClock => {
                self.state = CycleState::BlankReleased;
                self.chain.set_blank(false);
                None
            }
            CycleState::BlankReleased => {
                self.state = CycleState::DataHandoff;
                source.render(self.column, &mut self.chain);
                None
            }
            CycleState::DataHandoff => {
                self.state = CycleState::LatchPending;
                Some(self.finish_cycle())
            }
        }
    }

    fn finish_cycle(&mut self) -> CycleReport<I::Duration> {
        let column = self.column;
        self.column = (column + 1) % self.config.columns();

        let elapsed = self.time_source.now().duration_since(self.cycle_start);
        let deadline_missed = elapsed.as_ticks() > self.config.cycle_budget();
        if deadline_missed {
            self.deadline_misses = self.deadline_misses.saturating_add(1);
            warn!(
                "column {} took {} ticks, budget {}",
                column,
                elapsed.as_ticks(),
                self.config.cycle_budget()
            );
        }

        CycleReport {
            column,
            resynced: self.resynced,
            elapsed,
            deadline_missed,
        }
    }

    /// Column the current or next cycle renders, unless a revolution resets it.
    pub fn column(&self) -> u16 {
        self.column
    }

    /// Current phase. Outside of [`service`](Self::service) this is `Idle`
    /// before the first cycle and `LatchPending` afterwards.
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Returns true until the first cycle has started.
    pub fn is_first_cycle(&self) -> bool {
        self.state == CycleState::Idle
    }

    /// Number of cycles that exceeded the budget.
    pub fn deadline_misses(&self) -> u32 {
        self.deadline_misses
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Stops scheduling and gives the driver chain back.
    pub fn release(self) -> D {
        self.chain
    }
}

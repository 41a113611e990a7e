//! Shared test infrastructure for pov-display integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};

use pov_display::{
    ByteLink, Channel, ChannelLines, DriverChain, Edge, EdgeInput, PeriodicTimer, RasterBuffer,
    TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Hardware event log
// ============================================================================

/// Everything the mock hardware saw, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Reset,
    Blank(bool),
    Latch,
    Clock,
    Byte(u8),
    Select(Channel),
    SelectAll,
    ReleaseAll,
    Listen(Edge),
    Ack,
    TimerStart(u32),
}

pub type Log = RefCell<heapless::Vec<Event, 4096>>;

pub fn new_log() -> Log {
    RefCell::new(heapless::Vec::new())
}

fn record(log: &Log, event: Event) {
    log.borrow_mut().push(event).expect("event log full");
}

/// Bytes shifted out in each cycle, one entry per `Blank(true)`
pub fn bytes_per_cycle(log: &Log) -> Vec<Vec<u8>> {
    let mut cycles: Vec<Vec<u8>> = Vec::new();
    for event in log.borrow().iter() {
        match event {
            Event::Blank(true) => cycles.push(Vec::new()),
            Event::Byte(b) => {
                if let Some(cycle) = cycles.last_mut() {
                    cycle.push(*b);
                }
            }
            _ => {}
        }
    }
    cycles
}

// ============================================================================
// Mock hardware
// ============================================================================

/// Driver chain recording every line change and byte
pub struct MockChain<'a> {
    log: &'a Log,
}

impl<'a> MockChain<'a> {
    pub fn new(log: &'a Log) -> Self {
        Self { log }
    }
}

impl ByteLink for MockChain<'_> {
    fn send_byte(&mut self, byte: u8) {
        record(self.log, Event::Byte(byte));
    }
}

impl DriverChain for MockChain<'_> {
    fn set_blank(&mut self, blank: bool) {
        record(self.log, Event::Blank(blank));
    }

    fn pulse_latch(&mut self) {
        record(self.log, Event::Latch);
    }

    fn pulse_clock(&mut self) {
        record(self.log, Event::Clock);
    }

    fn reset_lines(&mut self) {
        record(self.log, Event::Reset);
    }
}

pub struct MockChannels<'a> {
    log: &'a Log,
}

impl<'a> MockChannels<'a> {
    pub fn new(log: &'a Log) -> Self {
        Self { log }
    }
}

impl ChannelLines for MockChannels<'_> {
    fn select(&mut self, channel: Channel) {
        record(self.log, Event::Select(channel));
    }

    fn select_all(&mut self) {
        record(self.log, Event::SelectAll);
    }

    fn release_all(&mut self) {
        record(self.log, Event::ReleaseAll);
    }
}

/// Rotation sensor whose hardware flag can be latched by the test
pub struct MockSensor<'a> {
    log: &'a Log,
    latched: Cell<bool>,
}

impl<'a> MockSensor<'a> {
    pub fn new(log: &'a Log) -> Self {
        Self {
            log,
            latched: Cell::new(false),
        }
    }

    /// Simulate the magnet passing the sensor
    pub fn latch(&self) {
        self.latched.set(true);
    }
}

impl EdgeInput for MockSensor<'_> {
    fn listen(&mut self, edge: Edge) {
        record(self.log, Event::Listen(edge));
    }

    fn is_triggered(&self) -> bool {
        self.latched.get()
    }

    fn acknowledge(&mut self) {
        self.latched.set(false);
        record(self.log, Event::Ack);
    }
}

pub struct MockTimer<'a> {
    log: &'a Log,
}

impl<'a> MockTimer<'a> {
    pub fn new(log: &'a Log) -> Self {
        Self { log }
    }
}

impl PeriodicTimer for MockTimer<'_> {
    fn start(&mut self, period: u32) {
        record(self.log, Event::TimerStart(period));
    }
}

// ============================================================================
// Mock Time Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u32);

impl TimeDuration for TestDuration {
    fn as_ticks(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u32);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.wrapping_sub(earlier.0))
    }
}

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of ticks
    pub fn advance(&self, ticks: u32) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0.wrapping_add(ticks)));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// All set pixels, column by column
pub fn set_pixels<const W: usize, const B: usize>(buffer: &RasterBuffer<W, B>) -> Vec<(i16, i16)> {
    let mut pixels = Vec::new();
    for x in 0..buffer.width() as i16 {
        for y in 0..buffer.height() as i16 {
            if buffer.pixel(x, y) {
                pixels.push((x, y));
            }
        }
    }
    pixels
}

//! Hardware capabilities the display core is written against.
//!
//! None of these can fail: implementations handle any hardware errors
//! internally, because nothing may propagate out of the timer interrupt.

/// A single digital output line (blank, latch, clock, channel select).
pub trait OutputLine {
    /// Drives the line high.
    fn set_high(&mut self);

    /// Drives the line low.
    fn set_low(&mut self);

    /// Emits one high-then-low pulse.
    #[inline]
    fn pulse(&mut self) {
        self.set_high();
        self.set_low();
    }
}

/// Blocking single-byte transfer into the driver chain's shift path.
pub trait ByteLink {
    /// Shifts one byte out and returns once the transfer has completed.
    fn send_byte(&mut self, byte: u8);
}

/// Periodic timer that raises the cycle interrupt.
pub trait PeriodicTimer {
    /// Configures the period (in timer ticks) and enables the interrupt.
    fn start(&mut self, period: u32);
}

/// Signal edge an [`EdgeInput`] reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low-to-high transition.
    Rising,
    /// High-to-low transition.
    Falling,
}

/// Edge-triggered input with a hardware pending flag (rotation sensor).
pub trait EdgeInput {
    /// Arms the input for the given edge.
    fn listen(&mut self, edge: Edge);

    /// Returns true if an edge has been latched and not yet acknowledged.
    fn is_triggered(&self) -> bool;

    /// Clears the latched edge.
    fn acknowledge(&mut self);
}

/// Color channel of the multiplexed driver chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// Channel-select lines of the driver chain.
pub trait ChannelLines {
    /// Selects exactly one channel, releasing the others.
    fn select(&mut self, channel: Channel);

    /// Selects all channels at once.
    fn select_all(&mut self);

    /// Releases all channels.
    fn release_all(&mut self);
}

/// Three [`OutputLine`]s used as red/green/blue select lines (active high).
pub struct ChannelSelect<R: OutputLine, G: OutputLine, B: OutputLine> {
    red: R,
    green: G,
    blue: B,
}

impl<R: OutputLine, G: OutputLine, B: OutputLine> ChannelSelect<R, G, B> {
    /// Wraps the three select lines.
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self { red, green, blue }
    }

    /// Gives the lines back.
    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

impl<R: OutputLine, G: OutputLine, B: OutputLine> ChannelLines for ChannelSelect<R, G, B> {
    fn select(&mut self, channel: Channel) {
        self.release_all();
        match channel {
            Channel::Red => self.red.set_high(),
            Channel::Green => self.green.set_high(),
            Channel::Blue => self.blue.set_high(),
        }
    }

    fn select_all(&mut self) {
        self.red.set_high();
        self.green.set_high();
        self.blue.set_high();
    }

    fn release_all(&mut self) {
        self.red.set_low();
        self.green.set_low();
        self.blue.set_low();
    }
}

/// The handshake lines and data path of a multiplexed LED driver chain.
///
/// This is what the scheduler drives every cycle. [`ShiftChain`] builds one out
/// of individual lines; implement it directly if your platform can toggle the
/// lines faster as a group.
pub trait DriverChain: ByteLink {
    /// Asserts (`true`) or releases (`false`) output blanking.
    fn set_blank(&mut self, blank: bool);

    /// Commits the shifted data to the LED outputs.
    fn pulse_latch(&mut self);

    /// Emits one raw shift clock pulse, independent of a byte transfer.
    fn pulse_clock(&mut self);

    /// Puts every line into its power-on level: blank asserted, latch and clock low.
    fn reset_lines(&mut self);
}

/// [`DriverChain`] composed of blank, latch and clock lines plus a byte link.
pub struct ShiftChain<BL, XL, CK, L>
where
    BL: OutputLine,
    XL: OutputLine,
    CK: OutputLine,
    L: ByteLink,
{
    blank: BL,
    latch: XL,
    clock: CK,
    link: L,
}

impl<BL, XL, CK, L> ShiftChain<BL, XL, CK, L>
where
    BL: OutputLine,
    XL: OutputLine,
    CK: OutputLine,
    L: ByteLink,
{
    /// Create a driver chain from its lines.
    ///
    /// # Arguments
    /// * `blank` - Output blanking, high suppresses the LEDs
    /// * `latch` - Latch line, a pulse commits shifted data
    /// * `clock` - Raw shift clock, used outside of byte transfers
    /// * `link` - Serial data path
    pub fn new(blank: BL, latch: XL, clock: CK, link: L) -> Self {
        Self {
            blank,
            latch,
            clock,
            link,
        }
    }

    /// Gives the lines back.
    pub fn release(self) -> (BL, XL, CK, L) {
        (self.blank, self.latch, self.clock, self.link)
    }
}

impl<BL, XL, CK, L> ByteLink for ShiftChain<BL, XL, CK, L>
where
    BL: OutputLine,
    XL: OutputLine,
    CK: OutputLine,
    L: ByteLink,
{
    #[inline]
    fn send_byte(&mut self, byte: u8) {
        self.link.send_byte(byte);
    }
}

impl<BL, XL, CK, L> DriverChain for ShiftChain<BL, XL, CK, L>
where
    BL: OutputLine,
    XL: OutputLine,
    CK: OutputLine,
    L: ByteLink,
{
    #[inline]
    fn set_blank(&mut self, blank: bool) {
        if blank {
            self.blank.set_high();
        } else {
            self.blank.set_low();
        }
    }

    #[inline]
    fn pulse_latch(&mut self) {
        self.latch.pulse();
    }

    #[inline]
    fn pulse_clock(&mut self) {
        self.clock.pulse();
    }

    fn reset_lines(&mut self) {
        self.clock.set_low();
        self.latch.set_low();
        self.blank.set_high();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct Line<'a> {
        level: &'a Cell<bool>,
        pulses: &'a Cell<u32>,
    }

    impl<'a> Line<'a> {
        fn new(level: &'a Cell<bool>, pulses: &'a Cell<u32>) -> Self {
            Self { level, pulses }
        }
    }

    impl OutputLine for Line<'_> {
        fn set_high(&mut self) {
            self.level.set(true);
        }

        fn set_low(&mut self) {
            if self.level.get() {
                self.pulses.set(self.pulses.get() + 1);
            }
            self.level.set(false);
        }
    }

    #[test]
    fn select_releases_other_channels() {
        let levels = [Cell::new(false), Cell::new(false), Cell::new(false)];
        let pulses = [Cell::new(0), Cell::new(0), Cell::new(0)];
        let mut select = ChannelSelect::new(
            Line::new(&levels[0], &pulses[0]),
            Line::new(&levels[1], &pulses[1]),
            Line::new(&levels[2], &pulses[2]),
        );

        select.select_all();
        assert!(levels.iter().all(|l| l.get()));

        select.select(Channel::Green);
        assert!(!levels[0].get());
        assert!(levels[1].get());
        assert!(!levels[2].get());
    }

    #[test]
    fn default_pulse_is_high_then_low() {
        let level = Cell::new(false);
        let pulses = Cell::new(0);
        let mut line = Line::new(&level, &pulses);

        line.pulse();
        line.pulse();

        assert!(!level.get());
        assert_eq!(pulses.get(), 2);
    }
}

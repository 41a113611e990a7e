//! Hardware bring-up: puts the driver chain, rotation sensor and cycle timer
//! into their running state and hands back the scheduler.

use crate::config::{ConfigError, DisplayConfig};
use crate::hal::{ChannelLines, DriverChain, EdgeInput, PeriodicTimer};
use crate::rotation::RotationSync;
use crate::scheduler::{ColumnScheduler, ColumnSource};
use crate::time::{TimeInstant, TimeSource};

/// Brings the display up and returns an idle scheduler.
///
/// In order:
/// 0. check that `source` is as wide as the configured display
/// 1. drive every chain line to its power-on level and release the channel selects
/// 2. arm the rotation sensor on the configured edge
/// 3. blank and clear every LED on every channel
/// 4. start the cycle timer
///
/// The timer may fire as soon as this returns, so have the interrupt handler
/// ready to pick up the scheduler (for example through a
/// `critical_section::Mutex<RefCell<Option<_>>>`).
///
/// # Arguments
/// * `config` - Validated display configuration
/// * `chain` - Driver chain, moved into the scheduler
/// * `channels` - Channel-select lines
/// * `sensor` - Rotation sensor input
/// * `timer` - Timer raising the cycle interrupt
/// * `rotation` - Flag the sensor interrupt raises once per revolution
/// * `time_source` - Clock the cycles are measured with
/// * `source` - Column source the scheduler will be serviced with
///
/// # Errors
/// [`ConfigError::ColumnMismatch`] if `source` reports a width other than
/// [`DisplayConfig::columns`]. No hardware is touched in that case.
#[allow(clippy::too_many_arguments)]
pub fn init<'r, I, T, D, C, E, P, S>(
    config: DisplayConfig,
    mut chain: D,
    channels: &mut C,
    sensor: &mut E,
    timer: &mut P,
    rotation: &'r RotationSync,
    time_source: &'r T,
    source: &S,
) -> Result<ColumnScheduler<'r, I, T, D>, ConfigError>
where
    I: TimeInstant,
    T: TimeSource<I>,
    D: DriverChain,
    C: ChannelLines,
    E: EdgeInput,
    P: PeriodicTimer,
    S: ColumnSource + ?Sized,
{
    config.check_source(source)?;

    debug!(
        "bring-up: {} columns x {} leds",
        config.columns(),
        config.leds_per_column()
    );

    chain.reset_lines();
    channels.release_all();

    sensor.listen(config.sensor_edge());
    if sensor.is_triggered() {
        // An edge latched before arming says nothing about the home position.
        sensor.acknowledge();
    }

    clear_all_leds(&config, &mut chain, channels);

    timer.start(config.cycle_period());
    debug!("bring-up: cycle timer started, period {}", config.cycle_period());

    Ok(ColumnScheduler::new(config, chain, rotation, time_source))
}

/// Shifts zeros into every channel of the chain with the outputs blanked.
///
/// The zeros are committed by the latch of the scheduler's first cycle.
pub fn clear_all_leds<D: DriverChain, C: ChannelLines>(
    config: &DisplayConfig,
    chain: &mut D,
    channels: &mut C,
) {
    chain.set_blank(true);
    channels.select_all();

    for _ in 0..config.clear_bytes() {
        chain.send_byte(0);
    }

    channels.release_all();
}

//! Display geometry and timing configuration.

use crate::hal::Edge;
use crate::scheduler::ColumnSource;
use crate::{DEFAULT_COLUMNS, DEFAULT_LEDS_PER_COLUMN};

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Display has no columns.
    ZeroColumns,

    /// Columns have no LEDs.
    ZeroLeds,

    /// Driver shift width per LED is zero.
    ZeroBitsPerLed,

    /// Timer period is zero.
    ZeroCyclePeriod,

    /// Cycle budget is zero.
    ZeroCycleBudget,

    /// Column source is not as wide as the display.
    ColumnMismatch {
        /// Columns per revolution in the configuration
        configured: u16,
        /// Columns the source holds
        provided: u16,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroColumns => write!(f, "display must have at least one column"),
            ConfigError::ZeroLeds => write!(f, "columns must have at least one LED"),
            ConfigError::ZeroBitsPerLed => write!(f, "driver shift width per LED must be non-zero"),
            ConfigError::ZeroCyclePeriod => write!(f, "cycle timer period must be non-zero"),
            ConfigError::ZeroCycleBudget => write!(f, "cycle budget must be non-zero"),
            ConfigError::ColumnMismatch {
                configured,
                provided,
            } => write!(
                f,
                "column source holds {} columns, display is configured for {}",
                provided, configured
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Validated display configuration.
///
/// Built through [`DisplayConfig::builder`]; [`Default`] gives the reference
/// display (80 columns of 64 LEDs, 12-bit driver, 4096-tick cycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    columns: u16,
    leds_per_column: u16,
    bits_per_led: u8,
    cycle_period: u32,
    cycle_budget: u32,
    sensor_edge: Edge,
}

impl DisplayConfig {
    /// Creates a builder preloaded with the reference display's values.
    pub fn builder() -> DisplayConfigBuilder {
        DisplayConfigBuilder::new()
    }

    /// Number of angular columns per revolution.
    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Number of LEDs in one column.
    pub fn leds_per_column(&self) -> u16 {
        self.leds_per_column
    }

    /// Bits the driver chain shifts per LED.
    pub fn bits_per_led(&self) -> u8 {
        self.bits_per_led
    }

    /// Period handed to [`PeriodicTimer::start`](crate::hal::PeriodicTimer::start).
    pub fn cycle_period(&self) -> u32 {
        self.cycle_period
    }

    /// Time-source ticks one cycle may take.
    pub fn cycle_budget(&self) -> u32 {
        self.cycle_budget
    }

    /// Edge the rotation sensor fires on.
    pub fn sensor_edge(&self) -> Edge {
        self.sensor_edge
    }

    /// Checks that `source` can serve every configured column.
    ///
    /// Sources without a fixed width always pass.
    ///
    /// # Errors
    /// [`ConfigError::ColumnMismatch`] if the source's width differs.
    pub fn check_source<S: ColumnSource + ?Sized>(&self, source: &S) -> Result<(), ConfigError> {
        match source.column_count() {
            Some(provided) if provided != self.columns => Err(ConfigError::ColumnMismatch {
                configured: self.columns,
                provided,
            }),
            _ => Ok(()),
        }
    }

    /// Bytes of zeros needed to flush one full column through the chain.
    pub fn clear_bytes(&self) -> usize {
        (self.leds_per_column as usize * self.bits_per_led as usize).div_ceil(8)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            leds_per_column: DEFAULT_LEDS_PER_COLUMN,
            bits_per_led: 12,
            cycle_period: 4096,
            cycle_budget: 4096,
            sensor_edge: Edge::Falling,
        }
    }
}

/// Builder for validated [`DisplayConfig`]s.
#[derive(Debug, Clone, Copy)]
pub struct DisplayConfigBuilder {
    config: DisplayConfig,
}

impl DisplayConfigBuilder {
    /// Creates a builder with the reference display's values.
    pub fn new() -> Self {
        Self {
            config: DisplayConfig::default(),
        }
    }

    /// Sets the number of columns per revolution.
    pub fn columns(mut self, columns: u16) -> Self {
        self.config.columns = columns;
        self
    }

    /// Sets the number of LEDs per column.
    pub fn leds_per_column(mut self, leds: u16) -> Self {
        self.config.leds_per_column = leds;
        self
    }

    /// Sets the driver's shift width per LED.
    pub fn bits_per_led(mut self, bits: u8) -> Self {
        self.config.bits_per_led = bits;
        self
    }

    /// Sets the timer period of one cycle.
    pub fn cycle_period(mut self, period: u32) -> Self {
        self.config.cycle_period = period;
        self
    }

    /// Sets how many time-source ticks one cycle may take.
    pub fn cycle_budget(mut self, budget: u32) -> Self {
        self.config.cycle_budget = budget;
        self
    }

    /// Sets the rotation sensor edge.
    pub fn sensor_edge(mut self, edge: Edge) -> Self {
        self.config.sensor_edge = edge;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// Any zero-valued dimension or timing parameter.
    pub fn build(self) -> Result<DisplayConfig, ConfigError> {
        let config = self.config;

        if config.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if config.leds_per_column == 0 {
            return Err(ConfigError::ZeroLeds);
        }
        if config.bits_per_led == 0 {
            return Err(ConfigError::ZeroBitsPerLed);
        }
        if config.cycle_period == 0 {
            return Err(ConfigError::ZeroCyclePeriod);
        }
        if config.cycle_budget == 0 {
            return Err(ConfigError::ZeroCycleBudget);
        }

        Ok(config)
    }
}

impl Default for DisplayConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

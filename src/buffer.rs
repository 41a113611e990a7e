//! Column-addressed bitmap matching the data layout the driver chain consumes.
//!
//! Pixel `(x, y)` lives in byte `y / 8` of column `x`, bit `y % 8`.
//! Coordinates outside the buffer are clipped: writes are dropped, reads
//! return nothing. No write can reach another column's bytes.

use crate::hal::ByteLink;
use crate::scheduler::ColumnSource;

/// Buffer construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RasterError {
    /// Height does not need exactly `B` bytes per column.
    HeightOutOfRange {
        /// Requested height
        height: u16,
        /// Bytes per column of the buffer type
        bytes_per_column: usize,
    },
}

impl core::fmt::Display for RasterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RasterError::HeightOutOfRange {
                height,
                bytes_per_column,
            } => {
                write!(
                    f,
                    "height {} does not pack into {} bytes per column",
                    height, bytes_per_column
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RasterError {}

/// A fixed-size bitmap of `W` columns, each packed into `B` bytes.
///
/// # Type Parameters
/// * `W` - Number of columns (angular resolution)
/// * `B` - Bytes per column, `ceil(height / 8)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer<const W: usize, const B: usize> {
    columns: [[u8; B]; W],
    height: u16,
}

impl<const W: usize, const B: usize> RasterBuffer<W, B> {
    /// Creates a cleared buffer using every bit of every column (`height = B * 8`).
    pub const fn new() -> Self {
        Self {
            columns: [[0; B]; W],
            height: (B * 8) as u16,
        }
    }

    /// Creates a cleared buffer for columns of `height` LEDs.
    ///
    /// # Errors
    /// `HeightOutOfRange` unless `(B - 1) * 8 < height <= B * 8`.
    pub fn with_height(height: u16) -> Result<Self, RasterError> {
        let height_bytes = (height as usize).div_ceil(8);
        if height == 0 || height_bytes != B {
            return Err(RasterError::HeightOutOfRange {
                height,
                bytes_per_column: B,
            });
        }

        Ok(Self {
            columns: [[0; B]; W],
            height,
        })
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> u16 {
        W as u16
    }

    /// Number of rows (LEDs per column).
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Sets pixel `(x, y)`. Out-of-range coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i16, y: i16) {
        if let Some((col, byte, mask)) = self.locate(x, y) {
            self.columns[col][byte] |= mask;
        }
    }

    /// Clears pixel `(x, y)`. Out-of-range coordinates are ignored.
    #[inline]
    pub fn clear_pixel(&mut self, x: i16, y: i16) {
        if let Some((col, byte, mask)) = self.locate(x, y) {
            self.columns[col][byte] &= !mask;
        }
    }

    /// Returns whether pixel `(x, y)` is set. Out-of-range reads as unset.
    #[inline]
    pub fn pixel(&self, x: i16, y: i16) -> bool {
        match self.locate(x, y) {
            Some((col, byte, mask)) => self.columns[col][byte] & mask != 0,
            None => false,
        }
    }

    /// Clears every bit, writing each byte exactly once.
    pub fn clear(&mut self) {
        for column in self.columns.iter_mut() {
            column.fill(0);
        }
    }

    /// Sets every pixel inside the buffer height.
    ///
    /// Padding bits above `height` in the last byte stay clear.
    pub fn fill(&mut self) {
        let mut column = [0xFF; B];
        let tail = self.height as usize % 8;
        if tail != 0 {
            column[B - 1] = (1u8 << tail) - 1;
        }
        self.columns.fill(column);
    }

    /// Returns the packed bytes of column `x`, or `None` if it is out of range.
    #[inline]
    pub fn column(&self, x: u16) -> Option<&[u8; B]> {
        self.columns.get(x as usize)
    }

    /// Iterates over all columns in index order.
    pub fn columns(&self) -> impl Iterator<Item = &[u8; B]> {
        self.columns.iter()
    }

    /// Shifts the bytes of column `x` out in index order.
    ///
    /// An out-of-range column still shifts `B` zero bytes, so the driver chain
    /// always receives a complete column.
    #[inline]
    pub fn send_column(&self, x: u16, link: &mut impl ByteLink) {
        match self.column(x) {
            Some(bytes) => {
                for &byte in bytes {
                    link.send_byte(byte);
                }
            }
            None => {
                for _ in 0..B {
                    link.send_byte(0);
                }
            }
        }
    }

    fn locate(&self, x: i16, y: i16) -> Option<(usize, usize, u8)> {
        if x < 0 || y < 0 || x as usize >= W || y as u16 >= self.height {
            return None;
        }

        let y = y as usize;
        Some((x as usize, y / 8, 1 << (y % 8)))
    }
}

impl<const W: usize, const B: usize> Default for RasterBuffer<W, B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders through [`RasterBuffer::send_column`].
impl<const W: usize, const B: usize> ColumnSource for RasterBuffer<W, B> {
    #[inline]
    fn render(&mut self, column: u16, link: &mut impl ByteLink) {
        self.send_column(column, link);
    }

    fn column_count(&self) -> Option<u16> {
        Some(u16::try_from(W).unwrap_or(u16::MAX))
    }
}

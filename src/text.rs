//! Column glyphs and a small character table for drawing text.
//!
//! Buffer x grows in scan order, which on the spinning display runs right to
//! left as seen by the viewer. Glyphs are stored the same way, as
//! image-to-column converters emit them: a slice of 16-bit columns starting
//! with the glyph's rightmost column, bit `r` being row `r` counted down from
//! the top edge. Text is therefore laid out toward decreasing x.

use heapless::index_map::FnvIndexMap;

use crate::buffer::RasterBuffer;

/// Font table errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontError {
    /// The table has no room for another character.
    Full,
}

impl core::fmt::Display for FontError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FontError::Full => write!(f, "font table is full"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FontError {}

/// Draws `glyph` with its first column at `(x, y)`, growing toward
/// increasing x. Clipped by the buffer.
pub fn draw_glyph<const W: usize, const B: usize>(
    buffer: &mut RasterBuffer<W, B>,
    x: i16,
    y: i16,
    glyph: &[u16],
) {
    for (dx, &bits) in glyph.iter().enumerate() {
        let Ok(px) = i16::try_from(x as i32 + dx as i32) else {
            return;
        };

        for row in 0..16 {
            if bits & (1 << row) != 0 {
                if let Ok(py) = i16::try_from(y as i32 + row) {
                    buffer.set_pixel(px, py);
                }
            }
        }
    }
}

/// Maps characters to glyphs.
///
/// # Type Parameters
/// * `N` - Maximum number of characters, a power of two
#[derive(Debug, Clone)]
pub struct Font<const N: usize> {
    glyphs: FnvIndexMap<char, &'static [u16], N>,
    spacing: u8,
    space_width: u8,
}

impl<const N: usize> Font<N> {
    /// Creates an empty font.
    ///
    /// # Arguments
    /// * `spacing` - Blank columns between two characters
    /// * `space_width` - Advance of characters without a glyph (such as `' '`)
    pub fn new(spacing: u8, space_width: u8) -> Self {
        Self {
            glyphs: FnvIndexMap::new(),
            spacing,
            space_width,
        }
    }

    /// Adds or replaces the glyph of `ch`.
    pub fn insert(&mut self, ch: char, glyph: &'static [u16]) -> Result<(), FontError> {
        self.glyphs
            .insert(ch, glyph)
            .map(|_| ())
            .map_err(|_| FontError::Full)
    }

    /// Returns the glyph of `ch`, if any.
    pub fn glyph(&self, ch: char) -> Option<&'static [u16]> {
        self.glyphs.get(&ch).copied()
    }

    /// Horizontal advance of `ch`, spacing included.
    pub fn advance(&self, ch: char) -> i16 {
        let width = match self.glyph(ch) {
            Some(glyph) => glyph.len().min(i16::MAX as usize) as i16,
            None => self.space_width as i16,
        };
        width.saturating_add(self.spacing as i16)
    }

    /// Width of `text` in columns, trailing spacing included.
    pub fn text_width(&self, text: &str) -> i16 {
        text.chars()
            .fold(0i16, |width, ch| width.saturating_add(self.advance(ch)))
    }

    /// Draws `text` so that it reads correctly on the display.
    ///
    /// `x` is the column of the text's left edge as seen, its highest buffer
    /// column. Characters follow toward decreasing x. Returns the pen position
    /// after the last character, `x - text_width(text)`.
    pub fn draw_text<const W: usize, const B: usize>(
        &self,
        buffer: &mut RasterBuffer<W, B>,
        x: i16,
        y: i16,
        text: &str,
    ) -> i16 {
        let mut pen = x;
        for ch in text.chars() {
            if let Some(glyph) = self.glyph(ch) {
                let last = glyph.len().saturating_sub(1).min(i16::MAX as usize) as i16;
                draw_glyph(buffer, pen.saturating_sub(last), y, glyph);
            }
            pen = pen.saturating_sub(self.advance(ch));
        }
        pen
    }
}

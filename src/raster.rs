//! Integer line and circle rasterizers.
//!
//! Both only call [`RasterBuffer::set_pixel`], so shapes crossing the buffer
//! edge are clipped by the buffer. No floating point, no allocation.

use crate::buffer::RasterBuffer;

/// Draws a line from `(x0, y0)` to `(x1, y1)`, both endpoints included.
///
/// Bresenham's algorithm: the axis with the larger delta drives the loop and
/// an error accumulator decides when to step the minor axis, giving exactly
/// `max(|dx|, |dy|) + 1` pixel writes. The line is always traced from the
/// lexicographically smaller endpoint, so swapping the endpoints draws the
/// same pixels.
pub fn draw_line<const W: usize, const B: usize>(
    buffer: &mut RasterBuffer<W, B>,
    x0: i16,
    y0: i16,
    x1: i16,
    y1: i16,
) {
    let ((x0, y0), (x1, y1)) = if (x0, y0) <= (x1, y1) {
        ((x0, y0), (x1, y1))
    } else {
        ((x1, y1), (x0, y0))
    };

    let (x0, y0, x1, y1) = (x0 as i32, y0 as i32, x1 as i32, y1 as i32);
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let (mut x, mut y) = (x0, y0);
    if dx >= dy {
        let mut err = dx / 2;
        for _ in 0..=dx {
            buffer.set_pixel(x as i16, y as i16);
            err -= dy;
            if err < 0 {
                y += sy;
                err += dx;
            }
            x += sx;
        }
    } else {
        let mut err = dy / 2;
        for _ in 0..=dy {
            buffer.set_pixel(x as i16, y as i16);
            err -= dx;
            if err < 0 {
                x += sx;
                err += dy;
            }
            y += sy;
        }
    }
}

/// Draws a circle of `radius` around `(cx, cy)`.
///
/// Midpoint algorithm walking one octant from the top and mirroring every
/// offset into all eight octants. Radius 0 plots the centre only.
pub fn draw_circle<const W: usize, const B: usize>(
    buffer: &mut RasterBuffer<W, B>,
    cx: i16,
    cy: i16,
    radius: u16,
) {
    let (cx, cy) = (cx as i32, cy as i32);
    let mut x: i32 = 0;
    let mut y: i32 = radius as i32;
    let mut p: i32 = 5 - 4 * radius as i32;

    while x <= y {
        plot_octants(buffer, cx, cy, x, y);

        x += 1;
        if p < 0 {
            p += 8 * x + 4;
        } else {
            y -= 1;
            p += 8 * (x - y) + 4;
        }
    }
}

#[inline]
fn plot_octants<const W: usize, const B: usize>(
    buffer: &mut RasterBuffer<W, B>,
    cx: i32,
    cy: i32,
    x: i32,
    y: i32,
) {
    let mut plot = |px: i32, py: i32| {
        // Points far outside i16 can't be on the buffer anyway.
        if let (Ok(px), Ok(py)) = (i16::try_from(px), i16::try_from(py)) {
            buffer.set_pixel(px, py);
        }
    };

    plot(cx + x, cy + y);
    plot(cx - x, cy + y);
    plot(cx + x, cy - y);
    plot(cx - x, cy - y);
    plot(cx + y, cy + x);
    plot(cx - y, cy + x);
    plot(cx + y, cy - x);
    plot(cx - y, cy - x);
}

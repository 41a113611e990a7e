//! Double-buffered frames shared between drawing code and the cycle interrupt.
//!
//! A [`FrameBuffer`] is split into a [`Canvas`] for the drawing side and a
//! [`FrameReader`] for the interrupt side. The reader always shows the front
//! buffer; the canvas only ever writes the back buffer. Presenting a frame
//! hands it over, and the reader swaps buffers when it next reaches column 0,
//! so a revolution never mixes two frames and a column is never read while
//! being written.
//!
//! ```
//! use pov_display::{FrameBuffer, draw_circle};
//!
//! let mut frame = FrameBuffer::<80, 8>::new();
//! let (mut canvas, mut reader) = frame.split();
//!
//! if let Some(back) = canvas.draw() {
//!     back.clear();
//!     draw_circle(back, 40, 32, 20);
//!     canvas.present();
//! }
//!
//! // Normally done by the scheduler, through `ColumnSource::render`.
//! assert!(reader.flip());
//! assert!(reader.front().pixel(40, 52));
//! ```

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::buffer::RasterBuffer;
use crate::hal::ByteLink;
use crate::scheduler::ColumnSource;

/// Two raster buffers with a lock-free hand-over between them.
///
/// # Type Parameters
/// * `W` - Number of columns
/// * `B` - Bytes per column
pub struct FrameBuffer<const W: usize, const B: usize> {
    buffers: [UnsafeCell<RasterBuffer<W, B>>; 2],
    // false: buffer 0 is shown, true: buffer 1 is shown. Written by the reader only.
    front: AtomicBool,
    // Set by the canvas, cleared by the reader after swapping.
    presented: AtomicBool,
}

// SAFETY: the buffers are only reachable through `Canvas` and `FrameReader`,
// which by the `presented` handshake never access the same buffer mutably and
// concurrently.
unsafe impl<const W: usize, const B: usize> Sync for FrameBuffer<W, B> {}

impl<const W: usize, const B: usize> FrameBuffer<W, B> {
    /// Creates two cleared buffers of full height. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            buffers: [
                UnsafeCell::new(RasterBuffer::new()),
                UnsafeCell::new(RasterBuffer::new()),
            ],
            front: AtomicBool::new(false),
            presented: AtomicBool::new(false),
        }
    }

    /// Creates two cleared buffers for columns of `height` LEDs.
    pub fn with_height(height: u16) -> Result<Self, crate::buffer::RasterError> {
        Ok(Self {
            buffers: [
                UnsafeCell::new(RasterBuffer::with_height(height)?),
                UnsafeCell::new(RasterBuffer::with_height(height)?),
            ],
            front: AtomicBool::new(false),
            presented: AtomicBool::new(false),
        })
    }

    /// Splits into the drawing and the interrupt side.
    pub fn split(&mut self) -> (Canvas<'_, W, B>, FrameReader<'_, W, B>) {
        let frame: &Self = self;
        (Canvas { frame }, FrameReader { frame })
    }

    #[inline]
    fn front_index(&self) -> usize {
        self.front.load(Ordering::Relaxed) as usize
    }
}

impl<const W: usize, const B: usize> Default for FrameBuffer<W, B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Drawing side of a [`FrameBuffer`].
pub struct Canvas<'a, const W: usize, const B: usize> {
    frame: &'a FrameBuffer<W, B>,
}

impl<const W: usize, const B: usize> Canvas<'_, W, B> {
    /// Returns the back buffer, or `None` while a presented frame has not
    /// been picked up yet.
    ///
    /// The back buffer still holds whatever was drawn into it two frames ago.
    pub fn draw(&mut self) -> Option<&mut RasterBuffer<W, B>> {
        if self.is_presenting() {
            return None;
        }

        let back = 1 - self.frame.front_index();
        // SAFETY: nothing is presented, so the reader will not swap and only
        // ever touches the front buffer. The borrow is tied to `&mut self`.
        Some(unsafe { &mut *self.frame.buffers[back].get() })
    }

    /// Like [`draw`](Self::draw), but first copies the shown frame into the
    /// back buffer so it can be edited incrementally.
    pub fn draw_copy(&mut self) -> Option<&mut RasterBuffer<W, B>> {
        if self.is_presenting() {
            return None;
        }

        let front = self.frame.front_index();
        // SAFETY: as in `draw`; the front buffer is only ever read, by both sides.
        let (shown, back) = unsafe {
            (
                &*self.frame.buffers[front].get(),
                &mut *self.frame.buffers[1 - front].get(),
            )
        };
        back.clone_from(shown);
        Some(back)
    }

    /// Hands the back buffer over to be shown from the next revolution on.
    pub fn present(&mut self) {
        self.frame.presented.store(true, Ordering::Release);
    }

    /// Returns true while a presented frame waits for the reader.
    pub fn is_presenting(&self) -> bool {
        self.frame.presented.load(Ordering::Acquire)
    }
}

/// Interrupt side of a [`FrameBuffer`].
pub struct FrameReader<'a, const W: usize, const B: usize> {
    frame: &'a FrameBuffer<W, B>,
}

impl<const W: usize, const B: usize> FrameReader<'_, W, B> {
    /// Swaps to the presented frame, if there is one.
    ///
    /// Returns true if the buffers were swapped.
    pub fn flip(&mut self) -> bool {
        if !self.frame.presented.load(Ordering::Acquire) {
            return false;
        }

        let front = self.frame.front.load(Ordering::Relaxed);
        self.frame.front.store(!front, Ordering::Relaxed);
        self.frame.presented.store(false, Ordering::Release);
        true
    }

    /// The frame currently shown.
    pub fn front(&self) -> &RasterBuffer<W, B> {
        // SAFETY: the canvas never writes the front buffer, and the front
        // only moves in `flip`, which needs `&mut self`.
        unsafe { &*self.frame.buffers[self.frame.front_index()].get() }
    }
}

/// Renders from the front buffer, swapping in a presented frame at column 0.
impl<const W: usize, const B: usize> ColumnSource for FrameReader<'_, W, B> {
    fn render(&mut self, column: u16, link: &mut impl ByteLink) {
        if column == 0 {
            self.flip();
        }

        self.front().send_column(column, link);
    }

    fn column_count(&self) -> Option<u16> {
        Some(u16::try_from(W).unwrap_or(u16::MAX))
    }
}

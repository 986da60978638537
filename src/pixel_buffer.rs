//! Per-LED color storage.
//!
//! See [`PixelBuffer`].

use heapless::Vec;

use crate::color::{RGB8, ToPacked, ToRgb8};
use crate::{Error, Result};

/// Owned, resizable color store holding up to `N` LEDs.
///
/// The length always equals the declared LED count. Every access is bounds
/// checked: writes past the end are ignored and reads past the end return black
/// (`0`). A black pixel and an out-of-range read are indistinguishable.
///
/// Resizing is destructive. The old colors are dropped and the new buffer starts
/// out black. Asking for more than `N` LEDs leaves an empty buffer, which every
/// other operation treats as zero LEDs.
///
/// # Example
///
/// ```rust
/// use t3a33brg::PixelBuffer;
///
/// let mut pixels: PixelBuffer<16> = PixelBuffer::new(3);
/// pixels.set_rgb(0, 1, 2, 3);
/// pixels.set_packed(1, 0x04_0506);
/// pixels.set_rgb(7, 9, 9, 9); // out of range, ignored
///
/// assert_eq!(pixels.packed(0), 0x01_0203);
/// assert_eq!(pixels.packed(1), 0x04_0506);
/// assert_eq!(pixels.packed(7), 0);
///
/// pixels.resize(32); // too many, buffer is now empty
/// assert!(pixels.is_empty());
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PixelBuffer<const N: usize> {
    pixels: Vec<RGB8, N>,
}

impl<const N: usize> PixelBuffer<N> {
    /// Maximum number of LEDs this buffer can hold.
    pub const CAPACITY: usize = N;

    /// Create a buffer of `len` black LEDs (empty if `len` exceeds `N`).
    #[must_use]
    pub fn new(len: usize) -> Self {
        let mut pixel_buffer = Self { pixels: Vec::new() };
        pixel_buffer.reallocate(len);
        pixel_buffer
    }

    /// Number of LEDs currently declared.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Maximum number of LEDs, same as [`CAPACITY`](Self::CAPACITY).
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// True when the buffer holds no LEDs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Set one LED from separate red, green and blue channels.
    pub fn set_rgb(&mut self, index: usize, red: u8, green: u8, blue: u8) {
        self.set(index, RGB8::new(red, green, blue));
    }

    /// Set one LED from a packed `0xRRGGBB` color. Bits above 23 are dropped.
    pub fn set_packed(&mut self, index: usize, color: u32) {
        self.set(index, color.to_rgb8());
    }

    /// Set one LED. Out-of-range indexes are ignored.
    pub fn set(&mut self, index: usize, color: RGB8) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    /// Color of one LED, or black for an out-of-range index.
    #[must_use]
    pub fn get(&self, index: usize) -> RGB8 {
        self.pixels.get(index).copied().unwrap_or_default()
    }

    /// Packed `0xRRGGBB` color of one LED, or `0` for an out-of-range index.
    #[must_use]
    pub fn packed(&self, index: usize) -> u32 {
        self.get(index).to_packed()
    }

    /// Set every LED to black.
    pub fn clear(&mut self) {
        self.pixels.fill(RGB8::default());
    }

    /// Replace the buffer with `len` black LEDs.
    ///
    /// All previous colors are lost. If `len` exceeds `N`, the buffer ends up empty.
    pub fn resize(&mut self, len: usize) {
        self.reallocate(len);
    }

    /// Like [`resize`](Self::resize), but reports a capacity overflow.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] when `len` exceeds `N`. The buffer is
    /// left empty in that case.
    pub fn try_resize(&mut self, len: usize) -> Result<()> {
        if self.reallocate(len) {
            Ok(())
        } else {
            Err(Error::CapacityExceeded {
                requested: len,
                capacity: N,
            })
        }
    }

    /// The LED colors in strip order.
    #[must_use]
    pub fn as_slice(&self) -> &[RGB8] {
        &self.pixels
    }

    /// Iterate over the LED colors in strip order.
    pub fn iter(&self) -> core::slice::Iter<'_, RGB8> {
        self.pixels.iter()
    }

    fn reallocate(&mut self, len: usize) -> bool {
        self.pixels.clear();
        if self.pixels.resize_default(len).is_err() {
            warn!(
                "PixelBuffer: {} LEDs exceeds capacity {}, buffer is now empty",
                len, N
            );
            return false;
        }
        debug!("PixelBuffer: reallocated {} LEDs", len);
        true
    }
}

impl<'a, const N: usize> IntoIterator for &'a PixelBuffer<N> {
    type Item = &'a RGB8;
    type IntoIter = core::slice::Iter<'a, RGB8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

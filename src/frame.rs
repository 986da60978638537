//! Wire format of a T3A33BRG frame.
//!
//! A frame is a 4-byte all-zero start marker, one 4-byte group per LED
//! (`0xFF`, blue, green, red) and a 4-byte all-one end marker. The bus runs at
//! 1 MHz, 8 bits per word, CPOL 1 / CPHA 1, most significant bit first. After the
//! last byte the clock idles for 1 ms so the chips latch the new colors.
//!
//! These values belong to the chip family and are not configurable.

use core::iter::FusedIterator;
use core::slice;

use embedded_hal::spi::{MODE_3, Mode};

use crate::color::RGB8;

/// Bytes per wire group (marker or LED).
pub const WORD_LEN: usize = 4;

/// 32 consecutive zero bits open a frame.
pub const START_MARKER: [u8; WORD_LEN] = [0x00; WORD_LEN];

/// 32 consecutive one bits close a frame.
pub const END_MARKER: [u8; WORD_LEN] = [0xFF; WORD_LEN];

/// Constant first byte of every per-LED group.
pub const LED_PARAMETER: u8 = 0xFF;

/// SPI clock rate.
pub const SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// Bits per SPI transfer word. Words go out most significant bit first.
pub const BITS_PER_WORD: u8 = 8;

/// Clock polarity 1, phase 1.
pub const SPI_MODE: Mode = MODE_3;

/// Idle time after a frame, in microseconds. The chips latch while the clock is held.
pub const LATCH_DELAY_US: u32 = 1_000;

/// SPI bus format handed to [`SpiPort::apply_format`](crate::SpiPort::apply_format).
///
/// [`BusFormat::T3A33BRG`] is the only value: 1 MHz, [`BITS_PER_WORD`]-bit words,
/// [`SPI_MODE`], most significant bit first. Word size and bit order are fixed by
/// the `SpiBus<u8>` seam, so only the clock rate and mode are carried.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BusFormat {
    frequency_hz: u32,
    mode: Mode,
}

impl BusFormat {
    /// The only format T3A33BRG modules accept.
    pub const T3A33BRG: Self = Self {
        frequency_hz: SPI_FREQUENCY_HZ,
        mode: SPI_MODE,
    };

    /// Clock rate in hertz.
    #[must_use]
    pub const fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// Clock polarity and phase.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }
}

/// Start and end markers that delimit a frame.
///
/// Created once by [`activate`](crate::T3a33brg::activate) and never changed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameMarkers {
    /// Sent before the first LED.
    pub start: [u8; WORD_LEN],
    /// Sent after the last LED.
    pub end: [u8; WORD_LEN],
}

impl FrameMarkers {
    /// All-zero start, all-one end.
    pub const T3A33BRG: Self = Self {
        start: START_MARKER,
        end: END_MARKER,
    };

    /// Wire groups of one frame over `pixels`.
    #[must_use]
    pub fn words<'a>(&self, pixels: &'a [RGB8]) -> FrameWords<'a> {
        FrameWords {
            markers: *self,
            pixels: pixels.iter(),
            stage: Stage::Start,
        }
    }
}

/// Per-LED wire group: parameter byte, then blue, green, red.
#[must_use]
pub const fn led_word(color: RGB8) -> [u8; WORD_LEN] {
    [LED_PARAMETER, color.b, color.g, color.r]
}

/// Total frame length in bytes for `led_count` LEDs (`8 + 4 * led_count`).
#[must_use]
pub const fn frame_len(led_count: usize) -> usize {
    WORD_LEN.saturating_mul(led_count.saturating_add(2))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Stage {
    Start,
    Pixels,
    Done,
}

/// Lazy sequence of 4-byte wire groups making up one frame.
///
/// Yields the start marker, one [`led_word`] per LED, then the end marker. Clone it
/// to walk the same frame again; nothing is shared between walks.
#[derive(Clone, Debug)]
pub struct FrameWords<'a> {
    markers: FrameMarkers,
    pixels: slice::Iter<'a, RGB8>,
    stage: Stage,
}

impl Iterator for FrameWords<'_> {
    type Item = [u8; WORD_LEN];

    fn next(&mut self) -> Option<Self::Item> {
        match self.stage {
            Stage::Start => {
                self.stage = Stage::Pixels;
                Some(self.markers.start)
            }
            Stage::Pixels => {
                if let Some(color) = self.pixels.next() {
                    Some(led_word(*color))
                } else {
                    self.stage = Stage::Done;
                    Some(self.markers.end)
                }
            }
            Stage::Done => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.stage {
            Stage::Start => self.pixels.len().saturating_add(2),
            Stage::Pixels => self.pixels.len().saturating_add(1),
            Stage::Done => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameWords<'_> {}

impl FusedIterator for FrameWords<'_> {}

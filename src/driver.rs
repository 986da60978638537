//! The T3A33BRG frame transmitter.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::{Error as _, ErrorKind};
use smart_leds::SmartLedsWrite;

use crate::color::{RGB8, ToPacked};
use crate::frame::{BusFormat, FrameMarkers, FrameWords, LATCH_DELAY_US, frame_len};
use crate::pixel_buffer::PixelBuffer;
use crate::port::{Pins, SpiPort};
use crate::{Error, Result};

/// A chain of T3A33BRG LED modules on one SPI bus.
///
/// `N` is the largest number of LEDs the driver can hold; the actual count is set
/// at construction and by [`resize`](Self::resize).
///
/// The driver starts **unconfigured**. [`activate`](Self::activate) applies the bus
/// format, routes the pins and creates the frame markers; after that it is
/// **active** until dropped. Color setters work in either state and never touch
/// the bus. Only [`show`](Self::show) writes, and it blocks until the whole frame
/// and the 1 ms latch delay are done.
///
/// The driver has no locking. Share it between threads only behind your own mutex.
pub struct T3a33brg<P, D, const N: usize> {
    pixels: PixelBuffer<N>,
    pins: Pins,
    port: P,
    delay: D,
    markers: Option<FrameMarkers>,
}

impl<P: SpiPort, D: DelayNs, const N: usize> T3a33brg<P, D, N> {
    /// Create a driver for `len` LEDs (zero LEDs if `len` exceeds `N`) and route
    /// `pins` to the SPI function of `port`. A pin the port does not have is
    /// skipped with a warning.
    ///
    /// The bus itself is not configured until [`activate`](Self::activate).
    pub fn new(len: usize, pins: Pins, port: P, delay: D) -> Self {
        let mut driver = Self {
            pixels: PixelBuffer::new(len),
            pins,
            port,
            delay,
            markers: None,
        };
        driver.route_pins();
        driver
    }

    /// Configure the bus (1 MHz, 8-bit words, CPOL 1 / CPHA 1, MSB first), route
    /// the pins and initialize the frame markers.
    ///
    /// Call once before the first [`show`](Self::show). Later calls change nothing.
    pub fn activate(&mut self) {
        if self.markers.is_some() {
            debug!("T3a33brg: already active");
            return;
        }
        self.port.apply_format(&BusFormat::T3A33BRG);
        self.route_pins();
        self.markers = Some(FrameMarkers::T3A33BRG);
        info!(
            "T3a33brg: active with {} LEDs (data GPIO{}, clock GPIO{})",
            self.pixels.len(),
            self.pins.data,
            self.pins.clock
        );
    }

    // Routes clock then data. Pins the port does not have are skipped.
    fn route_pins(&mut self) {
        for pin in [self.pins.clock, self.pins.data] {
            if self.port.supports_pin(pin) {
                self.port.route_pin(pin);
            } else {
                warn!("T3a33brg: GPIO{} does not exist, not routed", pin);
            }
        }
    }

    /// True once [`activate`](Self::activate) has run.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.markers.is_some()
    }

    /// Send the current colors to the LEDs and wait for them to latch.
    ///
    /// Writes the start marker, each LED as `0xFF, blue, green, red`, the end
    /// marker, then idles 1 ms. Bus errors are ignored; the full frame and the delay
    /// always go out. Before [`activate`](Self::activate) this does nothing.
    pub fn show(&mut self) {
        let Some(markers) = self.markers else {
            warn!("T3a33brg: show() before activate(), nothing sent");
            return;
        };
        if let Some(error_kind) = self.transmit(markers) {
            warn!("T3a33brg: bus error ignored during show(): {}", error_kind);
        }
    }

    /// Like [`show`](Self::show), but reports failures.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotActive`] (with no bus traffic) before
    /// [`activate`](Self::activate), or [`Error::Bus`] with the first bus error seen.
    /// A bus error does not cut the frame short.
    pub fn try_show(&mut self) -> Result<()> {
        let markers = self.markers.ok_or(Error::NotActive)?;
        match self.transmit(markers) {
            Some(error_kind) => Err(Error::Bus(error_kind)),
            None => Ok(()),
        }
    }

    // Sends one whole frame plus the latch delay and returns the first bus error.
    fn transmit(&mut self, markers: FrameMarkers) -> Option<ErrorKind> {
        let mut first_error = None;
        for word in markers.words(self.pixels.as_slice()) {
            if let Err(error) = self.port.write(&word) {
                first_error.get_or_insert(error.kind());
            }
        }
        if let Err(error) = self.port.flush() {
            first_error.get_or_insert(error.kind());
        }
        self.delay.delay_us(LATCH_DELAY_US);
        trace!(
            "T3a33brg: sent {} LEDs in {} bytes",
            self.pixels.len(),
            frame_len(self.pixels.len())
        );
        first_error
    }

    /// Set one LED from separate red, green and blue channels.
    ///
    /// Out-of-range indexes are ignored.
    pub fn set_pixel_color(&mut self, index: usize, red: u8, green: u8, blue: u8) {
        self.pixels.set_rgb(index, red, green, blue);
    }

    /// Set one LED from a packed `0xRRGGBB` color. Bits above 23 are dropped.
    ///
    /// Out-of-range indexes are ignored.
    pub fn set_pixel_color_packed(&mut self, index: usize, color: u32) {
        self.pixels.set_packed(index, color);
    }

    /// Set one LED. Out-of-range indexes are ignored.
    pub fn set_pixel(&mut self, index: usize, color: RGB8) {
        self.pixels.set(index, color);
    }

    /// Packed `0xRRGGBB` color of one LED.
    ///
    /// Returns `0` for an out-of-range index, the same as a black LED.
    #[must_use]
    pub fn pixel_color(&self, index: usize) -> u32 {
        self.pixels.get(index).to_packed()
    }

    /// Color of one LED, or black for an out-of-range index.
    #[must_use]
    pub fn pixel(&self, index: usize) -> RGB8 {
        self.pixels.get(index)
    }

    /// Set every LED to black. Takes effect on the next [`show`](Self::show).
    pub fn clear(&mut self) {
        self.pixels.clear();
    }

    /// Move the bus to new pins.
    ///
    /// The current data and clock pins go back to plain GPIO inputs, then the new
    /// clock and data pins are routed to SPI. Works before and after
    /// [`activate`](Self::activate). If either pin does not exist on the chip,
    /// nothing changes.
    pub fn reassign_pins(&mut self, data: u8, clock: u8) {
        if let Err(error) = self.try_reassign_pins(data, clock) {
            warn!("T3a33brg: pins not moved: {}", error);
        }
    }

    /// Like [`reassign_pins`](Self::reassign_pins), but reports a rejected pin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPin`] when the port does not have `data` or
    /// `clock`. No pin is released or routed in that case.
    pub fn try_reassign_pins(&mut self, data: u8, clock: u8) -> Result<()> {
        if let Some(pin) = [data, clock]
            .into_iter()
            .find(|pin| !self.port.supports_pin(*pin))
        {
            return Err(Error::UnsupportedPin { pin });
        }
        for old_pin in [self.pins.data, self.pins.clock] {
            if self.port.supports_pin(old_pin) {
                self.port.release_pin(old_pin);
            }
        }
        self.port.route_pin(clock);
        self.port.route_pin(data);
        info!(
            "T3a33brg: pins moved from data GPIO{}/clock GPIO{} to data GPIO{}/clock GPIO{}",
            self.pins.data,
            self.pins.clock,
            data,
            clock
        );
        self.pins = Pins { data, clock };
        Ok(())
    }

    /// Change the number of LEDs. All colors are reset to black.
    ///
    /// If `len` exceeds `N`, the driver drops to zero LEDs.
    pub fn resize(&mut self, len: usize) {
        self.pixels.resize(len);
    }

    /// Like [`resize`](Self::resize), but reports a capacity overflow.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] when `len` exceeds `N`. The driver is left
    /// with zero LEDs in that case.
    pub fn try_resize(&mut self, len: usize) -> Result<()> {
        self.pixels.try_resize(len)
    }

    /// Number of LEDs currently driven.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True when no LEDs are driven.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pins currently routed to the bus.
    #[must_use]
    pub const fn pins(&self) -> Pins {
        self.pins
    }

    /// The color buffer.
    #[must_use]
    pub const fn pixels(&self) -> &PixelBuffer<N> {
        &self.pixels
    }

    /// Wire groups the next [`show`](Self::show) will send, or `None` before
    /// [`activate`](Self::activate).
    #[must_use]
    pub fn frame(&self) -> Option<FrameWords<'_>> {
        self.markers.map(|markers| markers.words(self.pixels.as_slice()))
    }

    /// Give back the port and the delay.
    pub fn release(self) -> (P, D) {
        (self.port, self.delay)
    }
}

/// Writing through [`SmartLedsWrite`] fills the buffer from the start, up to
/// [`len`](T3a33brg::len) colors, then calls [`try_show`](T3a33brg::try_show).
/// LEDs past the end of a short iterator keep their colors.
impl<P: SpiPort, D: DelayNs, const N: usize> SmartLedsWrite for T3a33brg<P, D, N> {
    type Error = Error;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<()>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let len = self.pixels.len();
        for (index, color) in iterator.into_iter().take(len).enumerate() {
            self.pixels.set(index, color.into());
        }
        self.try_show()
    }
}

//! RP2040 / RP2350 backend built on `embassy-rp` blocking SPI.
//!
//! See [`RpSpiPort`] and [`T3a33brg::new_rp`].
//!
//! # Example
//!
//! ```rust,ignore
//! use t3a33brg::{T3a33brg, colors};
//!
//! let p = embassy_rp::init(Default::default());
//!
//! // 8 LEDs on SPI0: data on GPIO19, clock on GPIO18.
//! let mut strip: T3a33brg<_, _, 8> = T3a33brg::new_rp(8, p.SPI0, p.PIN_19, p.PIN_18);
//! strip.activate();
//! strip.set_pixel(0, colors::BLUE);
//! strip.show();
//! ```

use embassy_rp::Peri;
use embassy_rp::pac;
use embassy_rp::spi::{self, Blocking, ClkPin, Config, Instance, MosiPin, Phase, Polarity, Spi};
use embassy_time::Delay;
use embedded_hal::spi::{ErrorType, SpiBus};

use crate::frame::BusFormat;
use crate::port::{Pins, SpiPort};
use crate::T3a33brg;

// IO_BANK0 GPIOx_CTRL.FUNCSEL values.
const FUNCSEL_SPI: u8 = 1;
const FUNCSEL_SIO: u8 = 5;

/// User GPIOs in bank 0.
#[cfg(feature = "pico1")]
pub const GPIO_COUNT: u8 = 30;

/// User GPIOs in bank 0.
#[cfg(feature = "pico2")]
pub const GPIO_COUNT: u8 = 48;

/// `embassy-rp` SPI configuration for `format`.
///
/// Only clock rate and mode carry over; the RP SPI block is fixed to 8-bit,
/// MSB-first words in this driver.
#[must_use]
pub fn spi_config(format: &BusFormat) -> Config {
    let mut config = Config::default();
    config.frequency = format.frequency_hz();
    config.polarity = match format.mode().polarity {
        embedded_hal::spi::Polarity::IdleLow => Polarity::IdleLow,
        embedded_hal::spi::Polarity::IdleHigh => Polarity::IdleHigh,
    };
    config.phase = match format.mode().phase {
        embedded_hal::spi::Phase::CaptureOnFirstTransition => Phase::CaptureOnFirstTransition,
        embedded_hal::spi::Phase::CaptureOnSecondTransition => Phase::CaptureOnSecondTransition,
    };
    config
}

/// Transmit-only blocking SPI on an RP SPI block, with direct GPIO function control.
pub struct RpSpiPort<'d, T: Instance> {
    spi: Spi<'d, T, Blocking>,
}

impl<'d, T: Instance> RpSpiPort<'d, T> {
    /// Take an SPI block and its clock and data pins, already set to the
    /// T3A33BRG format.
    #[must_use]
    pub fn new(
        spi: Peri<'d, T>,
        clock: Peri<'d, impl ClkPin<T> + 'd>,
        data: Peri<'d, impl MosiPin<T> + 'd>,
    ) -> Self {
        Self {
            spi: Spi::new_blocking_txonly(spi, clock, data, spi_config(&BusFormat::T3A33BRG)),
        }
    }
}

impl<T: Instance> ErrorType for RpSpiPort<'_, T> {
    type Error = spi::Error;
}

impl<T: Instance> SpiBus<u8> for RpSpiPort<'_, T> {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        SpiBus::read(&mut self.spi, words)
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        SpiBus::write(&mut self.spi, words)
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        SpiBus::transfer(&mut self.spi, read, write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        SpiBus::transfer_in_place(&mut self.spi, words)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        SpiBus::<u8>::flush(&mut self.spi)
    }
}

impl<T: Instance> SpiPort for RpSpiPort<'_, T> {
    fn apply_format(&mut self, format: &BusFormat) {
        self.spi.set_config(&spi_config(format));
    }

    fn supports_pin(&self, pin: u8) -> bool {
        pin < GPIO_COUNT
    }

    fn release_pin(&mut self, pin: u8) {
        if !self.supports_pin(pin) {
            return;
        }
        let bank = usize::from(pin / 32);
        pac::SIO.gpio_oe(bank).value_clr().write_value(1 << (pin % 32));
        pac::IO_BANK0
            .gpio(usize::from(pin))
            .ctrl()
            .write(|w| w.set_funcsel(FUNCSEL_SIO));
        // Input buffer on, output driver off. Pulls are left as they were.
        pac::PADS_BANK0.gpio(usize::from(pin)).modify(|w| {
            #[cfg(feature = "pico2")]
            w.set_iso(false);
            w.set_ie(true);
            w.set_od(false);
        });
    }

    fn route_pin(&mut self, pin: u8) {
        if !self.supports_pin(pin) {
            return;
        }
        pac::IO_BANK0
            .gpio(usize::from(pin))
            .ctrl()
            .write(|w| w.set_funcsel(FUNCSEL_SPI));
        // Same pad setup `embassy-rp` applies to SPI pins. RP2350 pads start isolated.
        pac::PADS_BANK0.gpio(usize::from(pin)).write(|w| {
            #[cfg(feature = "pico2")]
            w.set_iso(false);
            w.set_schmitt(true);
            w.set_slewfast(false);
            w.set_ie(true);
            w.set_od(false);
            w.set_pue(false);
            w.set_pde(false);
        });
    }
}

impl<'d, T: Instance, const N: usize> T3a33brg<RpSpiPort<'d, T>, Delay, N> {
    /// Create a driver for `len` LEDs on an RP SPI block, using `embassy-time` for
    /// the latch delay.
    ///
    /// The driver is unconfigured; call [`activate`](Self::activate) before
    /// [`show`](Self::show).
    #[must_use]
    pub fn new_rp(
        len: usize,
        spi: Peri<'d, T>,
        data: Peri<'d, impl MosiPin<T> + 'd>,
        clock: Peri<'d, impl ClkPin<T> + 'd>,
    ) -> Self {
        let pins = Pins {
            data: data.pin(),
            clock: clock.pin(),
        };
        Self::new(len, pins, RpSpiPort::new(spi, clock, data), Delay)
    }

    /// Move the bus to another data and clock pin of the same SPI block.
    ///
    /// The pin types guarantee both pins exist and belong to `T`; see
    /// [`reassign_pins`](Self::reassign_pins) for the routing order.
    pub fn reassign_rp_pins(
        &mut self,
        data: Peri<'d, impl MosiPin<T> + 'd>,
        clock: Peri<'d, impl ClkPin<T> + 'd>,
    ) {
        self.reassign_pins(data.pin(), clock.pin());
    }
}

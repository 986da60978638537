use embedded_hal::spi::SpiBus;

use crate::frame::BusFormat;

/// GPIO numbers of the data (MOSI) and clock (SCK) lines.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pins {
    /// Data (MOSI) GPIO number.
    pub data: u8,
    /// Clock (SCK) GPIO number.
    pub clock: u8,
}

/// An SPI peripheral together with control over its pin routing.
///
/// This is the hardware seam of the driver. Writes go through the
/// [`SpiBus`] supertrait. The extra methods cover what `embedded-hal` leaves to
/// the platform: bus format and the GPIO function of each pin.
///
/// The RP2040/RP2350 implementation is [`rp::RpSpiPort`](crate::rp::RpSpiPort)
/// (features `pico1`/`pico2`).
pub trait SpiPort: SpiBus<u8> {
    /// Configure clock rate and mode.
    fn apply_format(&mut self, format: &BusFormat);

    /// True if `pin` exists on this chip and may be passed to
    /// [`release_pin`](Self::release_pin) and [`route_pin`](Self::route_pin).
    fn supports_pin(&self, pin: u8) -> bool;

    /// Return a pin to a plain GPIO input, disconnected from the bus.
    fn release_pin(&mut self, pin: u8);

    /// Connect a pin to the SPI function of this peripheral.
    fn route_pin(&mut self, pin: u8);
}

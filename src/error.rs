//! Error and result types for the checked (`try_*`) driver paths.

use derive_more::{Display, Error, From};
use embedded_hal::spi::ErrorKind;

/// Result type alias using this crate's [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors reported by the `try_*` methods.
///
/// The unchecked methods ([`show`](crate::T3a33brg::show),
/// [`resize`](crate::T3a33brg::resize)) never surface these; they fall back to a
/// harmless default instead.
#[derive(Clone, Copy, Debug, Display, Error, From, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The SPI bus reported a write or flush failure. The rest of the frame and the
    /// latch delay were still sent.
    #[display("SPI bus error: {_0:?}")]
    #[from]
    Bus(#[error(not(source))] ErrorKind),

    /// [`activate`](crate::T3a33brg::activate) has not been called, so there are no
    /// frame markers to send.
    #[display("driver is not active")]
    NotActive,

    /// A pin number does not exist on the chip. Nothing was released or routed.
    #[display("GPIO{pin} does not exist on this chip")]
    UnsupportedPin {
        /// The rejected GPIO number.
        pin: u8,
    },

    /// More LEDs were requested than the buffer can hold. The buffer is now empty.
    #[display("requested {requested} LEDs but the buffer holds at most {capacity}")]
    CapacityExceeded {
        /// Number of LEDs asked for.
        requested: usize,
        /// Compile-time buffer capacity.
        capacity: usize,
    },
}

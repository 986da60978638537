//! Blocking SPI driver for chains of T3A33BRG (WS2801-class) RGB LED modules.
//!
//! The driver owns a per-LED color buffer and, on [`show`](T3a33brg::show), clocks one
//! complete frame onto the SPI bus followed by the latch delay:
//!
//! ```text
//! [00 00 00 00] [FF B0 G0 R0] [FF B1 G1 R1] ... [FF FF FF FF]   then 1 ms idle
//! ```
//!
//! Color setters never touch the bus. Nothing on the wire is acknowledged, so the
//! default paths (`show`, `resize`, out-of-range pixel access) degrade to harmless
//! no-ops. The `try_*` variants report what went wrong instead.
//!
//! # Example
//!
//! ```rust,no_run
//! # use embedded_hal::delay::DelayNs;
//! use t3a33brg::{Pins, SpiPort, T3a33brg, colors};
//!
//! fn example<P: SpiPort, D: DelayNs>(port: P, delay: D) {
//!     // 8 LEDs, room for up to 64. Data on GPIO19, clock on GPIO18.
//!     let mut strip: T3a33brg<P, D, 64> =
//!         T3a33brg::new(8, Pins { data: 19, clock: 18 }, port, delay);
//!     strip.activate();
//!
//!     strip.set_pixel_color(0, 255, 0, 0);
//!     strip.set_pixel_color_packed(1, 0x00_00FF);
//!     strip.set_pixel(2, colors::ORANGE);
//!     strip.show();
//! }
//! ```
//!
//! # Glossary
//!
//! - **Frame:** start marker, one 4-byte group per LED, end marker.
//! - **Wire order:** per-LED bytes go out as parameter (`0xFF`), blue, green, red.
//! - **Packed color:** a `u32` holding `0xRRGGBB`.
//! - **Latch delay:** the 1 ms the clock line idles after a frame so the chips
//!   commit the new colors.
#![cfg_attr(not(any(test, feature = "host")), no_std)]

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Logging macros must be defined before the modules that use them.
#[macro_use]
mod fmt;

pub mod color;
mod driver;
mod error;
pub mod frame;
pub mod pixel_buffer;
mod port;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub mod rp;

pub use crate::color::{RGB8, ToPacked, ToRgb8, colors};
pub use crate::driver::T3a33brg;
pub use crate::error::{Error, Result};
pub use crate::frame::{BusFormat, FrameMarkers, FrameWords};
pub use crate::pixel_buffer::PixelBuffer;
pub use crate::port::{Pins, SpiPort};

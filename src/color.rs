//! Color types and packed `0xRRGGBB` conversions.
//!
//! The driver stores [`RGB8`] values. Packed colors are plain `u32`s with red in
//! bits 16–23, green in bits 8–15 and blue in bits 0–7. Anything above bit 23 is
//! ignored when unpacking.

/// Predefined RGB color constants from the `smart_leds` crate.
///
/// Common colors include `RED`, `GREEN`, `BLUE`, `YELLOW`, `WHITE`, `BLACK`, `CYAN`, `MAGENTA`, `ORANGE`, `PURPLE`.
#[doc(inline)]
pub use smart_leds::colors;

/// RGB color type stored per LED.
#[doc(inline)]
pub use smart_leds::RGB8;

/// Bits of a packed color that carry channel data.
pub const PACKED_MASK: u32 = 0x00FF_FFFF;

/// Convert colors to a packed `0xRRGGBB` value.
///
/// # Example
///
/// ```rust
/// use t3a33brg::{RGB8, ToPacked};
///
/// assert_eq!(RGB8::new(0x12, 0x34, 0x56).to_packed(), 0x12_3456);
/// assert_eq!(0xAB12_3456_u32.to_packed(), 0x12_3456);
/// ```
pub trait ToPacked {
    /// Convert this color to `0xRRGGBB`.
    #[must_use]
    fn to_packed(self) -> u32;
}

impl ToPacked for RGB8 {
    #[inline]
    fn to_packed(self) -> u32 {
        u32::from_be_bytes([0, self.r, self.g, self.b])
    }
}

impl ToPacked for u32 {
    #[inline]
    fn to_packed(self) -> u32 {
        self & PACKED_MASK
    }
}

/// Convert colors to [`RGB8`].
///
/// # Example
///
/// ```rust
/// use t3a33brg::{RGB8, ToRgb8};
///
/// assert_eq!(0x0010_2030_u32.to_rgb8(), RGB8::new(0x10, 0x20, 0x30));
/// assert_eq!((1_u8, 2_u8, 3_u8).to_rgb8(), RGB8::new(1, 2, 3));
/// ```
pub trait ToRgb8 {
    /// Convert this color to [`RGB8`].
    #[must_use]
    fn to_rgb8(self) -> RGB8;
}

impl ToRgb8 for RGB8 {
    #[inline]
    fn to_rgb8(self) -> RGB8 {
        self
    }
}

impl ToRgb8 for u32 {
    #[inline]
    fn to_rgb8(self) -> RGB8 {
        let [_, red, green, blue] = self.to_be_bytes();
        RGB8::new(red, green, blue)
    }
}

impl ToRgb8 for (u8, u8, u8) {
    #[inline]
    fn to_rgb8(self) -> RGB8 {
        RGB8::new(self.0, self.1, self.2)
    }
}

//! Crate-internal logging macros.
//!
//! Forwards to `defmt` when the `defmt` feature is on, otherwise to `log` when the
//! `log` feature is on. With neither, the arguments are still evaluated by reference
//! so call sites compile the same way.
#![allow(unused_macros, reason = "not every level is used in every build")]

macro_rules! __log {
    ($level:ident, $s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::$level!($s $(, $x)*);
            #[cfg(all(feature = "log", not(feature = "defmt")))]
            ::log::$level!($s $(, $x)*);
            $(
                #[cfg(not(any(feature = "defmt", feature = "log")))]
                let _ = &$x;
            )*
        }
    };
}

macro_rules! trace {
    ($($arg:tt)*) => { __log!(trace, $($arg)*) };
}

macro_rules! debug {
    ($($arg:tt)*) => { __log!(debug, $($arg)*) };
}

macro_rules! info {
    ($($arg:tt)*) => { __log!(info, $($arg)*) };
}

macro_rules! warn {
    ($($arg:tt)*) => { __log!(warn, $($arg)*) };
}

macro_rules! error {
    ($($arg:tt)*) => { __log!(error, $($arg)*) };
}

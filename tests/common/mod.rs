#![allow(missing_docs)]
#![allow(dead_code, reason = "each test crate uses a different subset")]
//! Recording SPI port and delay shared by the host tests.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::{ErrorKind, ErrorType, SpiBus};
use t3a33brg::{BusFormat, Pins, SpiPort, T3a33brg};

/// Everything the driver asked of the hardware, in order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Format(BusFormat),
    Release(u8),
    Route(u8),
    Write(Vec<u8>),
    Flush,
    DelayNs(u64),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

/// GPIOs on the recorded chip, as on an RP2040.
pub const GPIO_COUNT: u8 = 30;

pub struct RecordingPort {
    log: Log,
    failing_write: Option<usize>,
    writes: usize,
}

impl RecordingPort {
    pub fn new(log: &Log) -> Self {
        Self {
            log: Rc::clone(log),
            failing_write: None,
            writes: 0,
        }
    }

    /// Fail the write with this zero-based index (the bytes are still recorded).
    pub fn failing_on_write(log: &Log, write_index: usize) -> Self {
        Self {
            failing_write: Some(write_index),
            ..Self::new(log)
        }
    }
}

impl ErrorType for RecordingPort {
    type Error = ErrorKind;
}

impl SpiBus<u8> for RecordingPort {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Write(words.to_vec()));
        let index = self.writes;
        self.writes += 1;
        if self.failing_write == Some(index) {
            Err(ErrorKind::Overrun)
        } else {
            Ok(())
        }
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        read.fill(0);
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let copy = words.to_vec();
        words.fill(0);
        self.write(&copy)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

impl SpiPort for RecordingPort {
    fn apply_format(&mut self, format: &BusFormat) {
        self.log.borrow_mut().push(Event::Format(*format));
    }

    fn supports_pin(&self, pin: u8) -> bool {
        pin < GPIO_COUNT
    }

    fn release_pin(&mut self, pin: u8) {
        assert!(self.supports_pin(pin), "released missing GPIO{pin}");
        self.log.borrow_mut().push(Event::Release(pin));
    }

    fn route_pin(&mut self, pin: u8) {
        assert!(self.supports_pin(pin), "routed missing GPIO{pin}");
        self.log.borrow_mut().push(Event::Route(pin));
    }
}

pub struct RecordingDelay {
    log: Log,
}

impl RecordingDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: Rc::clone(log) }
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayNs(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        self.log
            .borrow_mut()
            .push(Event::DelayNs(u64::from(us) * 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log
            .borrow_mut()
            .push(Event::DelayNs(u64::from(ms) * 1_000_000));
    }
}

pub type TestStrip<const N: usize> = T3a33brg<RecordingPort, RecordingDelay, N>;

pub const PINS: Pins = Pins { data: 19, clock: 18 };

/// A driver over a fresh log, not yet activated.
pub fn strip<const N: usize>(len: usize) -> (TestStrip<N>, Log) {
    let log = Log::default();
    let strip = T3a33brg::new(
        len,
        PINS,
        RecordingPort::new(&log),
        RecordingDelay::new(&log),
    );
    (strip, log)
}

/// A driver over a fresh log, activated, with the setup events dropped from the log.
pub fn active_strip<const N: usize>(len: usize) -> (TestStrip<N>, Log) {
    let (mut strip, log) = strip(len);
    strip.activate();
    log.borrow_mut().clear();
    (strip, log)
}

/// Concatenated bytes of every write in `events`.
pub fn wire_bytes(events: &[Event]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Write(bytes) => Some(bytes.as_slice()),
            _ => None,
        })
        .flatten()
        .copied()
        .collect()
}

/// Take and return everything logged so far.
pub fn drain(log: &Log) -> Vec<Event> {
    log.borrow_mut().drain(..).collect()
}

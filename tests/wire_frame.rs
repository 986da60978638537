#![allow(missing_docs)]
//! Host-level tests for the bytes `show` puts on the bus.

mod common;

use common::{Event, RecordingDelay, RecordingPort, active_strip, drain, strip, wire_bytes};
use embedded_hal::spi::ErrorKind;
use smart_leds::RGB8;
use t3a33brg::frame::{END_MARKER, START_MARKER, frame_len};
use t3a33brg::{Error, FrameMarkers, Pins, T3a33brg};

const LATCH: Event = Event::DelayNs(1_000_000);

#[test]
fn three_leds_go_out_as_parameter_blue_green_red() {
    let (mut strip, log) = active_strip::<8>(3);
    strip.set_pixel_color(0, 1, 2, 3);
    strip.set_pixel_color(1, 4, 5, 6);
    strip.set_pixel_color(2, 7, 8, 9);

    strip.show();

    let events = drain(&log);
    assert_eq!(
        wire_bytes(&events),
        [
            0x00, 0x00, 0x00, 0x00, //
            0xFF, 0x03, 0x02, 0x01, //
            0xFF, 0x06, 0x05, 0x04, //
            0xFF, 0x09, 0x08, 0x07, //
            0xFF, 0xFF, 0xFF, 0xFF,
        ]
    );
    assert_eq!(events.last(), Some(&LATCH));
}

#[test]
fn empty_strip_sends_only_markers() {
    let (mut strip, log) = active_strip::<8>(0);

    strip.show();

    let events = drain(&log);
    assert_eq!(wire_bytes(&events), [0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(events.last(), Some(&LATCH));
}

#[test]
fn latch_delay_follows_every_write() {
    let (mut strip, log) = active_strip::<8>(2);

    strip.show();

    let events = drain(&log);
    let latch_position = events
        .iter()
        .position(|event| *event == LATCH)
        .expect("latch delay requested");
    assert_eq!(latch_position, events.len() - 1);
    assert!(
        events
            .iter()
            .take(latch_position)
            .all(|event| matches!(event, Event::Write(_) | Event::Flush))
    );
    assert_eq!(
        events.iter().filter(|event| **event == LATCH).count(),
        1,
        "exactly one latch delay per frame"
    );
}

#[test]
fn repeated_show_is_idempotent() {
    let (mut strip, log) = active_strip::<8>(4);
    strip.set_pixel_color_packed(0, 0x11_2233);
    strip.set_pixel_color_packed(3, 0xAA_BBCC);

    strip.show();
    let first = drain(&log);
    strip.show();
    let second = drain(&log);

    assert_eq!(first, second);
    assert_eq!(wire_bytes(&first).len(), frame_len(4));
}

#[test]
fn frame_length_is_eight_plus_four_per_led() {
    for len in [0, 1, 5, 16] {
        let (mut strip, log) = active_strip::<16>(len);
        strip.show();
        assert_eq!(wire_bytes(&drain(&log)).len(), 8 + 4 * len);
        assert_eq!(frame_len(len), 8 + 4 * len);
    }
}

#[test]
fn setters_do_not_touch_the_bus() {
    let (mut strip, log) = active_strip::<8>(4);

    strip.set_pixel_color(0, 1, 2, 3);
    strip.set_pixel_color_packed(1, 0x04_0506);
    strip.set_pixel(2, RGB8::new(7, 8, 9));
    strip.clear();
    strip.resize(6);

    assert!(drain(&log).is_empty());
}

#[test]
fn show_before_activate_sends_nothing() {
    let (mut strip, log) = strip::<8>(3);
    drain(&log);

    strip.show();

    assert!(drain(&log).is_empty());
    assert!(!strip.is_active());
}

#[test]
fn try_show_before_activate_is_not_active() {
    let (mut strip, log) = strip::<8>(3);
    drain(&log);

    assert_eq!(strip.try_show(), Err(Error::NotActive));
    assert!(drain(&log).is_empty());
}

#[test]
fn bus_error_does_not_cut_the_frame_short() {
    let log = common::Log::default();
    // Write 1 is the first LED group.
    let mut strip: T3a33brg<_, _, 4> = T3a33brg::new(
        2,
        Pins { data: 3, clock: 2 },
        RecordingPort::failing_on_write(&log, 1),
        RecordingDelay::new(&log),
    );
    strip.activate();
    strip.set_pixel_color(0, 0x10, 0x20, 0x30);
    drain(&log);

    assert_eq!(strip.try_show(), Err(Error::Bus(ErrorKind::Overrun)));

    let events = drain(&log);
    assert_eq!(
        wire_bytes(&events),
        [0, 0, 0, 0, 0xFF, 0x30, 0x20, 0x10, 0xFF, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]
    );
    assert_eq!(events.last(), Some(&LATCH));
}

#[test]
fn show_ignores_bus_errors() {
    let log = common::Log::default();
    let mut strip: T3a33brg<_, _, 4> = T3a33brg::new(
        1,
        Pins { data: 3, clock: 2 },
        RecordingPort::failing_on_write(&log, 0),
        RecordingDelay::new(&log),
    );
    strip.activate();
    drain(&log);

    strip.show();

    let events = drain(&log);
    assert_eq!(wire_bytes(&events).len(), frame_len(1));
    assert_eq!(events.last(), Some(&LATCH));
}

#[test]
fn frame_words_match_what_show_sends() {
    let (mut strip, log) = active_strip::<8>(3);
    strip.set_pixel_color(1, 0xDE, 0xAD, 0xBE);

    let words = strip.frame().expect("active driver has a frame");
    assert_eq!(words.len(), 5);
    let expected: Vec<u8> = words.clone().flatten().collect();
    // Walking the frame again gives the same groups.
    assert_eq!(words.flatten().collect::<Vec<u8>>(), expected);

    strip.show();
    assert_eq!(wire_bytes(&drain(&log)), expected);
}

#[test]
fn frame_is_none_before_activate() {
    let (strip, _log) = strip::<8>(3);
    assert!(strip.frame().is_none());
}

#[test]
fn markers_are_all_zero_then_all_one() {
    let pixels = [RGB8::new(1, 2, 3)];
    let mut words = FrameMarkers::T3A33BRG.words(&pixels);

    assert_eq!(words.next(), Some(START_MARKER));
    assert_eq!(words.next(), Some([0xFF, 3, 2, 1]));
    assert_eq!(words.next(), Some(END_MARKER));
    assert_eq!(words.next(), None);
    assert_eq!(START_MARKER, [0x00; 4]);
    assert_eq!(END_MARKER, [0xFF; 4]);
}

#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use embassy_executor::Spawner;
use embassy_time::Timer;
use t3a33brg::{RGB8, T3a33brg, colors};
use {defmt::info, defmt_rtt as _, panic_probe as _};

const LEN: usize = 8;

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    // 8 modules on SPI0: data on GPIO19, clock on GPIO18.
    let mut strip: T3a33brg<_, _, LEN> = T3a33brg::new_rp(LEN, p.SPI0, p.PIN_19, p.PIN_18);
    strip.activate();

    // One blue dot walks down a dim white strip.
    let background = RGB8::new(16, 16, 16);
    for pixel_index in (0..strip.len()).cycle() {
        for other_index in 0..strip.len() {
            strip.set_pixel(other_index, background);
        }
        strip.set_pixel(pixel_index, colors::BLUE);
        strip.show();
        info!("dot at {}", pixel_index);
        Timer::after_millis(150).await;
    }

    panic!("strip has no LEDs");
}

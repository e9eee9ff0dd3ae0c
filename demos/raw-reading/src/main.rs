//! Raw reading example
//!
//! Polls the undebounced PIR output on the Raspberry Pi Pico 2 and logs
//! whether something warm is in view.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes |
//! |-----------|------------|-------|
//! | I2C0 SDA  | GP4        |       |
//! | I2C0 SCL  | GP5        |       |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use pir_driver::PirSensor;

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// The PIR element needs this long after power-up before readings settle.
const STABILISE_SECONDS: u32 = 30;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());
    let mut pir = PirSensor::new(i2c);

    match pir.begin().await {
        Ok(true) => {}
        Ok(false) => defmt::panic!("Qwiic PIR not found, check the connection"),
        Err(e) => defmt::panic!("I2C failure during begin: {}", e),
    }

    info!("Waiting {} seconds for the PIR to stabilise", STABILISE_SECONDS);
    for i in 0..STABILISE_SECONDS {
        info!("{}", i);
        Timer::after(Duration::from_secs(1)).await;
    }
    info!("Device stable");

    loop {
        match pir.raw_reading().await {
            Ok(true) => info!("Object detected"),
            Ok(false) => info!("Object removed"),
            Err(e) => error!("Read failed: {}", e),
        }
        Timer::after(Duration::from_millis(750)).await;
    }
}

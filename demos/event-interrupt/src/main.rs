//! Debounced event example
//!
//! Sleeps until the PIR board pulls its INT pin low, then services the
//! latched detect/remove event and clears it so the next one can fire.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                        |
//! |-----------|------------|------------------------------|
//! | I2C0 SDA  | GP4        |                              |
//! | I2C0 SCL  | GP5        |                              |
//! | PIR INT   | GP6        | Active-low, pull-up enabled  |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use pir_driver::{PirConfig, PirSensor};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());
    let mut int_pin = Input::new(p.PIN_6, Pull::Up);
    let mut pir = PirSensor::new(i2c);

    if !pir.begin().await.unwrap_or(false) {
        defmt::panic!("Qwiic PIR not found, check the connection");
    }

    info!("Waiting 30 seconds for the PIR to stabilise");
    Timer::after(Duration::from_secs(30)).await;

    pir.apply_config(&PirConfig::default())
        .await
        .expect("Failed to configure PIR");

    // Start from a clean slate so INT is released.
    if let Err(e) = pir.clear_event_bits().await {
        error!("Failed to clear event bits: {}", e);
    }

    info!("Device stable, waiting for motion");

    loop {
        int_pin.wait_for_low().await;

        match pir.event_status().await {
            Ok(status) if status.event_available => {
                if status.object_detected {
                    info!("Object detected");
                }
                if status.object_removed {
                    info!("Object removed");
                }
            }
            Ok(_) => {}
            Err(e) => error!("Status read failed: {}", e),
        }

        // Clear the latched bits so INT goes back HIGH and the next
        // event produces a fresh falling edge.
        if let Err(e) = pir.clear_event_bits().await {
            error!("Failed to clear event bits: {}", e);
        }
    }
}

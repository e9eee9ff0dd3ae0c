//! Address change example
//!
//! Moves a PIR board from its factory address to [`NEW_ADDRESS`] and checks
//! it answers there. Power-cycling does not restore the old address; run
//! again with the addresses swapped to move it back.
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
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use pir_driver::{PirSensor, DEFAULT_ADDRESS};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

const NEW_ADDRESS: u8 = 0x5B;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());
    let mut pir = PirSensor::new_with_address(i2c, DEFAULT_ADDRESS);

    if !pir.begin().await.unwrap_or(false) {
        defmt::panic!("Qwiic PIR not found at {=u8:#x}", DEFAULT_ADDRESS);
    }

    info!("Moving PIR {=u8:#x} -> {=u8:#x}", pir.address(), NEW_ADDRESS);

    match pir.set_address(NEW_ADDRESS, &mut Delay).await {
        Ok(()) => info!("Address changed"),
        Err(e) => defmt::panic!("Address change failed: {}", e),
    }

    match pir.begin().await {
        Ok(true) => info!("PIR acknowledged on {=u8:#x}", pir.address()),
        Ok(false) => error!("PIR did not validate on its new address"),
        Err(e) => error!("I2C failure: {}", e),
    }

    loop {
        cortex_m::asm::wfi();
    }
}

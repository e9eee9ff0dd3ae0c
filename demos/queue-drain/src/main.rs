//! Event queue example
//!
//! Periodically reports how long ago the first and last queued detect and
//! remove events happened, then drains both queues.
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

use pir_driver::{PirError, PirSensor, Queue};

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
    let mut pir = PirSensor::new(i2c);

    if !pir.begin().await.unwrap_or(false) {
        defmt::panic!("Qwiic PIR not found, check the connection");
    }

    info!("Waiting 30 seconds for the PIR to stabilise");
    Timer::after(Duration::from_secs(30)).await;
    info!("Device stable");

    loop {
        for queue in [Queue::Detected, Queue::Removed] {
            if let Err(e) = report(&mut pir, queue).await {
                error!("{} queue: {}", queue, e);
            }
        }
        Timer::after(Duration::from_secs(5)).await;
    }
}

async fn report<I: embedded_hal_async::i2c::I2c>(
    pir: &mut PirSensor<I>,
    queue: Queue,
) -> Result<(), PirError<I::Error>>
where
    I::Error: defmt::Format,
{
    if pir.is_queue_empty(queue).await? {
        info!("{} queue is empty", queue);
        return Ok(());
    }

    let last = pir.time_since_last_event(queue).await?;
    let first = pir.time_since_first_event(queue).await?;
    info!("{}: {} ms since last event, {} ms since first", queue, last, first);

    let mut ages = [0u32; 16];
    let count = pir.drain_queue(queue, &mut ages).await?;
    for age in &ages[..count] {
        info!("  popped {}: {} ms ago", queue, age);
    }
    Ok(())
}

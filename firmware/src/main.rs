#![no_std]
#![no_main]

use static_cell::StaticCell;

use embassy_executor::Spawner;
use embassy_time::Delay;

use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{rng::Rng, timer::timg::TimerGroup};
use esp_mbedtls::Tls;
use esp_println::logger::init_logger;

use iot_telemetry::{inbound::LogHandler, Station};

extern crate alloc;

mod adc;
mod clock;
pub mod config;
pub mod constants;
pub mod cstr;
mod mqtt;
pub mod transport;
mod wifi;

use adc::LightSensor;
use clock::BootClock;
use config::CONFIG;
use constants::*;
use mqtt::AwsIot;
use wifi::Wifi;

esp_bootloader_esp_idf::esp_app_desc!();

type Node = Station<LightSensor, BootClock, Delay, LogHandler>;

static TLS: StaticCell<Tls<'static>> = StaticCell::new();
static BROKER: StaticCell<AwsIot> = StaticCell::new();

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    init_logger(log::LevelFilter::Info);

    let peripherals = esp_hal::init(esp_hal::Config::default());

    let rng = Rng::new(peripherals.RNG);

    esp_alloc::heap_allocator!(size: HEAP_SIZE);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let timg1 = TimerGroup::new(peripherals.TIMG1);

    esp_hal_embassy::init(timg0.timer0);

    if let Err(e) = CONFIG.validate() {
        panic!("Invalid cfg.toml: {:?}", e);
    }

    let wifi = Wifi::new(
        peripherals.WIFI,
        timg1.timer0,
        peripherals.RADIO_CLK,
        rng.clone(),
        spawner,
    )
    .await
    .unwrap();

    let mut tls = Tls::new(peripherals.SHA)
        .unwrap()
        .with_hardware_rsa(peripherals.RSA);

    tls.set_debug(0);

    let tls = TLS.init(tls);
    let broker = BROKER.init_with(|| AwsIot::new(wifi.stack(), tls));

    let sensor = LightSensor::new(peripherals.ADC1, peripherals.GPIO36);
    let station = Station::new(CONFIG, sensor, BootClock, Delay, LogHandler);

    spawner.spawn(main_task(wifi, broker, station)).ok();
}

#[embassy_executor::task]
async fn main_task(mut wifi: Wifi, broker: &'static mut AwsIot, mut station: Node) {
    station.run(&mut wifi, broker).await
}

use core::net::Ipv4Addr;
use core::str::FromStr;

use embassy_executor::Spawner;
use embassy_net::{Runner, Stack, StackResources};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{with_timeout, Duration, Timer};

use esp_hal::{
    peripherals::{RADIO_CLK, WIFI},
    rng::Rng,
};
use esp_wifi::{
    wifi::{ClientConfiguration, Configuration, WifiController, WifiDevice, WifiEvent, WifiState},
    EspWifiController, EspWifiTimerSource,
};

use heapless::String;
use log::info;
use static_cell::StaticCell;

use iot_telemetry::Network;

use crate::config::CONFIG;
use crate::constants::{WIFI_CONNECT_TIMEOUT_SECS, WIFI_RECONNECT_DELAY_MS};

static CONTROLLER: StaticCell<EspWifiController<'static>> = StaticCell::new();
static RESOURCES: StaticCell<StackResources<5>> = StaticCell::new();

// Raised by `Network::begin`, the connection task idles until then.
static START: Signal<CriticalSectionRawMutex, ()> = Signal::new();

pub struct Wifi {
    stack: Stack<'static>,
}

#[derive(Debug)]
pub enum Error {
    WifiInitFailed,
    HostnameTooLong,
    TaskSpawnFailed,
}

impl Wifi {
    pub async fn new(
        wifi: WIFI<'static>,
        timer: impl EspWifiTimerSource + 'static,
        radio_clk: RADIO_CLK<'static>,
        mut rng: Rng,
        spawner: Spawner,
    ) -> Result<Self, Error> {
        let init = esp_wifi::init(timer, rng.clone(), radio_clk).map_err(|_| Error::WifiInitFailed)?;
        let init = CONTROLLER.init(init);

        let (controller, interfaces) =
            esp_wifi::wifi::new(init, wifi).map_err(|_| Error::WifiInitFailed)?;

        let mut dhcp_config = embassy_net::DhcpConfig::default();
        dhcp_config.hostname =
            Some(String::<32>::from_str(CONFIG.client_id).map_err(|_| Error::HostnameTooLong)?);

        let seed = (rng.random() as u64) << 32 | rng.random() as u64;
        let config = embassy_net::Config::dhcpv4(dhcp_config);

        let resources = RESOURCES.init(StackResources::new());
        let (stack, runner) = embassy_net::new(interfaces.sta, config, resources, seed);

        spawner
            .spawn(connection(controller))
            .map_err(|_| Error::TaskSpawnFailed)?;
        spawner
            .spawn(net_task(runner))
            .map_err(|_| Error::TaskSpawnFailed)?;

        Ok(Self { stack })
    }

    pub fn stack(&self) -> Stack<'static> {
        self.stack
    }
}

impl Network for Wifi {
    type Error = Error;

    async fn begin(&mut self) -> Result<(), Self::Error> {
        START.signal(());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stack.is_link_up() && self.stack.config_v4().is_some()
    }

    fn local_ip(&self) -> Option<Ipv4Addr> {
        self.stack.config_v4().map(|config| config.address.address())
    }
}

#[embassy_executor::task]
async fn connection(mut controller: WifiController<'static>) {
    START.wait().await;
    info!(
        "Start connection task, device capabilities: {:?}",
        controller.capabilities()
    );
    loop {
        if esp_wifi::wifi::wifi_state() == WifiState::StaConnected {
            // wait until we're no longer connected
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            Timer::after(Duration::from_millis(WIFI_RECONNECT_DELAY_MS)).await
        }

        if !matches!(controller.is_started(), Ok(true)) {
            info!("Connecting to wifi with SSID: {:?}", CONFIG.ssid);
            let client_config = Configuration::Client(ClientConfiguration {
                ssid: CONFIG.ssid.into(),
                password: CONFIG.password.into(),
                ..Default::default()
            });
            if let Err(e) = controller.set_configuration(&client_config) {
                log::error!("Failed to set WiFi config: {:?}. Retrying...", e);
                Timer::after(Duration::from_millis(WIFI_RECONNECT_DELAY_MS)).await;
                continue;
            }
            info!("Starting wifi");
            if let Err(e) = controller.start_async().await {
                log::error!("Failed to start WiFi: {:?}. Retrying...", e);
                Timer::after(Duration::from_millis(WIFI_RECONNECT_DELAY_MS)).await;
                continue;
            }
            info!("Wifi started!");
        }

        info!("About to connect to {:?}...", CONFIG.ssid);
        match with_timeout(
            Duration::from_secs(WIFI_CONNECT_TIMEOUT_SECS),
            controller.connect_async(),
        )
        .await
        {
            Ok(Ok(_)) => info!("Wifi connected!"),
            Ok(Err(e)) => {
                info!("Failed to connect to wifi: {e:?}");
                Timer::after(Duration::from_millis(WIFI_RECONNECT_DELAY_MS)).await
            }
            Err(_) => {
                info!("Wifi connection timed out");
                Timer::after(Duration::from_millis(WIFI_RECONNECT_DELAY_MS)).await
            }
        }
    }
}

#[embassy_executor::task]
async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}

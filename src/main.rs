//! table-kiosk firmware entry point (nRF52840).
//!
//! One cooperative loop samples the four buttons every `TICK_MS`, runs the
//! controller and redraws the OLED. Finished orders are queued to a
//! separate transport task that writes them to the UART.

#![no_std]
#![no_main]

use defmt::{debug, info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::{bind_interrupts, peripherals, twim, uarte};
use embassy_time::{Duration, Instant, Ticker};
use static_cell::StaticCell;
use table_kiosk::config::{KioskConfig, TICK_MS};
use table_kiosk::controller::Controller;
use table_kiosk::transport::uart::{self, ChannelSink, OrderChannel};
use table_kiosk::ui::buttons::ButtonPins;
use table_kiosk::ui::display::OledRenderer;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    UARTE0_UART0 => uarte::InterruptHandler<peripherals::UARTE0>;
});

static ORDERS: OrderChannel = OrderChannel::new();
static CONTROLLER: StaticCell<Controller> = StaticCell::new();

#[embassy_executor::task]
async fn transport_task(port: uarte::Uarte<'static, peripherals::UARTE0>) -> ! {
    uart::run(port, ORDERS.receiver()).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("table-kiosk starting");

    // Catalog and thresholds are checked before anything is drawn.
    let controller = CONTROLLER.init(unwrap!(Controller::new(KioskConfig::standard())));

    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut renderer = unwrap!(OledRenderer::new(i2c));

    let mut uart_config = uarte::Config::default();
    uart_config.baudrate = uarte::Baudrate::BAUD115200;
    let port = uarte::Uarte::new(p.UARTE0, Irqs, p.P0_08, p.P0_06, uart_config);
    unwrap!(spawner.spawn(transport_task(port)));

    let buttons = ButtonPins::new(
        p.P0_11.degrade(),
        p.P0_12.degrade(),
        p.P0_24.degrade(),
        p.P0_25.degrade(),
    );
    let mut sink = ChannelSink::new(ORDERS.sender());

    unwrap!(controller.start(&mut renderer));
    info!("Welcome screen displayed");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    loop {
        let now_ms = Instant::now().as_millis();
        let report = controller.tick(now_ms, buttons.sample(), &mut renderer, &mut sink);
        for event in &report.events {
            info!("Button: {}", event);
        }
        if report.orders_sent > 0 {
            info!("Orders queued: {}", report.orders_sent);
        }
        if report.rendered {
            debug!("Screen: {}", controller.kiosk().state());
        }
        if let Some(e) = report.render_error {
            warn!("Display update failed: {}", e);
        }
        ticker.next().await;
    }
}

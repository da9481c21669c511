//! UART order transport.
//!
//! The main loop pushes payloads into [`OrderChannel`] without waiting;
//! [`run`] drains it on its own task and writes each order to the serial
//! bridge as an HTTP request.

use super::{write_http_request, OrderSink};
use crate::config::ORDER_PAYLOAD_CAPACITY;
use crate::error::Error;
use crate::order::OrderPayload;
use defmt::{info, warn};
use embassy_nrf::peripherals;
use embassy_nrf::uarte::Uarte;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

/// Orders that may wait for the UART at once.
pub const ORDER_QUEUE_DEPTH: usize = 2;

/// Payload plus request line and headers.
const FRAME_CAPACITY: usize = ORDER_PAYLOAD_CAPACITY + 128;

pub type OrderChannel = Channel<CriticalSectionRawMutex, OrderPayload, ORDER_QUEUE_DEPTH>;

/// [`OrderSink`] that queues payloads for [`run`].
pub struct ChannelSink {
    tx: Sender<'static, CriticalSectionRawMutex, OrderPayload, ORDER_QUEUE_DEPTH>,
}

impl ChannelSink {
    pub fn new(tx: Sender<'static, CriticalSectionRawMutex, OrderPayload, ORDER_QUEUE_DEPTH>) -> Self {
        Self { tx }
    }
}

impl OrderSink for ChannelSink {
    fn submit(&mut self, payload: &OrderPayload) -> Result<(), Error> {
        self.tx.try_send(payload.clone()).map_err(|_| {
            warn!("Order queue full, dropping order");
            Error::Transport
        })
    }
}

/// Write every queued order to `uart`.
pub async fn run(
    mut uart: Uarte<'static, peripherals::UARTE0>,
    rx: Receiver<'static, CriticalSectionRawMutex, OrderPayload, ORDER_QUEUE_DEPTH>,
) -> ! {
    let mut frame: heapless::String<FRAME_CAPACITY> = heapless::String::new();

    loop {
        let payload = rx.receive().await;
        frame.clear();
        if let Err(e) = write_http_request(&mut frame, &payload) {
            warn!("Order framing failed: {}", e);
            continue;
        }

        match uart.write(frame.as_bytes()).await {
            Ok(()) => info!("Order posted: {}", payload.as_str()),
            Err(e) => warn!("UART write failed: {}", e),
        }
    }
}

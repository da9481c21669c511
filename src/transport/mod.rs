//! Order transport - hands finished orders to the outside world.
//!
//! The core only produces a serialized payload; an [`OrderSink`] decides
//! how it leaves the device. On target the payload is framed as an
//! HTTP/1.1 `POST` and written to a UART by a separate task, so the input
//! loop never waits on the serial line.

#[cfg(feature = "embedded")]
pub mod uart;

use crate::config::ORDER_ENDPOINT;
use crate::error::Error;
use crate::order::OrderPayload;
use core::fmt::Write;

/// Receiver of finalized orders.
pub trait OrderSink {
    /// Accept `payload` for delivery. Delivery itself (and any retry)
    /// is the sink's concern.
    fn submit(&mut self, payload: &OrderPayload) -> Result<(), Error>;
}

/// Write the HTTP request carrying `payload` into `out`.
pub fn write_http_request<W: Write>(out: &mut W, payload: &str) -> Result<(), Error> {
    write!(
        out,
        "POST {ORDER_ENDPOINT} HTTP/1.1\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         \r\n\
         {payload}\r\n",
        payload.len()
    )
    .map_err(|_| Error::Transport)
}

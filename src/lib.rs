//! Library interface for table-kiosk.
//!
//! Everything that decides *what* the kiosk does lives here and runs on
//! the host: button debouncing and gesture classification, the cart,
//! the ordering state machine and the order payload. Hardware glue
//! (GPIO sampling, the OLED, the UART transport) is only compiled with
//! the `embedded` feature and used by `main.rs`.
//!
//! Usage: `cargo test` (host), `cargo run --release --features embedded`
//! (target, via probe-rs).
//!
//! Data flow:
//! ```text
//! pin samples → Debouncer → GestureClassifier → Kiosk → {Cart, RenderRequest, OrderPayload}
//! ```

#![cfg_attr(not(test), no_std)]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod order;
pub mod transport;
pub mod ui;

pub use cart::{Cart, CartEntry};
pub use catalog::{Catalog, MenuItem, Price};
pub use config::KioskConfig;
pub use controller::{Controller, TickReport};
pub use error::Error;
pub use input::{Button, Gesture, InputEvent};
pub use order::{Order, OrderPayload};
pub use transport::OrderSink;
pub use ui::machine::Kiosk;
pub use ui::{Notification, Notice, RenderRequest, Renderer, UiState};

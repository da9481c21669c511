//! Application-wide constants and startup configuration.
//!
//! All hardware pin assignments, timing parameters, catalog contents and
//! display limits live here so they can be tuned in one place. The
//! [`KioskConfig`] built from them is validated once at boot and never
//! mutated afterwards.

use crate::catalog::{Catalog, MenuItem, Price};
use crate::error::{ConfigError, Error};

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button BACK/MENU   → P0.11
//   Button CONFIRM/ADD → P0.12
//   Button UP          → P0.24
//   Button DOWN        → P0.25
//   I²C SDA            → P0.26
//   I²C SCL            → P0.27
//   UART TX (orders)   → P0.06
//   UART RX            → P0.08

// Input timing

/// Poll period of the input loop (ms). 5 ms = 200 Hz.
pub const TICK_MS: u64 = 5;

/// A raw level change must hold this long before it becomes an edge (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Hold time after which BACK reports a long press (ms).
pub const LONG_PRESS_MS: u64 = 1000;

/// Maximum release-to-release gap for a CONFIRM double press (ms).
pub const DOUBLE_PRESS_MS: u64 = 500;

// Cart / ordering

/// Hard upper bound on cart entries (storage capacity).
pub const CART_CAPACITY: usize = 10;

/// Largest quantity selectable for a single cart entry.
pub const MAX_QUANTITY: u8 = 10;

/// Table served by this terminal.
pub const TABLE_NUMBER: u16 = 8;

/// Path the order payload is posted to by the transport.
pub const ORDER_ENDPOINT: &str = "/orders";

/// Capacity of the serialized order payload buffer (bytes).
pub const ORDER_PAYLOAD_CAPACITY: usize = 1024;

// Catalog limits

/// Maximum number of catalog entries (also bounds the wire `ItemID`).
pub const MAX_CATALOG_ITEMS: usize = 16;

/// Longest item name that fits one OLED row next to the cursor.
pub const MAX_ITEM_NAME_LEN: usize = 18;

/// Highest accepted price: 9999.99.
pub const MAX_PRICE_CENTS: u32 = 999_999;

/// Catalog shipped with the terminal. Order defines the wire `ItemID`.
pub const DEFAULT_CATALOG: [MenuItem; 5] = [
    MenuItem::new("Burger", Price::from_cents(599)),
    MenuItem::new("Pizza", Price::from_cents(1099)),
    MenuItem::new("Salad", Price::from_cents(499)),
    MenuItem::new("Pasta", Price::from_cents(899)),
    MenuItem::new("Drink", Price::from_cents(299)),
];

// Display

/// Cart rows visible at once on the 128×64 OLED.
pub const VISIBLE_CART_ROWS: usize = 4;

/// Duration of the "Added to Cart!" / "Cart Full!" overlay (ms).
pub const CART_NOTICE_MS: u64 = 1000;

/// Duration of the "Order Sent!" / "Order Failed" overlay (ms).
pub const ORDER_NOTICE_MS: u64 = 2000;

/// Gesture timing thresholds, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    pub debounce_ms: u64,
    pub long_press_ms: u64,
    pub double_press_ms: u64,
}

impl Timing {
    pub const fn standard() -> Self {
        Self {
            debounce_ms: BUTTON_DEBOUNCE_MS,
            long_press_ms: LONG_PRESS_MS,
            double_press_ms: DOUBLE_PRESS_MS,
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if self.debounce_ms == 0 || self.long_press_ms == 0 || self.double_press_ms == 0 {
            return Err(ConfigError::ZeroThreshold.into());
        }
        // A double-press window as long as the hold threshold makes the
        // pending short press outlive a long press on the same hand.
        if self.double_press_ms >= self.long_press_ms {
            return Err(ConfigError::OverlappingWindows.into());
        }
        Ok(())
    }
}

/// Everything the kiosk needs at startup.
#[derive(Clone, Copy, Debug)]
pub struct KioskConfig {
    pub table_number: u16,
    pub catalog: &'static [MenuItem],
    pub timing: Timing,
    /// Effective cart limit, at most [`CART_CAPACITY`].
    pub cart_limit: usize,
    pub visible_rows: usize,
    pub cart_notice_ms: u64,
    pub order_notice_ms: u64,
}

impl KioskConfig {
    /// The terminal's shipped configuration.
    pub const fn standard() -> Self {
        Self {
            table_number: TABLE_NUMBER,
            catalog: &DEFAULT_CATALOG,
            timing: Timing::standard(),
            cart_limit: CART_CAPACITY,
            visible_rows: VISIBLE_CART_ROWS,
            cart_notice_ms: CART_NOTICE_MS,
            order_notice_ms: ORDER_NOTICE_MS,
        }
    }

    /// Check every startup parameter and return the validated catalog.
    ///
    /// Called before the first render; any error here is fatal to boot.
    pub fn validate(&self) -> Result<Catalog, Error> {
        self.timing.validate()?;
        if self.cart_limit == 0 || self.cart_limit > CART_CAPACITY {
            return Err(ConfigError::CartLimit.into());
        }
        if self.visible_rows == 0 {
            return Err(ConfigError::VisibleRows.into());
        }
        Catalog::new(self.catalog)
    }
}

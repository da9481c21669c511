//! User interface subsystem - screens, notices and the ordering state machine.
//!
//! The [`machine::Kiosk`] reacts to classified button gestures, owns the
//! current screen and the cart, and describes what to draw through
//! [`RenderRequest`]s. Drawing itself happens behind the [`Renderer`]
//! trait.
//!
//! ## Components
//!
//! - **Machine**: transition table, cart mutations, order submission
//! - **Display**: SSD1306 128×64 OLED via I²C (`embedded` feature)
//! - **Buttons**: 4 tactile switches sampled every tick (`embedded` feature)

pub mod input_logic;
pub mod machine;

#[cfg(feature = "embedded")]
pub mod buttons;
#[cfg(feature = "embedded")]
pub mod display;

#[cfg(test)]
mod tests;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::Error;

/// Screens (views) the UI can be in. Exactly one is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiState {
    /// Boot screen - waits for BACK.
    Welcome,
    /// Catalog list with the cursor on `selected`.
    Menu { selected: usize },
    /// Picking how many of catalog item `item` to add.
    Quantity { item: usize, qty: u8 },
    /// Cart contents, first visible row at `scroll`.
    CartView { scroll: usize },
    /// "Confirm Order?" dialog.
    Confirm,
}

/// Transient messages shown over the current screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notice {
    AddedToCart,
    CartFull,
    OrderSent,
    OrderFailed,
}

impl Notice {
    pub const fn message(self) -> &'static str {
        match self {
            Notice::AddedToCart => "Added to Cart!",
            Notice::CartFull => "Cart Full!",
            Notice::OrderSent => "Order Sent!",
            Notice::OrderFailed => "Order Failed",
        }
    }
}

/// Request to show `notice` as an overlay for `duration_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Notification {
    pub notice: Notice,
    pub duration_ms: u64,
}

impl Notification {
    pub const fn message(&self) -> &'static str {
        self.notice.message()
    }
}

/// Everything a stateless renderer needs to draw one screen.
#[derive(Clone, Copy, Debug)]
pub struct RenderRequest<'a> {
    pub state: UiState,
    pub cart: &'a Cart,
    pub catalog: &'a Catalog,
    pub visible_rows: usize,
}

/// Output side of the UI, implemented by the OLED driver on target and
/// by recorders in tests.
pub trait Renderer {
    /// Draw the full screen for `request`.
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<(), Error>;

    /// Draw a transient overlay. The core decides when it ends.
    fn notify(&mut self, notification: &Notification) -> Result<(), Error>;
}

//! Ordering state machine.
//!
//! `Kiosk` is the single owner of the screen state, the cart and the
//! active overlay. It is deterministic: the same state and event always
//! give the same transition. Events that the current screen does not
//! handle are ignored.
//!
//! | Screen            | Event           | Next                | Effect                    |
//! |-------------------|-----------------|---------------------|---------------------------|
//! | Welcome           | BACK short      | Menu{0}             |                           |
//! | not Welcome/Conf. | BACK long       | CartView{0}         |                           |
//! | Menu              | BACK short      | Menu{0}             | cart cleared              |
//! | CartView, Confirm | BACK short      | Menu                |                           |
//! | Menu              | UP / DOWN       | Menu{sel ∓ 1}       | wraps                     |
//! | Menu              | CONFIRM short   | Quantity{sel, 1}    |                           |
//! | Quantity          | UP / DOWN       | Quantity{qty ± 1}   | clamped to 1..=10         |
//! | Quantity          | CONFIRM short   | Menu                | add to cart + notice      |
//! | CartView          | UP / DOWN       | CartView{scroll ∓1} | clamped                   |
//! | Menu, CartView    | CONFIRM double  | Confirm             | only with a non-empty cart|
//! | Confirm           | CONFIRM short   | Menu                | submit, cart cleared      |
//!
//! A submission the sink rejects stays in Confirm with the cart intact
//! and shows "Order Failed".

use super::input_logic::{quantity_down, quantity_up, select_next, select_prev, wrap_next, wrap_prev};
use super::{Notice, Notification, RenderRequest, UiState};
use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::config::KioskConfig;
use crate::error::Error;
use crate::input::gesture::GesturePolicy;
use crate::input::{Button, Gesture, InputEvent};
use crate::order::Order;
use crate::transport::OrderSink;

#[derive(Clone, Copy, Debug)]
struct Overlay {
    notification: Notification,
    until_ms: u64,
}

/// Effects of handling one event.
#[derive(Clone, Debug, Default)]
pub struct Outcome {
    /// The event was accepted and the screen must be redrawn.
    pub changed: bool,
    /// Overlay to show now.
    pub notification: Option<Notification>,
    /// An order was accepted by the sink.
    pub order_sent: bool,
}

pub struct Kiosk {
    config: KioskConfig,
    catalog: Catalog,
    cart: Cart,
    state: UiState,
    /// Menu cursor, kept while another screen is shown.
    cursor: usize,
    overlay: Option<Overlay>,
}

impl Kiosk {
    /// Validate `config` and start on the welcome screen with an empty cart.
    pub fn new(config: KioskConfig) -> Result<Self, Error> {
        let catalog = config.validate()?;
        Ok(Self {
            config,
            catalog,
            cart: Cart::new(config.cart_limit),
            state: UiState::Welcome,
            cursor: 0,
            overlay: None,
        })
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Overlay currently covering the screen, if any.
    pub fn overlay(&self) -> Option<Notification> {
        self.overlay.map(|o| o.notification)
    }

    pub fn render_request(&self) -> RenderRequest<'_> {
        RenderRequest {
            state: self.state,
            cart: &self.cart,
            catalog: &self.catalog,
            visible_rows: self.config.visible_rows,
        }
    }

    /// Gestures the current screen can act on.
    pub fn gesture_policy(&self) -> GesturePolicy {
        GesturePolicy {
            long_press: !matches!(self.state, UiState::Welcome | UiState::Confirm),
            double_press: matches!(self.state, UiState::Menu { .. } | UiState::CartView { .. }),
        }
    }

    /// Drop the overlay once its time is up. Returns `true` if the
    /// underlying screen has to be drawn again.
    pub fn expire_overlay(&mut self, now_ms: u64) -> bool {
        match self.overlay {
            Some(o) if now_ms >= o.until_ms => {
                self.overlay = None;
                true
            }
            _ => false,
        }
    }

    /// Apply one classified event. Orders submitted by it go to `sink`.
    pub fn handle<S: OrderSink>(&mut self, event: InputEvent, now_ms: u64, sink: &mut S) -> Outcome {
        let mut outcome = Outcome::default();
        let Some(next) = self.transition(event, sink, &mut outcome) else {
            return outcome;
        };

        self.state = next;
        if let UiState::Menu { selected } = next {
            self.cursor = selected;
        }
        // Any accepted transition replaces the overlay.
        self.overlay = outcome.notification.map(|notification| Overlay {
            notification,
            until_ms: now_ms.saturating_add(notification.duration_ms),
        });
        outcome.changed = true;
        outcome
    }

    fn transition<S: OrderSink>(
        &mut self,
        event: InputEvent,
        sink: &mut S,
        outcome: &mut Outcome,
    ) -> Option<UiState> {
        use Button::{Back, Confirm, Down, Up};
        use Gesture::{DoublePress, LongPress, ShortPress};

        let catalog_len = self.catalog.len();
        match (self.state, event.button, event.gesture) {
            (UiState::Welcome, Back, ShortPress) => Some(UiState::Menu { selected: 0 }),

            (UiState::Welcome | UiState::Confirm, Back, LongPress) => None,
            (_, Back, LongPress) => Some(UiState::CartView { scroll: 0 }),

            (UiState::Menu { .. }, Back, ShortPress) => {
                self.cart.reset();
                #[cfg(feature = "defmt")]
                defmt::info!("Order reset");
                Some(UiState::Menu { selected: 0 })
            }
            (UiState::CartView { .. }, Back, ShortPress) => Some(self.menu()),
            (UiState::Confirm, Back, ShortPress) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Order confirmation cancelled");
                Some(self.menu())
            }

            (UiState::Menu { selected }, Up, ShortPress) => Some(UiState::Menu {
                selected: wrap_prev(selected, catalog_len),
            }),
            (UiState::Menu { selected }, Down, ShortPress) => Some(UiState::Menu {
                selected: wrap_next(selected, catalog_len),
            }),
            (UiState::Menu { selected }, Confirm, ShortPress) => {
                Some(UiState::Quantity { item: selected, qty: 1 })
            }

            (UiState::Quantity { item, qty }, Up, ShortPress) => Some(UiState::Quantity {
                item,
                qty: quantity_up(qty),
            }),
            (UiState::Quantity { item, qty }, Down, ShortPress) => Some(UiState::Quantity {
                item,
                qty: quantity_down(qty),
            }),
            (UiState::Quantity { item, qty }, Confirm, ShortPress) => {
                let notice = match self.cart.add(item, qty) {
                    Ok(()) => Notice::AddedToCart,
                    Err(_) => {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("Cart full, cannot add item {}", item);
                        Notice::CartFull
                    }
                };
                outcome.notification = Some(self.notification(notice));
                Some(UiState::Menu { selected: item })
            }

            (UiState::CartView { scroll }, Up, ShortPress) => Some(UiState::CartView {
                scroll: select_prev(scroll),
            }),
            (UiState::CartView { scroll }, Down, ShortPress) => Some(UiState::CartView {
                scroll: select_next(scroll, self.cart.max_scroll(self.config.visible_rows)),
            }),

            (UiState::Menu { .. } | UiState::CartView { .. }, Confirm, DoublePress)
                if !self.cart.is_empty() =>
            {
                Some(UiState::Confirm)
            }

            (UiState::Confirm, Confirm, ShortPress) => match self.submit(sink) {
                Ok(()) => {
                    outcome.order_sent = true;
                    outcome.notification = Some(self.notification(Notice::OrderSent));
                    Some(self.menu())
                }
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Order not sent: {}", _e);
                    outcome.notification = Some(self.notification(Notice::OrderFailed));
                    Some(UiState::Confirm)
                }
            },

            _ => None,
        }
    }

    /// Menu at the remembered cursor.
    fn menu(&self) -> UiState {
        UiState::Menu {
            selected: self.cursor,
        }
    }

    fn notification(&self, notice: Notice) -> Notification {
        let duration_ms = match notice {
            Notice::AddedToCart | Notice::CartFull => self.config.cart_notice_ms,
            Notice::OrderSent | Notice::OrderFailed => self.config.order_notice_ms,
        };
        Notification {
            notice,
            duration_ms,
        }
    }

    /// Snapshot the cart into a payload and hand it to `sink`.
    ///
    /// The cart is only cleared once the sink has accepted the payload.
    fn submit<S: OrderSink>(&mut self, sink: &mut S) -> Result<(), Error> {
        let order = Order::from_cart(self.config.table_number, &self.catalog, &self.cart);
        let payload = order.serialize()?;
        sink.submit(&payload)?;
        #[cfg(feature = "defmt")]
        defmt::info!(
            "Order for table {}: {} line(s)",
            order.table(),
            order.lines().len()
        );
        self.cart.reset();
        Ok(())
    }
}

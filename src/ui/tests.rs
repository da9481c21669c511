//! Unit tests for the ordering state machine.
//!
//! These tests run on the host (not embedded) and walk the transition
//! table with synthetic gestures.

use super::machine::{Kiosk, Outcome};
use super::{Notice, UiState};
use crate::config::{KioskConfig, CART_CAPACITY, CART_NOTICE_MS, MAX_QUANTITY, ORDER_NOTICE_MS};
use crate::error::Error;
use crate::input::{Button, Gesture, InputEvent};
use crate::order::OrderPayload;
use crate::transport::OrderSink;

/// Records accepted payloads, or rejects every one.
#[derive(Default)]
struct Outbox {
    orders: Vec<String>,
    reject: bool,
}

impl OrderSink for Outbox {
    fn submit(&mut self, payload: &OrderPayload) -> Result<(), Error> {
        if self.reject {
            return Err(Error::Transport);
        }
        self.orders.push(payload.as_str().to_owned());
        Ok(())
    }
}

trait Press {
    /// Handle `event` with an accepting sink.
    fn press(&mut self, event: InputEvent, now_ms: u64) -> Outcome;
}

impl Press for Kiosk {
    fn press(&mut self, event: InputEvent, now_ms: u64) -> Outcome {
        self.handle(event, now_ms, &mut Outbox::default())
    }
}

fn short(button: Button) -> InputEvent {
    InputEvent::new(button, Gesture::ShortPress)
}

const BACK_LONG: InputEvent = InputEvent::new(Button::Back, Gesture::LongPress);
const DOUBLE: InputEvent = InputEvent::new(Button::Confirm, Gesture::DoublePress);

fn kiosk() -> Kiosk {
    Kiosk::new(KioskConfig::standard()).unwrap()
}

/// Kiosk already past the welcome screen.
fn at_menu() -> Kiosk {
    let mut k = kiosk();
    k.press(short(Button::Back), 0);
    k
}

/// Add `qty` of catalog item at `index` starting from the menu.
fn add_item(k: &mut Kiosk, index: usize, qty: u8) {
    while k.state() != (UiState::Menu { selected: index }) {
        k.press(short(Button::Down), 0);
    }
    k.press(short(Button::Confirm), 0);
    for _ in 1..qty {
        k.press(short(Button::Up), 0);
    }
    k.press(short(Button::Confirm), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Welcome / navigation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn welcome_only_reacts_to_back() {
    let mut k = kiosk();
    for event in [short(Button::Up), short(Button::Down), short(Button::Confirm), BACK_LONG, DOUBLE] {
        let outcome = k.press(event, 0);
        assert!(!outcome.changed);
        assert_eq!(k.state(), UiState::Welcome);
    }
    assert!(k.press(short(Button::Back), 0).changed);
    assert_eq!(k.state(), UiState::Menu { selected: 0 });
}

#[test]
fn menu_cursor_wraps_both_ways() {
    let mut k = at_menu();
    k.press(short(Button::Up), 0);
    assert_eq!(k.state(), UiState::Menu { selected: 4 });
    k.press(short(Button::Down), 0);
    assert_eq!(k.state(), UiState::Menu { selected: 0 });

    let n = k.catalog().len();
    for step in 1..=(3 * n) {
        k.press(short(Button::Down), 0);
        let UiState::Menu { selected } = k.state() else {
            panic!("left the menu");
        };
        assert!(selected < n);
        assert_eq!(selected, step % n);
    }
}

#[test]
fn back_in_menu_resets_order() {
    let mut k = at_menu();
    add_item(&mut k, 2, 1);
    k.press(short(Button::Down), 0);
    assert_eq!(k.cart().len(), 1);

    let outcome = k.press(short(Button::Back), 0);
    assert!(outcome.changed);
    assert!(k.cart().is_empty());
    assert_eq!(k.state(), UiState::Menu { selected: 0 });

    // Idempotent.
    assert!(k.press(short(Button::Back), 0).changed);
    assert_eq!(k.state(), UiState::Menu { selected: 0 });
}

// ═══════════════════════════════════════════════════════════════════════════
// Quantity / cart
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn quantity_is_clamped() {
    let mut k = at_menu();
    k.press(short(Button::Confirm), 0);
    assert_eq!(k.state(), UiState::Quantity { item: 0, qty: 1 });

    k.press(short(Button::Down), 0);
    assert_eq!(k.state(), UiState::Quantity { item: 0, qty: 1 });
    for _ in 0..20 {
        k.press(short(Button::Up), 0);
    }
    assert_eq!(k.state(), UiState::Quantity { item: 0, qty: MAX_QUANTITY });
}

#[test]
fn adding_returns_to_menu_with_notice() {
    let mut k = at_menu();
    k.press(short(Button::Down), 0);
    k.press(short(Button::Confirm), 0);
    k.press(short(Button::Up), 0);
    let outcome = k.press(short(Button::Confirm), 100);

    assert!(outcome.changed);
    let note = outcome.notification.unwrap();
    assert_eq!(note.notice, Notice::AddedToCart);
    assert_eq!(note.duration_ms, CART_NOTICE_MS);
    assert_eq!(k.state(), UiState::Menu { selected: 1 });
    assert_eq!(k.cart().entries()[0].item, 1);
    assert_eq!(k.cart().entries()[0].quantity, 2);
    assert_eq!(k.overlay(), Some(note));
}

#[test]
fn full_cart_reports_and_stays_unchanged() {
    let mut k = at_menu();
    for _ in 0..CART_CAPACITY {
        add_item(&mut k, 0, 1);
    }
    let before = k.cart().clone();

    k.press(short(Button::Confirm), 0);
    let outcome = k.press(short(Button::Confirm), 0);
    assert_eq!(outcome.notification.unwrap().notice, Notice::CartFull);
    assert_eq!(k.cart(), &before);
    assert_eq!(k.state(), UiState::Menu { selected: 0 });
}

#[test]
fn back_in_quantity_is_ignored() {
    let mut k = at_menu();
    k.press(short(Button::Confirm), 0);
    assert!(!k.press(short(Button::Back), 0).changed);
    assert_eq!(k.state(), UiState::Quantity { item: 0, qty: 1 });
}

#[test]
fn long_back_opens_cart_from_quantity() {
    let mut k = at_menu();
    k.press(short(Button::Confirm), 0);
    k.press(BACK_LONG, 0);
    assert_eq!(k.state(), UiState::CartView { scroll: 0 });
}

// ═══════════════════════════════════════════════════════════════════════════
// Cart view
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn cart_scroll_is_bounded() {
    let mut k = at_menu();
    for _ in 0..6 {
        add_item(&mut k, 0, 1);
    }
    k.press(BACK_LONG, 0);
    k.press(short(Button::Up), 0);
    assert_eq!(k.state(), UiState::CartView { scroll: 0 });
    for _ in 0..10 {
        k.press(short(Button::Down), 0);
    }
    // 6 entries, 4 visible rows.
    assert_eq!(k.state(), UiState::CartView { scroll: 2 });
}

#[test]
fn empty_cart_cannot_scroll() {
    let mut k = at_menu();
    k.press(BACK_LONG, 0);
    k.press(short(Button::Down), 0);
    assert_eq!(k.state(), UiState::CartView { scroll: 0 });
}

#[test]
fn long_back_in_cart_resets_scroll() {
    let mut k = at_menu();
    for _ in 0..6 {
        add_item(&mut k, 0, 1);
    }
    k.press(BACK_LONG, 0);
    k.press(short(Button::Down), 0);
    k.press(BACK_LONG, 0);
    assert_eq!(k.state(), UiState::CartView { scroll: 0 });
}

#[test]
fn back_from_cart_restores_menu_cursor() {
    let mut k = at_menu();
    k.press(short(Button::Down), 0);
    k.press(short(Button::Down), 0);
    k.press(BACK_LONG, 0);
    k.press(short(Button::Back), 0);
    assert_eq!(k.state(), UiState::Menu { selected: 2 });
}

// ═══════════════════════════════════════════════════════════════════════════
// Confirmation / submission
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn double_press_with_empty_cart_is_ignored() {
    let mut k = at_menu();
    assert!(!k.press(DOUBLE, 0).changed);
    assert_eq!(k.state(), UiState::Menu { selected: 0 });

    k.press(BACK_LONG, 0);
    assert!(!k.press(DOUBLE, 0).changed);
    assert_eq!(k.state(), UiState::CartView { scroll: 0 });
}

#[test]
fn double_press_opens_confirm_from_menu_and_cart() {
    let mut k = at_menu();
    add_item(&mut k, 0, 1);
    k.press(DOUBLE, 0);
    assert_eq!(k.state(), UiState::Confirm);

    k.press(short(Button::Back), 0);
    k.press(BACK_LONG, 0);
    k.press(DOUBLE, 0);
    assert_eq!(k.state(), UiState::Confirm);
}

#[test]
fn double_press_in_quantity_is_ignored() {
    let mut k = at_menu();
    add_item(&mut k, 0, 1);
    k.press(short(Button::Confirm), 0);
    assert!(!k.press(DOUBLE, 0).changed);
}

#[test]
fn cancel_confirmation_keeps_cart() {
    let mut k = at_menu();
    add_item(&mut k, 3, 1);
    k.press(DOUBLE, 0);
    k.press(short(Button::Back), 0);
    assert_eq!(k.state(), UiState::Menu { selected: 3 });
    assert_eq!(k.cart().len(), 1);
}

#[test]
fn confirm_ignores_navigation_and_long_back() {
    let mut k = at_menu();
    add_item(&mut k, 0, 1);
    k.press(DOUBLE, 0);
    for event in [short(Button::Up), short(Button::Down), BACK_LONG, DOUBLE] {
        assert!(!k.press(event, 0).changed);
    }
    assert_eq!(k.state(), UiState::Confirm);
}

#[test]
fn submit_produces_payload_and_clears_cart() {
    let mut k = at_menu();
    add_item(&mut k, 0, 2);
    add_item(&mut k, 3, 1);
    k.press(DOUBLE, 0);

    let mut outbox = Outbox::default();
    let outcome = k.handle(short(Button::Confirm), 500, &mut outbox);
    assert!(outcome.order_sent);
    assert_eq!(
        outbox.orders,
        ["{\"TableNumber\":8,\"Items\":[\
         {\"ItemID\":1,\"Name\":\"Burger\",\"Quantity\":2,\"Price\":5.99},\
         {\"ItemID\":4,\"Name\":\"Pasta\",\"Quantity\":1,\"Price\":8.99}]}"]
    );
    let note = outcome.notification.unwrap();
    assert_eq!(note.notice, Notice::OrderSent);
    assert_eq!(note.duration_ms, ORDER_NOTICE_MS);
    assert!(k.cart().is_empty());
    assert_eq!(k.state(), UiState::Menu { selected: 3 });

    // Cart view starts from the top after submission.
    k.press(BACK_LONG, 0);
    assert_eq!(k.state(), UiState::CartView { scroll: 0 });
}

#[test]
fn rejected_order_keeps_cart_and_confirm() {
    let mut k = at_menu();
    add_item(&mut k, 0, 2);
    k.press(DOUBLE, 0);
    let before = k.cart().clone();

    let mut outbox = Outbox {
        reject: true,
        ..Outbox::default()
    };
    let outcome = k.handle(short(Button::Confirm), 500, &mut outbox);
    assert!(outcome.changed);
    assert!(!outcome.order_sent);
    let note = outcome.notification.unwrap();
    assert_eq!(note.notice, Notice::OrderFailed);
    assert_eq!(note.duration_ms, ORDER_NOTICE_MS);
    assert_eq!(k.state(), UiState::Confirm);
    assert_eq!(k.cart(), &before);
    assert_eq!(k.overlay(), Some(note));

    // Retry once the link is back.
    outbox.reject = false;
    let outcome = k.handle(short(Button::Confirm), 3000, &mut outbox);
    assert!(outcome.order_sent);
    assert_eq!(outbox.orders.len(), 1);
    assert!(k.cart().is_empty());
    assert_eq!(k.state(), UiState::Menu { selected: 0 });
}

// ═══════════════════════════════════════════════════════════════════════════
// Policy / overlay
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn gesture_policy_follows_screen() {
    let mut k = kiosk();
    let p = k.gesture_policy();
    assert!(!p.long_press && !p.double_press);

    k.press(short(Button::Back), 0);
    let p = k.gesture_policy();
    assert!(p.long_press && p.double_press);

    k.press(short(Button::Confirm), 0);
    let p = k.gesture_policy();
    assert!(p.long_press && !p.double_press);

    k.press(short(Button::Confirm), 0);
    k.press(DOUBLE, 0);
    let p = k.gesture_policy();
    assert!(!p.long_press && !p.double_press);
}

#[test]
fn overlay_expires_and_is_dismissed_by_input() {
    let mut k = at_menu();
    add_item(&mut k, 0, 1);
    assert!(k.overlay().is_some());
    assert!(!k.expire_overlay(CART_NOTICE_MS - 1));
    assert!(k.expire_overlay(CART_NOTICE_MS));
    assert!(k.overlay().is_none());

    add_item(&mut k, 0, 1);
    k.press(short(Button::Down), 10);
    assert!(k.overlay().is_none());
    assert!(!k.expire_overlay(10_000));
}

#[test]
fn ignored_event_keeps_overlay() {
    let mut k = at_menu();
    add_item(&mut k, 0, 1);
    let note = k.overlay();
    assert!(note.is_some());

    // UP has no long-press meaning anywhere.
    let outcome = k.press(InputEvent::new(Button::Up, Gesture::LongPress), 10);
    assert!(!outcome.changed);
    assert_eq!(k.overlay(), note);
}

//! GPIO button sampling.
//!
//! Four physical buttons (active-low with internal pull-up):
//!   - BACK    - main menu / reset / return, hold for cart
//!   - CONFIRM - select / add / confirm, double press to order
//!   - UP      - scroll up / increment
//!   - DOWN    - scroll down / decrement
//!
//! Pins are only read here. Debouncing and gesture timing happen in
//! [`crate::input`] on every tick of the main loop, so a held button
//! never blocks the others.

use crate::input::{Button, Samples};
use embassy_nrf::gpio::{AnyPin, Input, Pull};

pub struct ButtonPins {
    /// Indexed by [`Button::index`].
    pins: [Input<'static>; 4],
}

impl ButtonPins {
    pub fn new(back: AnyPin, confirm: AnyPin, up: AnyPin, down: AnyPin) -> Self {
        Self {
            pins: [back, confirm, up, down].map(|pin| Input::new(pin, Pull::Up)),
        }
    }

    /// Read all four levels; `true` means physically pressed.
    pub fn sample(&self) -> Samples {
        let mut samples = [false; 4];
        for button in Button::ALL {
            samples[button.index()] = self.pins[button.index()].is_low();
        }
        samples
    }
}

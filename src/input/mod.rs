//! Button input: raw samples → debounced edges → classified gestures.
//!
//! Four physical buttons, each with its own independent debounce and
//! gesture state:
//!   - BACK    - main menu / reset / return; long press opens the cart
//!   - CONFIRM - select / add / confirm; double press starts checkout
//!   - UP      - scroll up / increment quantity
//!   - DOWN    - scroll down / decrement quantity
//!
//! [`ButtonPanel::poll`] runs one non-blocking pass over all four on
//! every tick and returns the resulting events in priority order.

pub mod debounce;
pub mod gesture;

use crate::config::Timing;
use debounce::Debouncer;
use gesture::{Classified, GestureClassifier, GesturePolicy};
use heapless::Vec;

pub use debounce::Edge;
pub use gesture::Gesture;

/// Physical button roles, declared in same-tick priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Back = 0,
    Confirm = 1,
    Up = 2,
    Down = 3,
}

impl Button {
    /// All roles, highest priority first.
    pub const ALL: [Button; 4] = [Button::Back, Button::Confirm, Button::Up, Button::Down];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn supports_long_press(self) -> bool {
        matches!(self, Button::Back)
    }

    pub const fn supports_double_press(self) -> bool {
        matches!(self, Button::Confirm)
    }
}

/// A classified gesture on one button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputEvent {
    pub button: Button,
    pub gesture: Gesture,
}

impl InputEvent {
    pub const fn new(button: Button, gesture: Gesture) -> Self {
        Self { button, gesture }
    }
}

/// Raw "physically pressed" levels indexed by [`Button::index`].
pub type Samples = [bool; 4];

/// Events produced by one poll pass.
pub type TickEvents = Vec<InputEvent, 8>;

#[derive(Clone, Copy, Debug)]
struct ButtonChannel {
    button: Button,
    debouncer: Debouncer,
    classifier: GestureClassifier,
}

/// Debounce + classification state for all four buttons.
#[derive(Clone, Debug)]
pub struct ButtonPanel {
    channels: [ButtonChannel; 4],
}

impl ButtonPanel {
    pub fn new(timing: &Timing) -> Self {
        Self {
            channels: Button::ALL.map(|button| ButtonChannel {
                button,
                debouncer: Debouncer::new(timing.debounce_ms),
                classifier: GestureClassifier::new(button, timing),
            }),
        }
    }

    /// Stable level of `button` after debouncing.
    pub fn is_pressed(&self, button: Button) -> bool {
        self.channels[button.index()].debouncer.is_pressed()
    }

    /// One poll pass over every button.
    ///
    /// Presses released in an earlier tick and reported late come first,
    /// since they happened before anything seen now. The rest follow in
    /// BACK > CONFIRM > UP > DOWN order. If any other button produced an
    /// event while CONFIRM holds a press pending, that press is reported
    /// now as a short press so it is not paired across the intervening
    /// action.
    pub fn poll(&mut self, samples: Samples, now_ms: u64, policy: GesturePolicy) -> TickEvents {
        let mut classified = [Classified::default(); 4];
        for channel in &mut self.channels {
            let edge = channel.debouncer.update(samples[channel.button.index()], now_ms);
            classified[channel.button.index()] = channel.classifier.update(edge, now_ms, policy);
        }

        let others_fired = Button::ALL
            .iter()
            .any(|b| *b != Button::Confirm && classified[b.index()].current.is_some());
        if others_fired {
            let confirm = Button::Confirm.index();
            let flushed = self.channels[confirm].classifier.flush(now_ms);
            classified[confirm].merge(flushed);
        }

        let mut events = TickEvents::new();
        for button in Button::ALL {
            if let Some(gesture) = classified[button.index()].deferred {
                let _ = events.push(InputEvent::new(button, gesture));
            }
        }
        for button in Button::ALL {
            if let Some(gesture) = classified[button.index()].current {
                let _ = events.push(InputEvent::new(button, gesture));
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: GesturePolicy = GesturePolicy {
        long_press: true,
        double_press: true,
    };

    fn pressed(buttons: &[Button]) -> Samples {
        let mut s = [false; 4];
        for b in buttons {
            s[b.index()] = true;
        }
        s
    }

    /// Hold `buttons` from `from` to `to` (exclusive) at 10 ms ticks.
    fn run(panel: &mut ButtonPanel, buttons: &[Button], from: u64, to: u64) -> std::vec::Vec<InputEvent> {
        let mut out = std::vec::Vec::new();
        let mut t = from;
        while t < to {
            out.extend(panel.poll(pressed(buttons), t, ALL));
            t += 10;
        }
        out
    }

    #[test]
    fn up_press_is_debounced_then_reported_on_release() {
        let mut panel = ButtonPanel::new(&Timing::standard());
        assert!(run(&mut panel, &[Button::Up], 0, 100).is_empty());
        assert!(panel.is_pressed(Button::Up));
        let events = run(&mut panel, &[], 100, 200);
        assert_eq!(events, [InputEvent::new(Button::Up, Gesture::ShortPress)]);
    }

    #[test]
    fn long_back_hold_does_not_starve_other_buttons() {
        let mut panel = ButtonPanel::new(&Timing::standard());
        let mut events = run(&mut panel, &[Button::Back], 0, 400);
        events.extend(run(&mut panel, &[Button::Back, Button::Down], 400, 500));
        events.extend(run(&mut panel, &[Button::Back], 500, 1200));
        assert_eq!(
            events,
            [
                InputEvent::new(Button::Down, Gesture::ShortPress),
                InputEvent::new(Button::Back, Gesture::LongPress),
            ]
        );
    }

    #[test]
    fn same_tick_events_follow_priority() {
        let mut panel = ButtonPanel::new(&Timing::standard());
        run(&mut panel, &[Button::Down, Button::Back, Button::Up, Button::Confirm], 0, 100);
        let events = run(&mut panel, &[], 100, 200);
        // CONFIRM was released in the same tick, so it keeps its rank.
        assert_eq!(
            events,
            [
                InputEvent::new(Button::Back, Gesture::ShortPress),
                InputEvent::new(Button::Confirm, Gesture::ShortPress),
                InputEvent::new(Button::Up, Gesture::ShortPress),
                InputEvent::new(Button::Down, Gesture::ShortPress),
            ]
        );
    }

    #[test]
    fn earlier_confirm_precedes_later_back() {
        let mut panel = ButtonPanel::new(&Timing::standard());
        run(&mut panel, &[Button::Confirm], 0, 100);
        assert!(run(&mut panel, &[], 100, 200).is_empty());
        run(&mut panel, &[Button::Back], 200, 300);
        let events = run(&mut panel, &[], 300, 400);
        assert_eq!(
            events,
            [
                InputEvent::new(Button::Confirm, Gesture::ShortPress),
                InputEvent::new(Button::Back, Gesture::ShortPress),
            ]
        );
    }

    #[test]
    fn intervening_event_flushes_pending_confirm() {
        let mut panel = ButtonPanel::new(&Timing::standard());
        run(&mut panel, &[Button::Confirm], 0, 100);
        assert!(run(&mut panel, &[], 100, 160).is_empty());
        run(&mut panel, &[Button::Up], 160, 240);
        let events = run(&mut panel, &[], 240, 320);
        assert_eq!(
            events,
            [
                InputEvent::new(Button::Confirm, Gesture::ShortPress),
                InputEvent::new(Button::Up, Gesture::ShortPress),
            ]
        );
    }

    #[test]
    fn quick_confirm_pair_is_one_double_press() {
        let mut panel = ButtonPanel::new(&Timing::standard());
        let mut events = run(&mut panel, &[Button::Confirm], 0, 100);
        events.extend(run(&mut panel, &[], 100, 200));
        events.extend(run(&mut panel, &[Button::Confirm], 200, 300));
        events.extend(run(&mut panel, &[], 300, 1500));
        assert_eq!(events, [InputEvent::new(Button::Confirm, Gesture::DoublePress)]);
    }
}

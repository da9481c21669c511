//! Per-button gesture classification.
//!
//! Consumes debounced edges plus the current time on every poll tick and
//! never blocks: long presses are found by comparing the stored press
//! timestamp against `now`, and double presses by holding a single
//! release pending until either a second release pairs with it or the
//! window runs out.
//!
//! | Gesture      | Condition                                         |
//! |--------------|---------------------------------------------------|
//! | Short press  | Release before the long-press hold                |
//! | Long press   | Still held at `long_press_ms` (fires once)        |
//! | Double press | Second release within `double_press_ms` of first  |

use super::debounce::Edge;
use super::Button;
use crate::config::Timing;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    ShortPress,
    LongPress,
    DoublePress,
}

/// Output of one classifier tick for one button.
///
/// A tick completes at most one gesture from its own edge or hold time,
/// and surfaces at most one press released in an earlier tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Classified {
    /// Short press released before this tick, reported late.
    pub deferred: Option<Gesture>,
    /// Gesture completed at this tick.
    pub current: Option<Gesture>,
}

impl Classified {
    pub fn is_empty(&self) -> bool {
        self.deferred.is_none() && self.current.is_none()
    }

    pub(super) fn merge(&mut self, other: Classified) {
        self.deferred = self.deferred.or(other.deferred);
        self.current = self.current.or(other.current);
    }
}

impl IntoIterator for Classified {
    type Item = Gesture;
    type IntoIter = core::iter::Chain<core::option::IntoIter<Gesture>, core::option::IntoIter<Gesture>>;

    /// Deferred first, then current.
    fn into_iter(self) -> Self::IntoIter {
        self.deferred.into_iter().chain(self.current)
    }
}

/// Which multi-step gestures the current screen accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GesturePolicy {
    pub long_press: bool,
    pub double_press: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Held { since_ms: u64, long_fired: bool },
}

#[derive(Clone, Copy, Debug)]
pub struct GestureClassifier {
    /// `None` for buttons without long-press semantics.
    long_press_ms: Option<u64>,
    /// `None` for buttons without double-press semantics.
    double_press_ms: Option<u64>,
    phase: Phase,
    /// Release time of a short press waiting for its partner.
    pending_release: Option<u64>,
}

impl GestureClassifier {
    pub fn new(button: Button, timing: &Timing) -> Self {
        Self {
            long_press_ms: button.supports_long_press().then_some(timing.long_press_ms),
            double_press_ms: button.supports_double_press().then_some(timing.double_press_ms),
            phase: Phase::Idle,
            pending_release: None,
        }
    }

    /// A short press is being held back waiting for a second one.
    pub fn is_pending(&self) -> bool {
        self.pending_release.is_some()
    }

    /// Advance by one tick.
    pub fn update(&mut self, edge: Option<Edge>, now_ms: u64, policy: GesturePolicy) -> Classified {
        let mut out = Classified::default();
        let window = self.double_press_ms.filter(|_| policy.double_press);
        let hold = self.long_press_ms.filter(|_| policy.long_press);

        // The screen stopped accepting double presses: nothing can pair
        // with the pending one any more.
        if window.is_none() && self.pending_release.take().is_some() {
            out.deferred = Some(Gesture::ShortPress);
        }

        match edge {
            Some(Edge::Pressed) => {
                self.phase = Phase::Held {
                    since_ms: now_ms,
                    long_fired: false,
                };
            }
            Some(Edge::Released) => {
                let phase = core::mem::replace(&mut self.phase, Phase::Idle);
                if let Phase::Held { long_fired: false, .. } = phase {
                    self.classify_release(now_ms, window, &mut out);
                }
            }
            None => {}
        }

        if let (Phase::Held { since_ms, long_fired: false }, Some(hold)) = (self.phase, hold) {
            if now_ms.saturating_sub(since_ms) >= hold {
                self.phase = Phase::Held {
                    since_ms,
                    long_fired: true,
                };
                out.current = Some(Gesture::LongPress);
            }
        }

        // Window elapsed with no second press: surface the first one.
        if let (Phase::Idle, Some(released), Some(window)) = (self.phase, self.pending_release, window)
        {
            if now_ms.saturating_sub(released) >= window {
                self.pending_release = None;
                out.deferred = Some(Gesture::ShortPress);
            }
        }

        out
    }

    /// Give up waiting for a second press, reporting the pending one.
    ///
    /// Used when another button produced an event, so the pair would no
    /// longer be back to back. A press released before `now_ms` comes
    /// back as deferred, one released at `now_ms` as current.
    pub fn flush(&mut self, now_ms: u64) -> Classified {
        match self.pending_release.take() {
            Some(released) if released < now_ms => Classified {
                deferred: Some(Gesture::ShortPress),
                current: None,
            },
            Some(_) => Classified {
                deferred: None,
                current: Some(Gesture::ShortPress),
            },
            None => Classified::default(),
        }
    }

    fn classify_release(&mut self, now_ms: u64, window: Option<u64>, out: &mut Classified) {
        let Some(window) = window else {
            out.current = Some(Gesture::ShortPress);
            return;
        };
        match self.pending_release.take() {
            Some(first) if now_ms.saturating_sub(first) < window => {
                out.current = Some(Gesture::DoublePress);
            }
            Some(_) => {
                // The stale first press is reported; this one waits in turn.
                out.deferred = Some(Gesture::ShortPress);
                self.pending_release = Some(now_ms);
            }
            None => self.pending_release = Some(now_ms),
        }
    }
}

//! Time-based debouncer for one button.
//!
//! A raw level that differs from the stable level becomes a candidate.
//! The candidate is accepted as an edge only if a later sample, taken at
//! least `debounce_ms` after the candidate was first seen, still shows it.
//! A sample that bounces back in between drops the candidate.

/// Stable logical edge reported by [`Debouncer::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    debounce_ms: u64,
    stable: bool,
    /// Level seen differing from `stable`, and when it was first seen.
    candidate: Option<(bool, u64)>,
}

impl Debouncer {
    pub const fn new(debounce_ms: u64) -> Self {
        Self {
            debounce_ms,
            stable: false,
            candidate: None,
        }
    }

    /// Current stable level (`true` = pressed).
    pub fn is_pressed(&self) -> bool {
        self.stable
    }

    /// Feed one raw sample (`true` = physically pressed) taken at `now_ms`.
    pub fn update(&mut self, raw: bool, now_ms: u64) -> Option<Edge> {
        if raw == self.stable {
            self.candidate = None;
            return None;
        }

        match self.candidate {
            Some((level, since)) if level == raw => {
                if now_ms.saturating_sub(since) < self.debounce_ms {
                    return None;
                }
                self.stable = raw;
                self.candidate = None;
                Some(if raw { Edge::Pressed } else { Edge::Released })
            }
            _ => {
                self.candidate = Some((raw, now_ms));
                None
            }
        }
    }
}

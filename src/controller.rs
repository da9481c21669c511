//! Single cooperative poll loop body.
//!
//! One [`Controller::tick`] per poll period: expire the overlay, sample
//! and classify all four buttons, feed the events to the state machine
//! in the order the panel reports them, hand finished orders to the sink,
//! and redraw at most once. Nothing in here waits.

use crate::config::KioskConfig;
use crate::error::Error;
use crate::input::{ButtonPanel, Samples, TickEvents};
use crate::transport::OrderSink;
use crate::ui::machine::Kiosk;
use crate::ui::Renderer;

/// What happened during one tick, for logging.
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    pub events: TickEvents,
    pub rendered: bool,
    pub orders_sent: usize,
    /// First display failure of the tick. Later events were still applied.
    pub render_error: Option<Error>,
}

impl TickReport {
    fn display_result(&mut self, result: Result<(), Error>) {
        if let Err(e) = result {
            self.render_error.get_or_insert(e);
        }
    }
}

pub struct Controller {
    panel: ButtonPanel,
    kiosk: Kiosk,
}

impl Controller {
    /// Validate the configuration. Fails before anything is drawn.
    pub fn new(config: KioskConfig) -> Result<Self, Error> {
        let kiosk = Kiosk::new(config)?;
        Ok(Self {
            panel: ButtonPanel::new(&config.timing),
            kiosk,
        })
    }

    pub fn kiosk(&self) -> &Kiosk {
        &self.kiosk
    }

    /// Draw the initial (welcome) screen.
    pub fn start<R: Renderer>(&mut self, renderer: &mut R) -> Result<(), Error> {
        renderer.render(&self.kiosk.render_request())
    }

    /// Run one poll pass over `samples` taken at `now_ms`.
    ///
    /// Never stops part way: a display error is kept in the report and
    /// every classified event is still applied.
    pub fn tick<R, S>(&mut self, now_ms: u64, samples: Samples, renderer: &mut R, sink: &mut S) -> TickReport
    where
        R: Renderer,
        S: OrderSink,
    {
        let mut redraw = self.kiosk.expire_overlay(now_ms);
        let events = self.panel.poll(samples, now_ms, self.kiosk.gesture_policy());
        let mut report = TickReport::default();

        for event in &events {
            let outcome = self.kiosk.handle(*event, now_ms, sink);
            if outcome.order_sent {
                report.orders_sent += 1;
            }
            if let Some(notification) = &outcome.notification {
                report.display_result(renderer.notify(notification));
            }
            redraw |= outcome.changed;
        }

        // An active overlay owns the screen until it expires.
        if redraw && self.kiosk.overlay().is_none() {
            let result = renderer.render(&self.kiosk.render_request());
            report.rendered = result.is_ok();
            report.display_result(result);
        }
        report.events = events;
        report
    }
}

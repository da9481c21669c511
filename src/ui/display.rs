//! SSD1306 OLED renderer.
//!
//! Stateless from the core's point of view: every request redraws the
//! whole 128×64 screen from the state and cart it carries.

use super::{Notification, RenderRequest, Renderer, UiState};
use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::Error;
use core::fmt::Write;
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Menu rows that fit between the header and the hint line.
const MENU_ROWS: usize = 4;

type Line = heapless::String<32>;

fn text_style(font: &'static MonoFont<'static>) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(font)
        .text_color(BinaryColor::On)
        .build()
}

pub struct OledRenderer<I2C> {
    display: Display<I2C>,
}

impl<I2C> OledRenderer<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the SSD1306 display and clear the screen.
    pub fn new(i2c: I2C) -> Result<Self, Error> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init().map_err(|_| Error::Display)?;
        display.clear_buffer();
        display.flush().map_err(|_| Error::Display)?;
        Ok(Self { display })
    }

    fn text(&mut self, s: &str, x: i32, y: i32) {
        let _ = Text::new(s, Point::new(x, y), text_style(&FONT_6X10)).draw(&mut self.display);
    }

    fn draw_welcome(&mut self) {
        let _ = Text::new("Welcome!", Point::new(10, 24), text_style(&FONT_10X20))
            .draw(&mut self.display);
        self.text("Press Btn 1 to start", 4, 50);
    }

    fn draw_menu(&mut self, catalog: &Catalog, selected: usize) {
        self.text("=== Menu ===", 0, 8);

        // Scroll the window so the cursor stays visible.
        let first = selected.saturating_sub(MENU_ROWS - 1);
        for (row, item) in catalog.items().iter().enumerate().skip(first).take(MENU_ROWS) {
            let marker = if row == selected { ">" } else { " " };
            let mut line = Line::new();
            let _ = write!(line, "{} {}", marker, item.name);
            let y = 20 + ((row - first) as i32 * 10);
            self.text(line.as_str(), 0, y);
        }

        self.text("Btn 2 x2: Order", 0, 62);
    }

    fn draw_quantity(&mut self, catalog: &Catalog, item: usize, qty: u8) {
        self.text("=== Quantity ===", 0, 8);
        let name = catalog.get(item).map_or("?", |i| i.name);
        let mut line = Line::new();
        let _ = write!(line, "{}: {}", name, qty);
        self.text(line.as_str(), 0, 30);
        self.text("Btn 2: Add to Cart", 0, 50);
    }

    fn draw_cart(&mut self, cart: &Cart, catalog: &Catalog, scroll: usize, rows: usize) {
        self.text("=== Cart ===", 0, 8);
        if cart.is_empty() {
            self.text("Cart is Empty", 0, 30);
        } else {
            for (row, entry) in cart.entries().iter().skip(scroll).take(rows).enumerate() {
                let name = catalog.get(entry.item).map_or("?", |i| i.name);
                let mut line = Line::new();
                let _ = write!(line, "{} x{}", name, entry.quantity);
                self.text(line.as_str(), 0, 20 + row as i32 * 10);
            }
        }
        self.text("B1:Back B2x2:Order", 0, 62);
    }

    fn draw_confirm(&mut self, cart: &Cart, catalog: &Catalog) {
        self.text("=== Confirm ===", 0, 8);
        self.text("Confirm Order?", 0, 24);
        let mut line = Line::new();
        let _ = write!(line, "Total: {}", cart.total(catalog));
        self.text(line.as_str(), 0, 38);
        self.text("Btn 2: Yes  Btn 1: No", 0, 58);
    }
}

impl<I2C> Renderer for OledRenderer<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<(), Error> {
        self.display.clear_buffer();
        match request.state {
            UiState::Welcome => self.draw_welcome(),
            UiState::Menu { selected } => self.draw_menu(request.catalog, selected),
            UiState::Quantity { item, qty } => self.draw_quantity(request.catalog, item, qty),
            UiState::CartView { scroll } => {
                self.draw_cart(request.cart, request.catalog, scroll, request.visible_rows)
            }
            UiState::Confirm => self.draw_confirm(request.cart, request.catalog),
        }
        self.display.flush().map_err(|_| Error::Display)
    }

    /// Render a transient notice on a cleared screen.
    fn notify(&mut self, notification: &Notification) -> Result<(), Error> {
        self.display.clear_buffer();
        self.text(notification.message(), 0, 30);
        self.display.flush().map_err(|_| Error::Display)
    }
}

//! Order snapshot and its JSON wire payload.
//!
//! Payload layout (compact, field order fixed):
//! ```text
//! {"TableNumber":8,"Items":[{"ItemID":1,"Name":"Burger","Quantity":2,"Price":5.99},...]}
//! ```
//! Names are written verbatim: the catalog only admits printable ASCII
//! without `"` or `\`, so no escaping is needed.
//!
//! Written with `core::fmt` rather than a serde encoder: the crate builds
//! without `alloc`, and `Price` must always print exactly two decimals
//! (`5.90`, not `5.9`), which a float field would not give.

use crate::cart::Cart;
use crate::catalog::{Catalog, Price};
use crate::config::{CART_CAPACITY, ORDER_PAYLOAD_CAPACITY};
use crate::error::Error;
use core::fmt::Write;
use heapless::{String, Vec};

/// Serialized order ready for the sink.
pub type OrderPayload = String<ORDER_PAYLOAD_CAPACITY>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OrderLine {
    pub item_id: u8,
    pub name: &'static str,
    pub quantity: u8,
    pub price: Price,
}

/// Immutable snapshot of the cart at submission time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    table: u16,
    lines: Vec<OrderLine, CART_CAPACITY>,
}

impl Order {
    /// Resolve every cart entry against the catalog, in cart order.
    ///
    /// Entries whose index is no longer in the catalog are skipped.
    pub fn from_cart(table: u16, catalog: &Catalog, cart: &Cart) -> Self {
        let mut lines = Vec::new();
        for entry in cart.entries() {
            let (Some(item), Some(item_id)) = (catalog.get(entry.item), catalog.item_id(entry.item))
            else {
                continue;
            };
            // Cart and order share CART_CAPACITY.
            let _ = lines.push(OrderLine {
                item_id,
                name: item.name,
                quantity: entry.quantity,
                price: item.price,
            });
        }
        Self { table, lines }
    }

    pub fn table(&self) -> u16 {
        self.table
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Write the JSON payload.
    pub fn serialize(&self) -> Result<OrderPayload, Error> {
        let mut out = OrderPayload::new();
        self.write_json(&mut out).map_err(|_| Error::PayloadOverflow)?;
        Ok(out)
    }

    fn write_json<W: Write>(&self, w: &mut W) -> core::fmt::Result {
        write!(w, "{{\"TableNumber\":{},\"Items\":[", self.table)?;
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                w.write_char(',')?;
            }
            write!(
                w,
                "{{\"ItemID\":{},\"Name\":\"{}\",\"Quantity\":{},\"Price\":{}}}",
                line.item_id, line.name, line.quantity, line.price
            )?;
        }
        w.write_str("]}")
    }
}

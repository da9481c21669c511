//! Fixed, ordered menu catalog.
//!
//! Position defines identity: the wire `ItemID` of an item is its
//! 1-based index in the catalog.

use crate::config::{MAX_CATALOG_ITEMS, MAX_ITEM_NAME_LEN, MAX_PRICE_CENTS};
use crate::error::{ConfigError, Error};
use core::fmt;

/// Price in integer cents, so the two-decimal wire format is exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Price(u32);

impl Price {
    pub const fn from_cents(cents: u32) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u32 {
        self.0
    }
}

/// Always renders with exactly two decimal places (`5.99`, `10.00`).
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// One orderable item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuItem {
    pub name: &'static str,
    pub price: Price,
}

impl MenuItem {
    pub const fn new(name: &'static str, price: Price) -> Self {
        Self { name, price }
    }
}

/// Validated view over the startup catalog.
///
/// Indices handed out by the UI are always `< len()`, so lookups through
/// [`Catalog::get`] only return `None` on a programming error.
#[derive(Clone, Copy, Debug)]
pub struct Catalog {
    items: &'static [MenuItem],
}

impl Catalog {
    /// Validate `items` and wrap them.
    ///
    /// Names must be printable ASCII without `"` or `\` so they can be
    /// drawn with the OLED font and written into the order payload as-is.
    pub fn new(items: &'static [MenuItem]) -> Result<Self, Error> {
        if items.is_empty() {
            return Err(ConfigError::EmptyCatalog.into());
        }
        if items.len() > MAX_CATALOG_ITEMS {
            return Err(ConfigError::CatalogTooLarge.into());
        }
        for (index, item) in items.iter().enumerate() {
            if !is_valid_name(item.name) {
                return Err(ConfigError::InvalidName(index).into());
            }
            if item.price.cents() > MAX_PRICE_CENTS {
                return Err(ConfigError::InvalidPrice(index).into());
            }
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static MenuItem> {
        self.items.get(index)
    }

    /// Wire identity of the item at `index` (1-based position).
    pub fn item_id(&self, index: usize) -> Option<u8> {
        // MAX_CATALOG_ITEMS keeps this within u8.
        (index < self.items.len()).then(|| (index + 1) as u8)
    }

    pub fn items(&self) -> &'static [MenuItem] {
        self.items
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_ITEM_NAME_LEN
        && name
            .bytes()
            .all(|b| (b == b' ' || b.is_ascii_graphic()) && b != b'"' && b != b'\\')
}

//! Bounded, insertion-ordered shopping cart.
//!
//! Entries reference the catalog by index, so resolving the wire
//! `ItemID` at submission time is a direct lookup.

use crate::catalog::{Catalog, Price};
use crate::config::{CART_CAPACITY, MAX_QUANTITY};
use crate::error::Error;
use heapless::Vec;

/// One line in the cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CartEntry {
    /// Index into the catalog.
    pub item: usize,
    /// Always within `1..=MAX_QUANTITY`.
    pub quantity: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<CartEntry, CART_CAPACITY>,
    limit: usize,
}

impl Cart {
    /// Empty cart holding at most `limit` entries (clamped to
    /// `1..=CART_CAPACITY`).
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.clamp(1, CART_CAPACITY),
        }
    }

    /// Append an entry. A full cart is left untouched.
    ///
    /// `quantity` is clamped into `1..=MAX_QUANTITY`.
    pub fn add(&mut self, item: usize, quantity: u8) -> Result<(), Error> {
        if self.is_full() {
            return Err(Error::CartFull);
        }
        let entry = CartEntry {
            item,
            quantity: quantity.clamp(1, MAX_QUANTITY),
        };
        self.entries.push(entry).map_err(|_| Error::CartFull)
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limit
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Sum of price × quantity over all entries.
    pub fn total(&self, catalog: &Catalog) -> Price {
        let cents = self
            .entries
            .iter()
            .filter_map(|e| catalog.get(e.item).map(|i| i.price.cents() * u32::from(e.quantity)))
            .sum();
        Price::from_cents(cents)
    }

    /// Largest valid scroll offset for `visible_rows` rows.
    pub fn max_scroll(&self, visible_rows: usize) -> usize {
        self.entries.len().saturating_sub(visible_rows)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(CART_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_preserves_insertion_order() {
        let mut cart = Cart::default();
        cart.add(0, 2).unwrap();
        cart.add(3, 1).unwrap();
        assert_eq!(
            cart.entries(),
            &[
                CartEntry { item: 0, quantity: 2 },
                CartEntry { item: 3, quantity: 1 }
            ]
        );
    }

    #[test]
    fn eleventh_add_is_rejected_without_mutation() {
        let mut cart = Cart::default();
        for i in 0..CART_CAPACITY {
            cart.add(i % 5, 1).unwrap();
        }
        let before = cart.clone();
        assert_eq!(cart.add(1, 3), Err(Error::CartFull));
        assert_eq!(cart, before);
        assert_eq!(cart.len(), CART_CAPACITY);
    }

    #[test]
    fn smaller_limit_is_enforced() {
        let mut cart = Cart::new(2);
        cart.add(0, 1).unwrap();
        cart.add(1, 1).unwrap();
        assert!(cart.is_full());
        assert_eq!(cart.add(2, 1), Err(Error::CartFull));
    }

    #[test]
    fn quantity_is_clamped() {
        let mut cart = Cart::default();
        cart.add(0, 0).unwrap();
        cart.add(0, 42).unwrap();
        assert_eq!(cart.entries()[0].quantity, 1);
        assert_eq!(cart.entries()[1].quantity, MAX_QUANTITY);
    }

    #[test]
    fn total_multiplies_quantities() {
        let catalog = Catalog::new(&crate::config::DEFAULT_CATALOG).unwrap();
        let mut cart = Cart::default();
        cart.add(0, 2).unwrap(); // 2 × 5.99
        cart.add(3, 1).unwrap(); // 1 × 8.99
        assert_eq!(cart.total(&catalog), Price::from_cents(2097));
    }

    #[test]
    fn reset_empties_and_max_scroll_follows() {
        let mut cart = Cart::default();
        for _ in 0..6 {
            cart.add(0, 1).unwrap();
        }
        assert_eq!(cart.max_scroll(4), 2);
        cart.reset();
        assert!(cart.is_empty());
        assert_eq!(cart.max_scroll(4), 0);
    }
}

//! Unified error type for table-kiosk.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

use core::fmt;

/// Top-level error type used across the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Cart
    /// The cart already holds its maximum number of entries.
    CartFull,

    // Configuration
    /// A startup parameter or catalog entry is invalid.
    Config(ConfigError),

    // Ordering
    /// The serialized order did not fit its payload buffer.
    PayloadOverflow,

    // UI / Display
    /// I²C transaction to the display failed.
    Display,

    // Transport
    /// The order sink could not accept the payload.
    Transport,
}

/// Reasons a [`KioskConfig`](crate::config::KioskConfig) is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The catalog has no items.
    EmptyCatalog,
    /// The catalog exceeds `MAX_CATALOG_ITEMS`.
    CatalogTooLarge,
    /// Item at this catalog index has an empty, too long, or
    /// non-printable name.
    InvalidName(usize),
    /// Item at this catalog index is priced above `MAX_PRICE_CENTS`.
    InvalidPrice(usize),
    /// Cart limit is zero or larger than `CART_CAPACITY`.
    CartLimit,
    /// No cart rows would be visible.
    VisibleRows,
    /// A gesture threshold is zero.
    ZeroThreshold,
    /// The double-press window is not shorter than the long-press hold.
    OverlappingWindows,
}

// Convenience conversions

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CartFull => f.write_str("cart full"),
            Error::Config(e) => write!(f, "invalid configuration: {e}"),
            Error::PayloadOverflow => f.write_str("order payload overflow"),
            Error::Display => f.write_str("display error"),
            Error::Transport => f.write_str("order transport error"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyCatalog => f.write_str("empty catalog"),
            ConfigError::CatalogTooLarge => f.write_str("catalog too large"),
            ConfigError::InvalidName(i) => write!(f, "item {i} has an invalid name"),
            ConfigError::InvalidPrice(i) => write!(f, "item {i} has an invalid price"),
            ConfigError::CartLimit => f.write_str("cart limit out of range"),
            ConfigError::VisibleRows => f.write_str("no visible cart rows"),
            ConfigError::ZeroThreshold => f.write_str("zero gesture threshold"),
            ConfigError::OverlappingWindows => {
                f.write_str("double-press window not shorter than long press")
            }
        }
    }
}

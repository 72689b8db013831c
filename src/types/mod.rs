//! Shared primitive types.

mod catalog;
pub use catalog::*;

mod currency;
pub use currency::*;

mod document;
pub use document::*;

mod quote;
pub use quote::*;

mod selection;
pub use selection::*;

/// Label rendered in place of a formatted amount for zero-price extras.
pub const FREE_LABEL: &str = "FREE";

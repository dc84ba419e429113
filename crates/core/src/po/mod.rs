//! Purchase-order lines.
//!
//! This module implements the PO line side of the engines:
//! - The PO line model and its descriptive attributes
//! - Simple/Complex classification and GRIR eligibility
//! - Unit price resolution with the zero-quantity guard

pub mod classifier;
pub mod types;
pub mod unit_price;

pub use classifier::PoClassifier;
pub use types::{Classification, PoClass, PoLine, PoLineDetails};
pub use unit_price::{UnitPrice, UnitPriceBook, UnitPriceResolver};

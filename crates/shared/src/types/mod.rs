//! Common types used across the pipeline.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{AMOUNT_DP, QTY_DP, RATIO_DP, round_amount, round_qty, round_ratio};

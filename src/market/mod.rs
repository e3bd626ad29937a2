//! Market data inputs.

#[allow(clippy::module_inception)]
pub mod market;

pub use market::{Market, MarketBuilder};

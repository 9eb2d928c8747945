//! Assets module - asset classes and instrument key conventions.

mod assets_model;
mod instrument_key;

pub use assets_model::AssetClass;
pub use instrument_key::{is_paired_symbol, metal_code, normalize_instrument_key};

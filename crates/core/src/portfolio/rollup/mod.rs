//! Multi-asset-class aggregation of holdings into portfolio totals.

mod rollup_model;
mod rollup_service;

pub use rollup_model::*;
pub use rollup_service::*;

#[cfg(test)]
mod rollup_service_tests;

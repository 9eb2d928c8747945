//! Portfolio computation: position replay, valuation and rollup.

pub mod fixed_income;
pub mod futures;
pub mod holdings;
pub mod manual_assets;
pub mod positions;
pub mod rollup;

mod portfolio_model;
mod portfolio_service;
mod portfolio_traits;
mod summary_store;

pub use fixed_income::{accrue, value_fixed_income, AccrualResult, Compounding, FixedIncomePosition};
pub use futures::{parse_purchase_and_sale_summary, realized_futures_holdings, FuturesSummary};
pub use holdings::{Holding, PriceSource};
pub use manual_assets::ManualAsset;
pub use portfolio_model::*;
pub use portfolio_service::*;
pub use portfolio_traits::*;
pub use positions::{fold, PositionState};
pub use rollup::{rollup, rollup_by_class, PortfolioTotals};
pub use summary_store::*;

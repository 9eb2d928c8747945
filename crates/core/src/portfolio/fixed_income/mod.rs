//! Fixed-income valuation by interest accrual.

mod accrual;
mod fixed_income_model;

pub use accrual::*;
pub use fixed_income_model::*;

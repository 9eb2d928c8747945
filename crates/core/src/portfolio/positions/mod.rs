//! Position accumulation - moving-average cost basis replay.

mod position_accumulator;
mod positions_model;

pub use position_accumulator::*;
pub use positions_model::*;

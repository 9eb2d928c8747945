mod manual_assets_model;

pub use manual_assets_model::*;

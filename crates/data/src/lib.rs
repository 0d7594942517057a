//! Data loading and validation for game settings.

pub mod load;

pub use load::*;

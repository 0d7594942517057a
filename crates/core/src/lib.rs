//! Core lottery logic. Keep this crate free of IO and platform concerns.

pub mod config;
pub mod draw;
pub mod entry;
pub mod events;
pub mod payout;
pub mod rng;
pub mod roster;
pub mod round;
pub mod selection;
pub mod slip;
pub mod snapshot;

pub use config::*;
pub use draw::*;
pub use entry::*;
pub use events::*;
pub use payout::*;
pub use rng::*;
pub use roster::*;
pub use round::*;
pub use selection::*;
pub use slip::*;
pub use snapshot::*;

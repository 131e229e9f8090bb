//! World state
//!
//! Configuration and persistence shared by the game systems.

pub mod options;
pub mod save;

pub use options::{OptionsError, QuiverOptions};
pub use save::SaveError;

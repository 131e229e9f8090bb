//! quiver-core: Quiver logic for a roguelike
//!
//! Chooses and remembers what the fire key does: which missile is fired or
//! thrown, or which spell or wand is used instead. The game's inventory,
//! spellbook and effect code are reached through plain data and traits, so
//! everything here is synchronous and testable with synthetic inventories.

pub mod data;
pub mod magic;
pub mod object;
pub mod player;
pub mod quiver;
pub mod state;
pub mod world;

pub use quiver::{Action, ActionCycler, CycleDir, History, QuiverEnv};
pub use state::GameState;

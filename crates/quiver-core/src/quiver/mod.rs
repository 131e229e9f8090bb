//! Quiver system
//!
//! The single action bound to the fire key: which ammunition, spell or
//! wand it uses, how it cycles to the next candidate, and the per-launcher
//! memory that picks a sensible default after equipment changes.

mod action;
mod cycler;
mod fire_order;
mod formatted;
mod history;
mod prompt;

pub use action::{
    Action, ActionKind, ActionType, Effects, Target, find_action_from_launcher, find_ammo_action,
    slot_to_action,
};
pub use cycler::ActionCycler;
pub use fire_order::{FireType, get_item_fire_order, get_next_fireable_item, item_matches};
pub use formatted::FormattedString;
pub use history::{History, QUIVER_COOKIE};
pub use prompt::{Prompt, PromptResult};

use crate::object::Item;
use crate::player::You;
use crate::world::QuiverOptions;

/// Everything the quiver reads from the rest of the game
#[derive(Debug, Clone, Copy)]
pub struct QuiverEnv<'a> {
    pub you: &'a You,
    pub options: &'a QuiverOptions,
}

impl<'a> QuiverEnv<'a> {
    pub fn new(you: &'a You, options: &'a QuiverOptions) -> Self {
        Self { you, options }
    }

    /// The wielded weapon, if any
    pub fn weapon(&self) -> Option<&'a Item> {
        self.you.weapon()
    }
}

/// Cycling direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CycleDir {
    #[default]
    Forward,
    Backward,
}

impl CycleDir {
    /// Signed step through an ordered list
    pub const fn step(&self) -> isize {
        match self {
            CycleDir::Forward => 1,
            CycleDir::Backward => -1,
        }
    }

    /// Negative means backward, anything else forward
    pub const fn from_sign(dir: i32) -> Self {
        if dir < 0 {
            CycleDir::Backward
        } else {
            CycleDir::Forward
        }
    }
}

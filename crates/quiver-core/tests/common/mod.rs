//! Shared fixtures for the quiver integration tests

#![allow(dead_code)]

use quiver_core::magic::SpellId;
use quiver_core::object::Item;
use quiver_core::player::{Species, You};
use quiver_core::world::QuiverOptions;
use quiver_core::{GameState, QuiverEnv};

/// A human carrying `items` at the given slots
pub fn player_with(items: &[(usize, Item)]) -> You {
    let mut you = You::new(Species::Human);
    for (slot, item) in items {
        you.inventory.put(*slot, item.clone());
    }
    you
}

/// Fresh game state around [`player_with`]
pub fn state_with(items: &[(usize, Item)]) -> GameState {
    GameState::new(player_with(items), QuiverOptions::default())
}

/// Memorise spells, all predicted safe to cast
pub fn learn(you: &mut You, spells: &[SpellId]) {
    for &spell in spells {
        you.spells.memorise(spell);
    }
}

pub fn env(state: &GameState) -> QuiverEnv<'_> {
    QuiverEnv::new(&state.player, &state.options)
}

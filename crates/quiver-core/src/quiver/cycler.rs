//! Action cycler
//!
//! Owns the currently quivered action. Every change goes through
//! [`ActionCycler::set`] so the history is updated exactly once per change.

use serde_json::Value;
use tracing::debug;

use super::{Action, ActionKind, CycleDir, Effects, History, QuiverEnv, Target, slot_to_action};
use crate::magic::SpellId;
use crate::object::{AmmoCategory, ammo_category_of};
use crate::player::You;
use crate::world::QuiverOptions;

/// The quivered action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionCycler {
    current: Action,
}

impl ActionCycler {
    /// Starts out holding the null action
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &Action {
        &self.current
    }

    /// Replace the held action. Returns whether it changed.
    ///
    /// Quivering a different ammunition stack records it in `history` under
    /// the category it would be used with.
    pub fn set(&mut self, env: QuiverEnv<'_>, history: &mut History, action: Action) -> bool {
        let changed = action != self.current;
        self.current = action;
        if !changed {
            return false;
        }

        debug!("Quiver set to {:?}", self.current.kind());
        let ammo = match self.current.kind() {
            ActionKind::Ammo(Some(slot)) => env.you.inventory.get(slot),
            _ => None,
        };
        if let Some(item) = ammo {
            let weapon = env.weapon();
            let category = match weapon {
                Some(launcher) if item.launched_by(launcher) => ammo_category_of(weapon),
                _ => AmmoCategory::Throw,
            };
            history.set_quiver(item, category);
        }
        true
    }

    /// Copy another cycler's action without touching any history
    pub fn import_from(&mut self, other: &ActionCycler) -> bool {
        let changed = self.current != other.current;
        self.current = other.current.clone();
        changed
    }

    /// Quiver whatever is in an inventory slot
    pub fn set_from_slot(&mut self, env: QuiverEnv<'_>, history: &mut History, slot: usize) -> bool {
        let action = slot_to_action(&env.you.inventory, slot);
        self.set(env, history, action)
    }

    pub fn clear(&mut self, env: QuiverEnv<'_>, history: &mut History) -> bool {
        self.set(env, history, Action::none())
    }

    /// The action cycling would move to: the next of the same family, or
    /// failing that the first valid action of another family. The null
    /// action when nothing at all is valid.
    pub fn next(&self, env: QuiverEnv<'_>, dir: CycleDir) -> Action {
        let result = self.current.find_next(env, dir, false);
        if result.is_valid(env) {
            return result;
        }
        next_action_type(env, &result, dir).unwrap_or_default()
    }

    pub fn cycle(&mut self, env: QuiverEnv<'_>, history: &mut History, dir: CycleDir) -> bool {
        let next = self.next(env, dir);
        self.set(env, history, next)
    }

    /// Move off the held action if it is no longer valid
    pub fn on_actions_changed(&mut self, env: QuiverEnv<'_>, history: &mut History) {
        if !self.current.is_valid(env) {
            debug!("Quivered {:?} is no longer valid", self.current.kind());
            self.cycle(env, history, CycleDir::Forward);
        }
    }

    /// Trigger the held action in place
    pub fn trigger(
        &mut self,
        you: &mut You,
        options: &QuiverOptions,
        effects: &mut impl Effects,
        target: &mut Target,
    ) -> bool {
        self.current.trigger(you, options, effects, target)
    }

    /// Persistent record of the held action
    pub fn save(&self) -> Value {
        self.current.to_record()
    }

    /// Restore from [`ActionCycler::save`] output, then repair the action
    /// if it no longer applies
    pub fn load(&mut self, env: QuiverEnv<'_>, history: &mut History, record: &Value) {
        let action = Action::from_record(record);
        debug!("Restoring quiver {:?}", action.kind());
        self.set(env, history, action);
        self.on_actions_changed(env, history);
    }
}

/// First valid action of another family, searched in the order ammo,
/// spell, wand (reversed when cycling backward) starting after `failed`'s
/// family. The family of `failed` is reached last, wrapping to its start.
fn next_action_type(env: QuiverEnv<'_>, failed: &Action, dir: CycleDir) -> Option<Action> {
    let mut reps = vec![
        Action::ammo(None).find_next(env, dir, false),
        Action::spell(SpellId::NONE).find_next(env, dir, false),
        Action::wand(None).find_next(env, dir, false),
    ];
    if dir == CycleDir::Backward {
        reps.reverse();
    }

    let start = reps
        .iter()
        .position(|rep| rep.action_type() == failed.action_type())
        .map_or(0, |i| (i + 1) % reps.len());
    reps.rotate_left(start);

    reps.into_iter().find(|rep| rep.is_valid(env))
}

//! Player session state
//!
//! Ties the quiver to the character: the fire, quiver and cycle commands,
//! and the hooks inventory and equipment code call when things change.

use bytes::{Buf, BufMut};
use serde_json::Value;
use tracing::debug;

use crate::object::{Item, ammo_category_of};
use crate::player::{CANT_GRASP_MSG, You};
use crate::quiver::{
    ActionCycler, CycleDir, Effects, FormattedString, History, Prompt, PromptResult, QuiverEnv,
    Target,
};
use crate::world::{QuiverOptions, SaveError};

/// Question asked by the quiver command
pub const QUIVER_PROMPT: &str = "Quiver which item? (- for none, * to show all)";

/// Reported when an inscription forbids firing the quivered item
pub const FIRE_BLOCKED_MSG: &str = "An inscription stops you from firing that.";

/// Character state the quiver works on
#[derive(Debug, Clone, Default)]
pub struct GameState {
    /// Player character
    pub player: You,

    pub options: QuiverOptions,

    /// Currently quivered action
    pub quiver: ActionCycler,

    /// Last-used ammunition per launcher category
    pub history: History,

    /// Messages for the current turn
    pub messages: Vec<String>,
}

impl GameState {
    pub fn new(player: You, options: QuiverOptions) -> Self {
        Self {
            player,
            options,
            ..Default::default()
        }
    }

    /// Add a message to display
    pub fn message(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Status-line text for the quiver
    pub fn quiver_description(&self) -> FormattedString {
        let env = QuiverEnv::new(&self.player, &self.options);
        self.quiver.get().quiver_description(env)
    }

    /// The quiver command: pick an inventory item to quiver
    pub fn choose_quiver(&mut self, prompt: &mut impl Prompt) {
        if !self.player.species.can_throw() {
            self.message(CANT_GRASP_MSG);
            return;
        }

        let env = QuiverEnv::new(&self.player, &self.options);
        match prompt.prompt_invent_item(QUIVER_PROMPT) {
            PromptResult::Aborted => {}
            PromptResult::Special => {
                let category = ammo_category_of(env.weapon());
                self.quiver.clear(env, &mut self.history);
                self.history.empty_quiver(category);
                self.message("Clearing quiver.");
            }
            PromptResult::Slot(slot) if self.player.is_worn(slot) => {
                self.message("You can't quiver worn items.");
            }
            PromptResult::Slot(slot) => {
                self.quiver.set_from_slot(env, &mut self.history, slot);
            }
        }
    }

    /// Cycle the quiver; returns whether it changed
    pub fn cycle_quiver(&mut self, dir: CycleDir) -> bool {
        let env = QuiverEnv::new(&self.player, &self.options);
        self.quiver.cycle(env, &mut self.history, dir)
    }

    /// The fire command: trigger the quivered action.
    ///
    /// Returns whether the action happened. An invalid or inscription-blocked
    /// quiver only reports why; an aborted target changes nothing.
    pub fn fire(&mut self, prompt: &mut impl Prompt, effects: &mut impl Effects) -> bool {
        let env = QuiverEnv::new(&self.player, &self.options);
        let action = self.quiver.get();
        if !action.is_valid(env) {
            let reason = action.quiver_description(env).plain();
            self.message(reason);
            return false;
        }
        // Spells are left to the caster.
        if action.item_slot().is_some() && !action.is_enabled(env) {
            self.message(FIRE_BLOCKED_MSG);
            return false;
        }

        let mut target = if action.is_targeted() {
            let Some(target) = prompt.choose_target(action) else {
                debug!("Firing aborted");
                return false;
            };
            target
        } else {
            Target::default()
        };

        let slot = action.item_slot();
        let fired = slot.and_then(|s| self.player.inventory.get(s)).cloned();

        if !self
            .quiver
            .trigger(&mut self.player, &self.options, effects, &mut target)
        {
            return false;
        }

        if let (Some(slot), Some(item)) = (slot, fired) {
            self.on_item_fired(&item, true);
            self.on_inv_quantity_changed(slot);
        }
        true
    }

    /// Wield the item in `slot` (or nothing) and let the quiver follow
    pub fn wield(&mut self, slot: Option<usize>) {
        self.player.wield(slot);
        self.on_weapon_changed();
    }

    pub fn on_weapon_changed(&mut self) {
        let env = QuiverEnv::new(&self.player, &self.options);
        self.history.on_weapon_changed(env, &mut self.quiver);
    }

    pub fn on_item_fired(&mut self, item: &Item, explicitly_chosen: bool) {
        let env = QuiverEnv::new(&self.player, &self.options);
        self.history.on_item_fired(env, item, explicitly_chosen);
    }

    pub fn on_inv_quantity_changed(&mut self, slot: usize) {
        let env = QuiverEnv::new(&self.player, &self.options);
        self.history.on_inv_quantity_changed(env, &mut self.quiver, slot);
    }

    /// Re-check the quiver after anything that may have invalidated it
    pub fn on_actions_changed(&mut self) {
        let env = QuiverEnv::new(&self.player, &self.options);
        self.quiver.on_actions_changed(env, &mut self.history);
    }

    /// Record of the quivered action
    pub fn save_quiver(&self) -> Value {
        self.quiver.save()
    }

    /// Restore the quivered action; call after the inventory is in place
    pub fn load_quiver(&mut self, record: &Value) {
        let env = QuiverEnv::new(&self.player, &self.options);
        self.quiver.load(env, &mut self.history, record);
    }

    pub fn save_history(&self, out: &mut impl BufMut) {
        self.history.save(out);
    }

    pub fn load_history(&mut self, inp: &mut impl Buf) -> Result<(), SaveError> {
        self.history.load(inp)
    }
}

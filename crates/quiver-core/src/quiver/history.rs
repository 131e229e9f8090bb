//! Quiver history
//!
//! Remembers the last item quivered for each ammunition category so the
//! quiver can follow the player's weapon: swap to a bow and the arrows
//! used last time come back.

use bytes::{Buf, BufMut};
use strum::EnumCount;
use tracing::debug;

use super::{ActionCycler, QuiverEnv, find_action_from_launcher};
use crate::object::{
    AmmoCategory, Inventory, Item, LaunchResult, SKIP_FIRE_AUTO, ammo_category_of, is_launched,
};
use crate::world::save::{SaveError, ensure_remaining, marshall_item, read_i32, unmarshall_item};

/// Leading marker of the history record
pub const QUIVER_COOKIE: u16 = 0xb015;

/// Last-used ammunition per category
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct History {
    last_used_type: AmmoCategory,
    /// Snapshots with quantity 1, or quantity 0 once cleared
    last_used_of_type: [Item; AmmoCategory::COUNT],
    redraw: bool,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Category of the most recent quiver change
    pub fn last_used_type(&self) -> AmmoCategory {
        self.last_used_type
    }

    /// Remembered snapshot for a category
    pub fn last_used(&self, category: AmmoCategory) -> &Item {
        &self.last_used_of_type[category.index()]
    }

    /// Slot now holding the item remembered for `category`
    pub fn get_last_ammo(&self, inv: &Inventory, category: AmmoCategory) -> Option<usize> {
        pack_slot(inv, self.last_used(category))
    }

    /// Slot now holding the item remembered for the launcher's category
    pub fn get_last_ammo_for(&self, inv: &Inventory, launcher: Option<&Item>) -> Option<usize> {
        self.get_last_ammo(inv, ammo_category_of(launcher))
    }

    /// Slot now holding the item remembered for the current category
    pub fn get_last_ammo_current(&self, inv: &Inventory) -> Option<usize> {
        self.get_last_ammo(inv, self.last_used_type)
    }

    /// Remember `item` as the choice for `category`
    pub fn set_quiver(&mut self, item: &Item, category: AmmoCategory) {
        debug!("Quivering {} for {}", item.name(), category.name());
        self.remember(item, category);
        self.redraw = true;
    }

    /// Forget the choice for `category`
    pub fn empty_quiver(&mut self, category: AmmoCategory) {
        debug!("Emptying quiver for {}", category.name());
        self.last_used_of_type[category.index()] = Item::default();
        self.last_used_type = category;
        self.redraw = true;
    }

    fn remember(&mut self, item: &Item, category: AmmoCategory) {
        let mut snapshot = item.clone();
        snapshot.quantity = 1;
        self.last_used_of_type[category.index()] = snapshot;
        self.last_used_type = category;
    }

    /// Note that `item` was just fired. Only explicit choices are learned
    /// from; automatic picks leave the history alone.
    pub fn on_item_fired(&mut self, env: QuiverEnv<'_>, item: &Item, explicitly_chosen: bool) {
        self.redraw = true;
        if !explicitly_chosen {
            return;
        }

        let weapon = env.weapon();
        match weapon {
            Some(launcher) if item.launched_by(launcher) => {
                self.remember(item, ammo_category_of(weapon));
            }
            _ => {
                if is_launched(env.you, weapon, item) == LaunchResult::Fumbled {
                    return;
                }
                debug!("{} is for throwing", item.name());
                self.remember(item, AmmoCategory::Throw);
            }
        }
    }

    /// The wielded weapon changed. The quiver follows only when the
    /// ammunition category changes with it.
    pub fn on_weapon_changed(&mut self, env: QuiverEnv<'_>, cycler: &mut ActionCycler) {
        let weapon = env.weapon();
        let category = ammo_category_of(weapon);
        if self.last_used_type == category {
            return;
        }
        debug!(
            "Weapon category changed from {} to {}",
            self.last_used_type.name(),
            category.name()
        );
        let action = find_action_from_launcher(env, self, weapon);
        cycler.set(env, self, action);
    }

    /// An inventory stack changed size or appeared. Refills an invalid
    /// quiver when a replacement has turned up.
    pub fn on_inv_quantity_changed(
        &mut self,
        env: QuiverEnv<'_>,
        cycler: &mut ActionCycler,
        slot: usize,
    ) {
        if !cycler.get().is_valid(env) {
            let replacement = cycler.get().find_replacement(env, self);
            if replacement.is_valid(env) {
                cycler.set(env, self, replacement);
            }
            self.redraw = true;
        } else if cycler.get().item_slot() == Some(slot) {
            self.redraw = true;
        }
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Clear and return the redraw request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Write the history record
    pub fn save(&self, out: &mut impl BufMut) {
        out.put_u16(QUIVER_COOKIE);
        // legacy weapon snapshot, always empty
        marshall_item(out, &Item::default());
        out.put_i32(self.last_used_type as i32);
        out.put_i32(AmmoCategory::COUNT as i32);
        for item in &self.last_used_of_type {
            marshall_item(out, item);
        }
    }

    /// Read a record written by [`History::save`]. Nothing changes unless
    /// the whole record decodes.
    pub fn load(&mut self, inp: &mut impl Buf) -> Result<(), SaveError> {
        ensure_remaining(inp, 2)?;
        let cookie = inp.get_u16();
        if cookie != QUIVER_COOKIE {
            return Err(SaveError::BadCookie {
                expected: QUIVER_COOKIE,
                found: cookie,
            });
        }

        unmarshall_item(inp)?;

        let raw_type = read_i32(inp)?;
        let last_used_type =
            AmmoCategory::from_repr(raw_type).ok_or(SaveError::CategoryOutOfRange(raw_type))?;

        let count = read_i32(inp)?;
        let count = usize::try_from(count)
            .ok()
            .filter(|&n| n <= AmmoCategory::COUNT)
            .ok_or(SaveError::CountTooLarge {
                count,
                max: AmmoCategory::COUNT,
            })?;

        let mut last_used_of_type = self.last_used_of_type.clone();
        for entry in last_used_of_type.iter_mut().take(count) {
            *entry = unmarshall_item(inp)?;
        }

        self.last_used_type = last_used_type;
        self.last_used_of_type = last_used_of_type;
        Ok(())
    }
}

/// Same item as the snapshot: similar and under the same letter
fn same_item(wanted: &Item, item: &Item) -> bool {
    wanted.similar_to(item) && wanted.inv_letter == item.inv_letter
}

/// Find the live inventory slot for a remembered snapshot
fn pack_slot(inv: &Inventory, wanted: &Item) -> Option<usize> {
    if !wanted.is_defined() {
        return None;
    }

    if let Some(slot) = wanted
        .link
        .filter(|&slot| inv.get(slot).is_some_and(|item| same_item(wanted, item)))
    {
        return Some(slot);
    }

    if let Some((slot, _)) = inv.iter().find(|(_, item)| same_item(wanted, item)) {
        return Some(slot);
    }

    // A merely similar item stays out if it was inscribed out of the order.
    let (slot, item) = inv.iter().find(|(_, item)| wanted.similar_to(item))?;
    if item.has_inscription(SKIP_FIRE_AUTO) {
        return None;
    }
    Some(slot)
}

//! Player character state

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::magic::Spellbook;
use crate::object::{ENDOFPACK, Inventory, Item};

/// Refusal for species without hands fit for throwing
pub const CANT_GRASP_MSG: &str = "You can't grasp things well enough to throw them.";

/// Body size classes, smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodySize {
    Little,
    Small,
    Medium,
    Large,
}

/// Playable species
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Species {
    #[default]
    Human,
    Felid,
    Ogre,
    Troll,
    Kobold,
    Spriggan,
    Minotaur,
}

impl Species {
    /// Whether the species can hold and throw things at all
    pub const fn can_throw(&self) -> bool {
        !matches!(self, Species::Felid)
    }

    pub const fn can_throw_large_rocks(&self) -> bool {
        matches!(self, Species::Ogre | Species::Troll)
    }

    pub const fn body_size(&self) -> BodySize {
        match self {
            Species::Felid | Species::Spriggan => BodySize::Little,
            Species::Kobold => BodySize::Small,
            Species::Ogre | Species::Troll => BodySize::Large,
            Species::Human | Species::Minotaur => BodySize::Medium,
        }
    }
}

/// The player character
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct You {
    pub species: Species,

    /// Caught in a net or similar; nothing can be launched
    pub held: bool,

    pub inventory: Inventory,

    /// Slot of the wielded weapon
    pub weapon_slot: Option<usize>,

    /// Slots of worn armour and jewellery
    pub worn: Vec<usize>,

    pub spells: Spellbook,
}

impl You {
    pub fn new(species: Species) -> Self {
        Self {
            species,
            ..Default::default()
        }
    }

    /// The wielded weapon, if the slot still holds an item
    pub fn weapon(&self) -> Option<&Item> {
        self.weapon_slot.and_then(|slot| self.inventory.get(slot))
    }

    /// Wield whatever is in `slot`; `None` or an empty slot means bare hands
    pub fn wield(&mut self, slot: Option<usize>) {
        self.weapon_slot = slot.filter(|&s| s < ENDOFPACK && self.inventory.is_defined(s));
    }

    pub fn is_worn(&self, slot: usize) -> bool {
        self.worn.contains(&slot)
    }

    /// Why nothing can be fired at the moment, if that is the case
    pub fn fire_impossible_reason(&self) -> Option<&'static str> {
        if !self.species.can_throw() {
            Some(CANT_GRASP_MSG)
        } else if self.held {
            Some("You cannot throw anything while caught in a net!")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::WeaponType;

    #[test]
    fn test_species_traits() {
        assert!(Species::Human.can_throw());
        assert!(!Species::Felid.can_throw());
        assert!(Species::Troll.can_throw_large_rocks());
        assert!(!Species::Minotaur.can_throw_large_rocks());
        assert!(Species::Kobold.body_size() < BodySize::Medium);
    }

    #[test]
    fn test_wield() {
        let mut you = You::new(Species::Human);
        you.inventory.put(0, Item::weapon(WeaponType::Shortbow));
        you.wield(Some(0));
        assert!(you.weapon().is_some());

        you.wield(Some(7));
        assert_eq!(you.weapon_slot, None);

        you.wield(Some(0));
        you.inventory.remove(0);
        assert!(you.weapon().is_none());
    }

    #[test]
    fn test_fire_impossible_reason() {
        let mut you = You::new(Species::Human);
        assert!(you.fire_impossible_reason().is_none());
        you.held = true;
        assert!(you.fire_impossible_reason().unwrap().contains("net"));
        let cat = You::new(Species::Felid);
        assert!(cat.fire_impossible_reason().unwrap().contains("grasp"));
    }
}

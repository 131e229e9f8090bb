//! Inventory storage
//!
//! A fixed pack of lettered slots. Quiver code only ever reads it; effect
//! execution (throwing, evoking) is what consumes items.

use serde::{Deserialize, Serialize};

use super::Item;

/// Number of inventory slots (a-z, A-Z)
pub const ENDOFPACK: usize = 52;

/// No inventory symbol
pub const NOINVSYM: char = '-';

/// Inventory letter for a slot index
pub fn index_to_letter(index: usize) -> char {
    match index {
        0..=25 => (b'a' + index as u8) as char,
        26..=51 => (b'A' + (index - 26) as u8) as char,
        _ => NOINVSYM,
    }
}

/// Slot index for an inventory letter
pub fn letter_to_index(letter: char) -> Option<usize> {
    match letter {
        'a'..='z' => Some(letter as usize - 'a' as usize),
        'A'..='Z' => Some(letter as usize - 'A' as usize + 26),
        _ => None,
    }
}

/// The player's pack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<Item>>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            slots: vec![None; ENDOFPACK],
        }
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defined item in a slot. Empty stacks count as undefined.
    pub fn get(&self, slot: usize) -> Option<&Item> {
        self.slots
            .get(slot)
            .and_then(Option::as_ref)
            .filter(|item| item.is_defined())
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Item> {
        self.slots
            .get_mut(slot)
            .and_then(Option::as_mut)
            .filter(|item| item.is_defined())
    }

    pub fn is_defined(&self, slot: usize) -> bool {
        self.get(slot).is_some()
    }

    /// Put an item into a specific slot, returning whatever was there.
    ///
    /// Out-of-range slots hand the item straight back.
    pub fn put(&mut self, slot: usize, mut item: Item) -> Option<Item> {
        if slot >= ENDOFPACK {
            return Some(item);
        }
        item.inv_letter = index_to_letter(slot);
        item.link = Some(slot);
        self.slots[slot].replace(item)
    }

    /// Add an item to the first free slot, returning the slot used
    pub fn add(&mut self, item: Item) -> Option<usize> {
        let slot = (0..ENDOFPACK).find(|&slot| !self.is_defined(slot))?;
        self.put(slot, item);
        Some(slot)
    }

    /// Take the item out of a slot
    pub fn remove(&mut self, slot: usize) -> Option<Item> {
        let mut item = self.slots.get_mut(slot)?.take()?;
        item.link = None;
        Some(item)
    }

    /// Change a stack size; dropping to zero empties the slot
    pub fn set_quantity(&mut self, slot: usize, quantity: i32) {
        if quantity <= 0 {
            self.remove(slot);
        } else if let Some(item) = self.get_mut(slot) {
            item.quantity = quantity;
        }
    }

    /// Defined items in slot order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, item)| item.as_ref().filter(|i| i.is_defined()).map(|i| (slot, i)))
    }

    /// Number of occupied slots
    pub fn slot_count(&self) -> usize {
        self.iter().count()
    }
}

//! Object system
//!
//! Items, the inventory that holds them, and how they can be launched.

pub mod inventory;
mod item;
pub mod launch;

pub use inventory::{ENDOFPACK, Inventory, index_to_letter, letter_to_index};
pub use item::{
    Brand, INCLUDE_FIRE_AUTO, INCLUDE_FIRE_MANUAL, Item, ItemFlags, ItemKind, MissileType,
    SKIP_FIRE_AUTO, SKIP_FIRE_MANUAL, WandType, WeaponType,
};
pub use launch::{AmmoCategory, LaunchResult, ammo_category_of, is_launched, is_throwable};

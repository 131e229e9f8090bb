//! Launch classification
//!
//! Decides how an item leaves the player's hand: fired from the wielded
//! launcher, thrown, or not usable as a missile at all.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, FromRepr};

use super::{Item, ItemKind, MissileType};
use crate::player::{BodySize, You};

/// How an item would be projected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum LaunchResult {
    /// Not fit for throwing, even by hand
    Fumbled,
    /// Thrown by hand
    Thrown,
    /// Fired from the given launcher
    Launched,
}

/// Ammunition category, one per launcher family
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
    FromRepr,
)]
#[repr(i32)]
pub enum AmmoCategory {
    #[default]
    Throw = 0,
    Sling = 1,
    Bow = 2,
    Crossbow = 3,
}

impl AmmoCategory {
    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub const fn name(&self) -> &'static str {
        match self {
            AmmoCategory::Throw => "throwing",
            AmmoCategory::Sling => "slings",
            AmmoCategory::Bow => "bows",
            AmmoCategory::Crossbow => "crossbows",
        }
    }
}

/// Ammunition category used by a wielded weapon.
///
/// No weapon, or anything that is not a launcher, means hand-throwing.
pub fn ammo_category_of(weapon: Option<&Item>) -> AmmoCategory {
    let Some(ItemKind::Weapon(weapon)) = weapon.map(|w| w.kind) else {
        return AmmoCategory::Throw;
    };
    match weapon.fires() {
        Some(MissileType::Stone) => AmmoCategory::Sling,
        Some(MissileType::Arrow) => AmmoCategory::Bow,
        Some(MissileType::Bolt) => AmmoCategory::Crossbow,
        _ => AmmoCategory::Throw,
    }
}

/// Whether the player could throw this item by hand
pub fn is_throwable(you: &You, item: &Item) -> bool {
    let ItemKind::Missile(missile) = item.kind else {
        return false;
    };
    match missile {
        MissileType::LargeRock => you.species.can_throw_large_rocks(),
        MissileType::Javelin if you.species.body_size() < BodySize::Medium => false,
        _ => missile.hand_throwable(),
    }
}

/// Classify how `item` would be projected given an optional launcher
pub fn is_launched(you: &You, launcher: Option<&Item>, item: &Item) -> LaunchResult {
    if item.is_missile() && launcher.is_some_and(|l| item.launched_by(l)) {
        return LaunchResult::Launched;
    }
    if is_throwable(you, item) {
        LaunchResult::Thrown
    } else {
        LaunchResult::Fumbled
    }
}

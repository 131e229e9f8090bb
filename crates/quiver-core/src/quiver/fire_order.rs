//! Fire order: which inventory items qualify as missiles, and in what order

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::{CycleDir, QuiverEnv};
use crate::object::{
    AmmoCategory, INCLUDE_FIRE_AUTO, INCLUDE_FIRE_MANUAL, Item, ItemKind, LaunchResult,
    MissileType, SKIP_FIRE_AUTO, SKIP_FIRE_MANUAL, ammo_category_of, is_launched,
};

bitflags! {
    /// Fire-order categories. One configured entry may combine several.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct FireType: u32 {
        /// Ammunition for the given launcher
        const LAUNCHER = 0x0001;
        const DART = 0x0002;
        const STONE = 0x0004;
        const ROCK = 0x0008;
        const JAVELIN = 0x0010;
        const NET = 0x0020;
        const BOOMERANG = 0x0040;
        /// Anything inscribed "+f" ("+F" for manual selection)
        const INSCRIBED = 0x0080;
    }
}

impl FireType {
    /// Parse a single category as written in option files
    pub fn from_option_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "launcher" => Some(FireType::LAUNCHER),
            "dart" => Some(FireType::DART),
            "stone" => Some(FireType::STONE),
            "rock" => Some(FireType::ROCK),
            "javelin" => Some(FireType::JAVELIN),
            "net" => Some(FireType::NET),
            "boomerang" => Some(FireType::BOOMERANG),
            "inscribed" => Some(FireType::INSCRIBED),
            _ => None,
        }
    }

    /// Option-file name of a single category
    pub fn option_name(&self) -> Option<&'static str> {
        match *self {
            FireType::LAUNCHER => Some("launcher"),
            FireType::DART => Some("dart"),
            FireType::STONE => Some("stone"),
            FireType::ROCK => Some("rock"),
            FireType::JAVELIN => Some("javelin"),
            FireType::NET => Some("net"),
            FireType::BOOMERANG => Some("boomerang"),
            FireType::INSCRIBED => Some("inscribed"),
            _ => None,
        }
    }

    /// Category a missile subtype belongs to, if it has its own
    fn for_missile(missile: MissileType) -> FireType {
        match missile {
            MissileType::Stone => FireType::STONE,
            MissileType::Javelin => FireType::JAVELIN,
            MissileType::LargeRock => FireType::ROCK,
            MissileType::ThrowingNet => FireType::NET,
            MissileType::Boomerang => FireType::BOOMERANG,
            MissileType::Dart => FireType::DART,
            MissileType::SlingBullet | MissileType::Arrow | MissileType::Bolt => FireType::empty(),
        }
    }
}

/// Whether `item` falls in any of the categories in `types`
pub fn item_matches(item: &Item, types: FireType, launcher: Option<&Item>, manual: bool) -> bool {
    if types.contains(FireType::INSCRIBED) {
        let marker = if manual {
            INCLUDE_FIRE_MANUAL
        } else {
            INCLUDE_FIRE_AUTO
        };
        if item.has_inscription(marker) {
            return true;
        }
    }

    let ItemKind::Missile(missile) = item.kind else {
        return false;
    };

    if types.intersects(FireType::for_missile(missile)) {
        return true;
    }

    types.contains(FireType::LAUNCHER) && launcher.is_some_and(|l| item.launched_by(l))
}

/// Inventory slots eligible for firing, best first.
///
/// With `ignore_inscription_etc` the skip inscriptions and the configured
/// starting slot are ignored; that listing only feeds error messages.
/// `launcher` decides what counts for the "launcher" category, and
/// `manual` selects the manual-mode inscription markers.
pub fn get_item_fire_order(
    env: QuiverEnv<'_>,
    ignore_inscription_etc: bool,
    launcher: Option<&Item>,
    manual: bool,
) -> Vec<usize> {
    // Nothing can be launched from inside a net.
    if env.you.held {
        return Vec::new();
    }

    let inv_start = if ignore_inscription_etc {
        0
    } else {
        env.options.fire_items_start
    };
    let skip_marker = if manual {
        SKIP_FIRE_MANUAL
    } else {
        SKIP_FIRE_AUTO
    };
    let real_launcher = ammo_category_of(launcher) != AmmoCategory::Throw;

    let mut order: Vec<(usize, usize)> = Vec::new();
    for (slot, item) in env.you.inventory.iter().filter(|&(slot, _)| slot >= inv_start) {
        let projected = is_launched(env.you, launcher, item);
        if projected == LaunchResult::Fumbled {
            continue;
        }

        // Running out of launcher ammo must not silently switch to throwing.
        if !manual && real_launcher && projected == LaunchResult::Thrown {
            continue;
        }

        if !ignore_inscription_etc && item.has_inscription(skip_marker) {
            continue;
        }

        if let Some(rank) = env
            .options
            .fire_order
            .iter()
            .position(|&types| item_matches(item, types, launcher, manual))
        {
            order.push((rank, slot));
        }
    }

    order.sort_unstable();
    order.into_iter().map(|(_, slot)| slot).collect()
}

/// Next slot in the manual fire order after `current`.
///
/// With no `current` this is the first (forward) or last (backward) entry.
/// A slot missing from the order sits just before the first entry, so
/// going backward from it needs `wrap`. Stepping off either end gives
/// `None` unless `wrap`.
pub fn get_next_fireable_item(
    env: QuiverEnv<'_>,
    current: Option<usize>,
    dir: CycleDir,
    wrap: bool,
) -> Option<usize> {
    let order = get_item_fire_order(env, false, env.weapon(), true);
    let len = order.len() as isize;

    let Some(current) = current else {
        return match dir {
            CycleDir::Forward => order.first().copied(),
            CycleDir::Backward => order.last().copied(),
        };
    };
    if len == 0 {
        return None;
    }

    let next = match order.iter().position(|&slot| slot == current) {
        Some(pos) => pos as isize + dir.step(),
        None => match dir {
            CycleDir::Forward => 0,
            CycleDir::Backward => -1,
        },
    };
    if !wrap && !(0..len).contains(&next) {
        return None;
    }
    Some(order[next.rem_euclid(len) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Item, WeaponType};
    use crate::player::{Species, You};
    use crate::world::QuiverOptions;

    fn you_with(items: &[(usize, Item)]) -> You {
        let mut you = You::new(Species::Human);
        for (slot, item) in items {
            you.inventory.put(*slot, item.clone());
        }
        you
    }

    #[test]
    fn test_item_matches_subtypes() {
        let dart = Item::missile(MissileType::Dart, 5);
        assert!(item_matches(&dart, FireType::DART, None, false));
        assert!(!item_matches(&dart, FireType::JAVELIN, None, false));
        assert!(item_matches(&dart, FireType::all(), None, false));

        let arrows = Item::missile(MissileType::Arrow, 5);
        let bow = Item::weapon(WeaponType::Longbow);
        assert!(!item_matches(&arrows, FireType::all().difference(FireType::LAUNCHER), Some(&bow), false));
        assert!(item_matches(&arrows, FireType::LAUNCHER, Some(&bow), false));
        assert!(!item_matches(&arrows, FireType::LAUNCHER, None, false));
    }

    #[test]
    fn test_item_matches_inscribed() {
        let sword = Item::weapon(WeaponType::ShortSword).with_inscription("+f");
        assert!(item_matches(&sword, FireType::INSCRIBED, None, false));
        assert!(!item_matches(&sword, FireType::INSCRIBED, None, true));
        let sword = sword.with_inscription("+F");
        assert!(item_matches(&sword, FireType::INSCRIBED, None, true));
        assert!(!item_matches(&sword, FireType::DART, None, true));
    }

    #[test]
    fn test_order_by_rank_then_slot() {
        let you = you_with(&[
            (3, Item::missile(MissileType::Dart, 4)),
            (5, Item::missile(MissileType::Javelin, 2)),
            (7, Item::missile(MissileType::Dart, 1)),
        ]);
        let mut options = QuiverOptions::default();
        options.fire_order = vec![FireType::JAVELIN, FireType::DART];
        let env = QuiverEnv::new(&you, &options);

        assert_eq!(get_item_fire_order(env, false, None, false), vec![5, 3, 7]);
    }

    #[test]
    fn test_unlisted_category_excluded() {
        let you = you_with(&[
            (0, Item::missile(MissileType::Stone, 4)),
            (1, Item::missile(MissileType::Dart, 4)),
        ]);
        let mut options = QuiverOptions::default();
        options.fire_order = vec![FireType::DART];
        let env = QuiverEnv::new(&you, &options);

        assert_eq!(get_item_fire_order(env, false, None, false), vec![1]);
    }

    #[test]
    fn test_held_in_net_gives_nothing() {
        let mut you = you_with(&[(0, Item::missile(MissileType::Dart, 4))]);
        you.held = true;
        let options = QuiverOptions::default();
        let env = QuiverEnv::new(&you, &options);
        assert!(get_item_fire_order(env, true, None, true).is_empty());
    }

    #[test]
    fn test_launcher_mode_skips_thrown_items_unless_manual() {
        let you = you_with(&[
            (0, Item::weapon(WeaponType::Shortbow)),
            (1, Item::missile(MissileType::Dart, 4)),
            (2, Item::missile(MissileType::Arrow, 20)),
        ]);
        let options = QuiverOptions::default();
        let env = QuiverEnv::new(&you, &options);
        let bow = you.inventory.get(0);

        assert_eq!(get_item_fire_order(env, false, bow, false), vec![2]);
        assert_eq!(get_item_fire_order(env, false, bow, true), vec![2, 1]);
    }

    #[test]
    fn test_skip_inscriptions_and_start() {
        let you = you_with(&[
            (0, Item::missile(MissileType::Dart, 4)),
            (1, Item::missile(MissileType::Dart, 4).with_inscription("=f")),
            (2, Item::missile(MissileType::Dart, 4).with_inscription("=F")),
        ]);
        let mut options = QuiverOptions::default();
        options.fire_items_start = 1;
        let env = QuiverEnv::new(&you, &options);

        assert_eq!(get_item_fire_order(env, false, None, false), vec![2]);
        assert_eq!(get_item_fire_order(env, false, None, true), vec![1]);
        assert_eq!(get_item_fire_order(env, true, None, false), vec![0, 1, 2]);
    }

    #[test]
    fn test_fumbled_items_skipped() {
        let you = you_with(&[
            (0, Item::missile(MissileType::LargeRock, 1)),
            (1, Item::missile(MissileType::Arrow, 4)),
        ]);
        let options = QuiverOptions::default();
        let env = QuiverEnv::new(&you, &options);
        assert!(get_item_fire_order(env, true, None, true).is_empty());
    }

    #[test]
    fn test_next_fireable_item() {
        let you = you_with(&[
            (1, Item::missile(MissileType::Dart, 4)),
            (4, Item::missile(MissileType::Dart, 4)),
            (6, Item::missile(MissileType::Dart, 4)),
        ]);
        let options = QuiverOptions::default();
        let env = QuiverEnv::new(&you, &options);

        assert_eq!(get_next_fireable_item(env, None, CycleDir::Forward, false), Some(1));
        assert_eq!(get_next_fireable_item(env, None, CycleDir::Backward, false), Some(6));
        assert_eq!(get_next_fireable_item(env, Some(1), CycleDir::Forward, false), Some(4));
        assert_eq!(get_next_fireable_item(env, Some(6), CycleDir::Forward, false), None);
        assert_eq!(get_next_fireable_item(env, Some(6), CycleDir::Forward, true), Some(1));
        assert_eq!(get_next_fireable_item(env, Some(1), CycleDir::Backward, false), None);
        assert_eq!(get_next_fireable_item(env, Some(1), CycleDir::Backward, true), Some(6));
        // not in the order at all
        assert_eq!(get_next_fireable_item(env, Some(30), CycleDir::Forward, false), Some(1));
        assert_eq!(get_next_fireable_item(env, Some(30), CycleDir::Backward, false), None);
        assert_eq!(get_next_fireable_item(env, Some(30), CycleDir::Backward, true), Some(6));
    }

    #[test]
    fn test_next_fireable_item_empty() {
        let you = You::new(Species::Human);
        let options = QuiverOptions::default();
        let env = QuiverEnv::new(&you, &options);
        assert_eq!(get_next_fireable_item(env, None, CycleDir::Forward, true), None);
        assert_eq!(get_next_fireable_item(env, Some(2), CycleDir::Backward, true), None);
    }
}

mod common;

use std::collections::HashSet;

use common::{env, learn, state_with};
use proptest::prelude::*;
use quiver_core::magic::SpellId;
use quiver_core::object::{Item, MissileType, WandType, WeaponType};
use quiver_core::quiver::{ActionKind, CycleDir, FireType, QuiverEnv, get_item_fire_order, item_matches};

fn missile() -> impl Strategy<Value = MissileType> {
    prop_oneof![
        Just(MissileType::Dart),
        Just(MissileType::Stone),
        Just(MissileType::Javelin),
        Just(MissileType::Boomerang),
        Just(MissileType::ThrowingNet),
        Just(MissileType::Arrow),
        Just(MissileType::SlingBullet),
        Just(MissileType::LargeRock),
    ]
}

/// Missiles that a human either throws or cannot use at all
fn hand_missile() -> impl Strategy<Value = MissileType> {
    prop_oneof![
        Just(MissileType::Dart),
        Just(MissileType::Stone),
        Just(MissileType::Javelin),
        Just(MissileType::Boomerang),
        Just(MissileType::ThrowingNet),
        Just(MissileType::Arrow),
    ]
}

fn launcher() -> impl Strategy<Value = Option<WeaponType>> {
    prop_oneof![
        Just(None),
        Just(Some(WeaponType::HuntingSling)),
        Just(Some(WeaponType::Longbow)),
        Just(Some(WeaponType::Arbalest)),
        Just(Some(WeaponType::Club)),
    ]
}

fn fire_order() -> impl Strategy<Value = Vec<FireType>> {
    Just(vec![
        FireType::LAUNCHER,
        FireType::DART,
        FireType::STONE,
        FireType::ROCK,
        FireType::JAVELIN,
        FireType::NET,
        FireType::BOOMERANG,
        FireType::INSCRIBED,
    ])
    .prop_shuffle()
    .prop_flat_map(|order| {
        let len = order.len();
        (Just(order), 1..=len)
    })
    .prop_map(|(mut order, keep)| {
        order.truncate(keep);
        order
    })
}

proptest! {
    #[test]
    fn fire_order_is_unique_and_sorted(
        pack in prop::collection::btree_map(1usize..52, (missile(), 1i32..20), 0..16),
        weapon in launcher(),
        order in fire_order(),
        manual in any::<bool>(),
    ) {
        let items: Vec<(usize, Item)> = pack
            .iter()
            .map(|(&slot, &(kind, qty))| (slot, Item::missile(kind, qty)))
            .collect();
        let mut state = state_with(&items);
        if let Some(weapon) = weapon {
            state.player.inventory.put(0, Item::weapon(weapon));
            state.player.wield(Some(0));
        }
        state.options.fire_order = order.clone();

        let env = env(&state);
        let launcher = env.weapon();
        let result = get_item_fire_order(env, false, launcher, manual);

        let unique: HashSet<usize> = result.iter().copied().collect();
        prop_assert_eq!(unique.len(), result.len());

        let rank = |slot: usize| {
            let item = state.player.inventory.get(slot);
            order.iter().position(|&types| {
                item.is_some_and(|item| item_matches(item, types, launcher, manual))
            })
        };
        let keys: Vec<(Option<usize>, usize)> = result.iter().map(|&slot| (rank(slot), slot)).collect();
        prop_assert!(keys.iter().all(|(rank, _)| rank.is_some()));
        prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn cycling_visits_every_valid_action_once(
        pack in prop::collection::btree_map(0usize..52, (hand_missile(), any::<bool>()), 0..10),
        spells in prop::sample::subsequence(
            vec![SpellId::MAGIC_DART, SpellId::FREEZE, SpellId::BLINK, SpellId::STONE_ARROW],
            0..=4,
        ),
    ) {
        let items: Vec<(usize, Item)> = pack
            .iter()
            .map(|(&slot, &(kind, is_wand))| {
                let item = if is_wand {
                    Item::wand(WandType::Flame)
                } else {
                    Item::missile(kind, 3)
                };
                (slot, item)
            })
            .collect();
        let mut state = state_with(&items);
        learn(&mut state.player, &spells);

        let expected: HashSet<ActionKind> = {
            let env = QuiverEnv::new(&state.player, &state.options);
            let ammo = get_item_fire_order(env, false, None, true)
                .into_iter()
                .map(|slot| ActionKind::Ammo(Some(slot)));
            let wands = items
                .iter()
                .filter(|(_, item)| item.is_wand())
                .map(|&(slot, _)| ActionKind::Wand(Some(slot)));
            let spells = spells.iter().map(|&spell| ActionKind::Spell(spell));
            ammo.chain(wands).chain(spells).collect()
        };

        state.cycle_quiver(CycleDir::Forward);
        let start = state.quiver.get().kind();
        if expected.is_empty() {
            prop_assert_eq!(start, ActionKind::None);
            return Ok(());
        }

        let mut seen = vec![start];
        for _ in 1..expected.len() {
            state.cycle_quiver(CycleDir::Forward);
            seen.push(state.quiver.get().kind());
        }
        let distinct: HashSet<ActionKind> = seen.iter().copied().collect();
        prop_assert_eq!(distinct, expected);

        state.cycle_quiver(CycleDir::Forward);
        prop_assert_eq!(state.quiver.get().kind(), start);
    }

    #[test]
    fn unexplicit_fires_leave_history_alone(
        pack in prop::collection::btree_map(0usize..52, (missile(), 1i32..5), 1..8),
        weapon in launcher(),
    ) {
        let items: Vec<(usize, Item)> = pack
            .iter()
            .map(|(&slot, &(kind, qty))| (slot, Item::missile(kind, qty)))
            .collect();
        let mut state = state_with(&items);
        if let Some(weapon) = weapon {
            state.player.inventory.put(51, Item::weapon(weapon));
            state.player.wield(Some(51));
        }
        state.cycle_quiver(CycleDir::Forward);
        state.history.take_redraw();

        let before = state.history.clone();
        for (_, item) in &items {
            state.on_item_fired(item, false);
        }

        prop_assert!(state.history.take_redraw());
        prop_assert_eq!(&state.history, &before);
    }
}

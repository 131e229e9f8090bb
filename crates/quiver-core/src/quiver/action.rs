//! Quiver actions
//!
//! What happens when the fire key is pressed: fire ammunition from a slot,
//! cast a memorised spell, zap a wand, or nothing at all. Actions are small
//! values; the cycler replaces the one it holds rather than editing it.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum::{Display, EnumIter, EnumString};
use tracing::warn;

use super::fire_order::{get_item_fire_order, get_next_fireable_item, item_matches};
use super::{CycleDir, FireType, FormattedString, History, QuiverEnv};
use crate::data::colors::{CLR_DARK_GRAY, CLR_LIGHT_GRAY};
use crate::magic::{SPELL_LETTERS, SpellFlags, SpellId, is_valid_spell, spell_flags, spell_title};
use crate::object::{ENDOFPACK, Inventory, Item, LaunchResult, index_to_letter, is_launched};
use crate::player::{CANT_GRASP_MSG, You};
use crate::world::QuiverOptions;

/// Where the last trigger was aimed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Target {
    /// Map position aimed at, if a point was chosen
    pub pos: Option<(i32, i32)>,
    /// Direction, when aimed along a line
    pub delta: (i32, i32),
    /// Aimed at the player
    pub is_me: bool,
}

impl Target {
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            pos: Some((x, y)),
            ..Default::default()
        }
    }
}

/// Effect execution, supplied by the combat and magic code.
///
/// Each call returns whether the effect actually happened (and took a
/// turn). Implementations may consume inventory and may adjust `target`.
pub trait Effects {
    fn throw_item(&mut self, you: &mut You, slot: usize, target: &mut Target) -> bool;
    fn cast_spell(&mut self, you: &mut You, spell: SpellId, target: &mut Target) -> bool;
    fn evoke_item(&mut self, you: &mut You, slot: usize, target: &mut Target) -> bool;
}

/// Action family; the string forms are the saved record type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum ActionType {
    #[strum(serialize = "action")]
    None,
    #[strum(serialize = "ammo_action")]
    Ammo,
    #[strum(serialize = "spell_action")]
    Spell,
    #[strum(serialize = "wand_action")]
    Wand,
}

/// Action identity: family plus key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionKind {
    #[default]
    None,
    /// Fire or throw the item in an inventory slot
    Ammo(Option<usize>),
    Spell(SpellId),
    /// Zap the wand in an inventory slot
    Wand(Option<usize>),
}

impl ActionKind {
    pub const fn action_type(&self) -> ActionType {
        match self {
            ActionKind::None => ActionType::None,
            ActionKind::Ammo(_) => ActionType::Ammo,
            ActionKind::Spell(_) => ActionType::Spell,
            ActionKind::Wand(_) => ActionType::Wand,
        }
    }
}

/// A quiverable action
#[derive(Debug, Clone, Default)]
pub struct Action {
    kind: ActionKind,
    /// Aim of the last trigger
    pub target: Target,
    /// Why no ammunition could be found, when this came out of a failed
    /// launcher lookup
    pub error: Option<String>,
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Action {}

impl From<ActionKind> for Action {
    fn from(kind: ActionKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }
}

impl Action {
    /// The null action
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ammo(slot: Option<usize>) -> Self {
        ActionKind::Ammo(slot).into()
    }

    pub fn spell(spell: SpellId) -> Self {
        ActionKind::Spell(spell).into()
    }

    pub fn wand(slot: Option<usize>) -> Self {
        ActionKind::Wand(slot).into()
    }

    fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn action_type(&self) -> ActionType {
        self.kind.action_type()
    }

    /// Inventory slot backing this action, if any
    pub fn item_slot(&self) -> Option<usize> {
        match self.kind {
            ActionKind::Ammo(slot) | ActionKind::Wand(slot) => slot,
            ActionKind::None | ActionKind::Spell(_) => None,
        }
    }

    /// Whether the action refers to something that exists and can be used
    pub fn is_valid(&self, env: QuiverEnv<'_>) -> bool {
        match self.kind {
            ActionKind::None => false,
            ActionKind::Ammo(slot) => {
                if !env.you.species.can_throw() {
                    return false;
                }
                slot.filter(|&s| s < ENDOFPACK)
                    .and_then(|s| env.you.inventory.get(s))
                    .is_some_and(|ammo| item_matches(ammo, FireType::all(), env.weapon(), false))
            }
            ActionKind::Spell(spell) => is_valid_spell(spell) && env.you.spells.has_spell(spell),
            ActionKind::Wand(slot) => slot
                .filter(|&s| s < ENDOFPACK)
                .and_then(|s| env.you.inventory.get(s))
                .is_some_and(Item::is_wand),
        }
    }

    /// Valid and not blocked by a warning inscription or uselessness
    pub fn is_enabled(&self, env: QuiverEnv<'_>) -> bool {
        if !self.is_valid(env) {
            return false;
        }
        match self.kind {
            ActionKind::Ammo(Some(slot)) => {
                let Some(ammo) = env.you.inventory.get(slot) else {
                    return false;
                };
                if ammo.warns_on_fire() {
                    return false;
                }
                match env.weapon() {
                    Some(launcher)
                        if is_launched(env.you, Some(launcher), ammo) == LaunchResult::Launched =>
                    {
                        !launcher.warns_on_fire()
                    }
                    _ => true,
                }
            }
            ActionKind::Spell(spell) => !env.you.spells.is_useless(spell),
            ActionKind::Wand(_) => true,
            ActionKind::Ammo(None) | ActionKind::None => false,
        }
    }

    /// Whether triggering needs a target
    pub fn is_targeted(&self) -> bool {
        match self.kind {
            ActionKind::Ammo(_) | ActionKind::Wand(_) => true,
            ActionKind::Spell(spell) => spell_flags(spell).intersects(SpellFlags::TARGETING_MASK),
            ActionKind::None => false,
        }
    }

    /// Forget the last aim
    pub fn reset(&mut self) {
        self.target = Target::default();
    }

    /// Perform the action at `target`. The aim used is written back to
    /// `target`. Returns whether anything happened.
    pub fn trigger(
        &mut self,
        you: &mut You,
        options: &QuiverOptions,
        effects: &mut impl Effects,
        target: &mut Target,
    ) -> bool {
        let env = QuiverEnv::new(you, options);
        let valid = self.is_valid(env);
        let enabled = self.is_enabled(env);

        let done = match self.kind {
            ActionKind::Ammo(Some(slot)) => {
                self.target = *target;
                if !enabled {
                    return false;
                }
                effects.throw_item(you, slot, &mut self.target)
            }
            // The caster does its own usefulness checks and messaging.
            ActionKind::Spell(spell) => {
                if !valid {
                    return false;
                }
                self.target = *target;
                effects.cast_spell(you, spell, &mut self.target)
            }
            ActionKind::Wand(Some(slot)) => {
                self.target = *target;
                if !enabled {
                    return false;
                }
                effects.evoke_item(you, slot, &mut self.target)
            }
            ActionKind::Ammo(None) | ActionKind::Wand(None) | ActionKind::None => return false,
        };

        *target = self.target;
        done
    }

    /// Status-line summary
    pub fn quiver_description(&self, env: QuiverEnv<'_>) -> FormattedString {
        if !self.is_valid(env) {
            if self.action_type() == ActionType::Ammo {
                if env.you.fire_impossible_reason().is_some() {
                    return FormattedString::dimmed("Quiver unavailable");
                }
                if let Some(error) = &self.error {
                    return FormattedString::dimmed(error);
                }
            }
            return FormattedString::dimmed("Nothing quivered");
        }

        let mut desc = FormattedString::new();
        desc.textcolour(env.options.status_caption_colour);
        match self.kind {
            ActionKind::Ammo(Some(slot)) | ActionKind::Wand(Some(slot)) => {
                let Some(item) = env.you.inventory.get(slot) else {
                    return FormattedString::dimmed("Nothing quivered");
                };
                let verb = if item.is_wand() {
                    "Zap"
                } else {
                    match is_launched(env.you, env.weapon(), item) {
                        LaunchResult::Fumbled => "Toss",
                        LaunchResult::Launched => "Fire",
                        LaunchResult::Thrown => "Throw",
                    }
                };
                let letter = item.link.unwrap_or(slot);
                desc.push_str(&format!("{verb}: {}) ", index_to_letter(letter)));
                desc.textcolour(if self.is_enabled(env) {
                    CLR_LIGHT_GRAY
                } else {
                    CLR_DARK_GRAY
                });
                desc.push_str(&item.name());
            }
            ActionKind::Spell(spell) => {
                desc.push_str("Cast: ");
                desc.textcolour(if self.is_enabled(env) {
                    CLR_LIGHT_GRAY
                } else {
                    CLR_DARK_GRAY
                });
                desc.push_str(spell_title(spell));
            }
            ActionKind::Ammo(None) | ActionKind::Wand(None) | ActionKind::None => {
                return FormattedString::dimmed("Nothing quivered");
            }
        }
        desc
    }

    /// Substitute to use once this action has become invalid
    pub fn find_replacement(&self, env: QuiverEnv<'_>, history: &History) -> Action {
        match self.kind {
            ActionKind::Ammo(_) | ActionKind::Wand(_) => {
                find_action_from_launcher(env, history, env.weapon())
            }
            ActionKind::Spell(_) | ActionKind::None => Action::none(),
        }
    }

    /// Next action of the same family. The result may be invalid when the
    /// family has nothing left in that direction.
    pub fn find_next(&self, env: QuiverEnv<'_>, dir: CycleDir, wrap: bool) -> Action {
        match self.kind {
            ActionKind::None => Action::none(),
            ActionKind::Ammo(slot) => Action::ammo(get_next_fireable_item(env, slot, dir, wrap)),
            ActionKind::Spell(spell) => {
                let mut next = next_castable_spell(env, spell, dir);
                if wrap && next.is_none() {
                    next = next_castable_spell(env, SpellId::NONE, dir);
                }
                Action::spell(next)
            }
            ActionKind::Wand(slot) => Action::wand(next_wand(&env.you.inventory, slot, dir, wrap)),
        }
    }

    /// Persistent record: `{"type": ..., "param": ...}`
    pub fn to_record(&self) -> Value {
        let param: i64 = match self.kind {
            ActionKind::Ammo(slot) | ActionKind::Wand(slot) => slot.map_or(-1, |s| s as i64),
            ActionKind::Spell(spell) => i64::from(spell.0),
            ActionKind::None => -1,
        };
        json!({
            "type": self.action_type().to_string(),
            "param": param,
        })
    }

    /// Rebuild an action from [`Action::to_record`] output. Anything
    /// unrecognisable gives the null action.
    pub fn from_record(record: &Value) -> Action {
        let type_name = record.get("type").and_then(Value::as_str);
        let param = record.get("param").and_then(Value::as_i64);
        let (Some(type_name), Some(param)) = (type_name, param) else {
            warn!("Quiver action record is incomplete: {}", record);
            return Action::none();
        };

        let slot = usize::try_from(param).ok();
        match type_name.parse::<ActionType>() {
            Ok(ActionType::Ammo) => Action::ammo(slot),
            Ok(ActionType::Spell) => {
                Action::spell(u16::try_from(param).map_or(SpellId::NONE, SpellId))
            }
            Ok(ActionType::Wand) => Action::wand(slot),
            Ok(ActionType::None) => Action::none(),
            Err(_) => {
                warn!("Unknown quiver action type {:?}", type_name);
                Action::none()
            }
        }
    }
}

/// Next memorised spell in letter order that is safe enough to quiver
fn next_castable_spell(env: QuiverEnv<'_>, current: SpellId, dir: CycleDir) -> SpellId {
    let spells = &env.you.spells;
    let start = match spells.index_of(current) {
        Some(index) => index as isize + dir.step(),
        None => match dir {
            CycleDir::Forward => 0,
            CycleDir::Backward => SPELL_LETTERS as isize - 1,
        },
    };

    let mut index = start;
    while (0..SPELL_LETTERS as isize).contains(&index) {
        let spell = spells.spell_by_index(index as usize);
        if is_valid_spell(spell) && spells.fail_severity(spell) < env.options.fail_severity_to_quiver
        {
            return spell;
        }
        index += dir.step();
    }
    SpellId::NONE
}

/// Next wand slot in slot order
fn next_wand(inv: &Inventory, current: Option<usize>, dir: CycleDir, wrap: bool) -> Option<usize> {
    let zap_order: Vec<usize> = inv
        .iter()
        .filter(|(_, item)| item.is_wand())
        .map(|(slot, _)| slot)
        .collect();

    let pos = current.and_then(|c| zap_order.iter().position(|&slot| slot == c));
    let Some(pos) = pos else {
        return match dir {
            CycleDir::Forward => zap_order.first().copied(),
            CycleDir::Backward => zap_order.last().copied(),
        };
    };

    let len = zap_order.len() as isize;
    let next = pos as isize + dir.step();
    if !wrap && !(0..len).contains(&next) {
        return None;
    }
    Some(zap_order[next.rem_euclid(len) as usize])
}

/// Ammunition action for whatever `launcher` should fire next.
///
/// Tries the remembered item for the launcher's category, then the head of
/// the automatic fire order. On failure the returned action is invalid and
/// carries an explanation in `error`.
pub fn find_action_from_launcher(
    env: QuiverEnv<'_>,
    history: &History,
    launcher: Option<&Item>,
) -> Action {
    if !env.you.species.can_throw() {
        return Action::ammo(None).with_error(CANT_GRASP_MSG);
    }

    let slot = history
        .get_last_ammo_for(&env.you.inventory, launcher)
        .or_else(|| get_item_fire_order(env, false, launcher, false).first().copied());
    if slot.is_some() {
        return Action::ammo(slot);
    }

    let full_order = get_item_fire_order(env, true, launcher, false);
    let start = env.options.fire_items_start;
    let error = match full_order.first() {
        None => "No suitable missiles.".to_string(),
        Some(&skipped) if skipped < start => format!(
            "Nothing suitable (fire_items_start = '{}').",
            index_to_letter(start)
        ),
        Some(&skipped) => format!(
            "Nothing suitable (ignored '=f'-inscribed item on '{}').",
            index_to_letter(skipped)
        ),
    };
    Action::ammo(None).with_error(error)
}

/// Remembered ammunition for the current category, or a fresh pick for
/// the wielded weapon
pub fn find_ammo_action(env: QuiverEnv<'_>, history: &History) -> Action {
    match history.get_last_ammo_current(&env.you.inventory) {
        Some(slot) => Action::ammo(Some(slot)),
        None => find_action_from_launcher(env, history, env.weapon()),
    }
}

/// Action for quivering an inventory slot: wands zap, anything else is
/// treated as ammunition (and may well be invalid)
pub fn slot_to_action(inv: &Inventory, slot: usize) -> Action {
    if slot >= ENDOFPACK {
        return Action::none();
    }
    if inv.get(slot).is_some_and(Item::is_wand) {
        Action::wand(Some(slot))
    } else {
        Action::ammo(Some(slot))
    }
}

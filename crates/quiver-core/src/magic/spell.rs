//! Spell knowledge
//!
//! The static spell table and the player's memorised spells, keyed by
//! spell letter.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::object::{index_to_letter, letter_to_index};

/// Number of spell letters (a-z, A-Z)
pub const SPELL_LETTERS: usize = 52;

/// Highest fail severity; anything at or above it is never quivered
pub const MAX_FAIL_SEVERITY: u8 = 5;

/// Spell identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SpellId(pub u16);

impl SpellId {
    pub const NONE: SpellId = SpellId(0);
    pub const MAGIC_DART: SpellId = SpellId(1);
    pub const FIREBALL: SpellId = SpellId(2);
    pub const FREEZE: SpellId = SpellId(3);
    pub const BLINK: SpellId = SpellId(4);
    pub const APPORTATION: SpellId = SpellId(5);
    pub const SUMMON_SMALL_MAMMAL: SpellId = SpellId(6);
    pub const STONE_ARROW: SpellId = SpellId(7);
    pub const CONFUSING_TOUCH: SpellId = SpellId(8);

    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }
}

bitflags! {
    /// Spell behaviour flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct SpellFlags: u32 {
        const DIR_OR_TARGET = 0x0001;
        const TARGET = 0x0002;
        const OBJ = 0x0004;
        const SELFENCH = 0x0008;
        const ESCAPE = 0x0010;
        const EMERGENCY = 0x0020;

        /// Spells that need a target point or direction
        const TARGETING_MASK = Self::DIR_OR_TARGET.bits() | Self::TARGET.bits() | Self::OBJ.bits();
    }
}

/// Static spell definition
#[derive(Debug, Clone, Copy)]
pub struct SpellDef {
    pub id: SpellId,
    pub title: &'static str,
    pub level: u8,
    pub flags: SpellFlags,
}

static SPELLS: [SpellDef; 8] = [
    SpellDef {
        id: SpellId::MAGIC_DART,
        title: "Magic Dart",
        level: 1,
        flags: SpellFlags::DIR_OR_TARGET,
    },
    SpellDef {
        id: SpellId::FIREBALL,
        title: "Fireball",
        level: 5,
        flags: SpellFlags::TARGET,
    },
    SpellDef {
        id: SpellId::FREEZE,
        title: "Freeze",
        level: 1,
        flags: SpellFlags::DIR_OR_TARGET,
    },
    SpellDef {
        id: SpellId::BLINK,
        title: "Blink",
        level: 2,
        flags: SpellFlags::ESCAPE.union(SpellFlags::EMERGENCY),
    },
    SpellDef {
        id: SpellId::APPORTATION,
        title: "Apportation",
        level: 1,
        flags: SpellFlags::TARGET.union(SpellFlags::OBJ),
    },
    SpellDef {
        id: SpellId::SUMMON_SMALL_MAMMAL,
        title: "Summon Small Mammal",
        level: 1,
        flags: SpellFlags::empty(),
    },
    SpellDef {
        id: SpellId::STONE_ARROW,
        title: "Stone Arrow",
        level: 3,
        flags: SpellFlags::DIR_OR_TARGET,
    },
    SpellDef {
        id: SpellId::CONFUSING_TOUCH,
        title: "Confusing Touch",
        level: 1,
        flags: SpellFlags::SELFENCH,
    },
];

/// Definition of a spell, if the id names a real spell
pub fn spell_def(id: SpellId) -> Option<&'static SpellDef> {
    SPELLS.iter().find(|def| def.id == id)
}

pub fn is_valid_spell(id: SpellId) -> bool {
    spell_def(id).is_some()
}

pub fn spell_title(id: SpellId) -> &'static str {
    spell_def(id).map_or("no spell", |def| def.title)
}

pub fn spell_flags(id: SpellId) -> SpellFlags {
    spell_def(id).map_or(SpellFlags::empty(), |def| def.flags)
}

/// A spell the player has memorised, with predictions for the current
/// situation kept up to date by the caster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorisedSpell {
    pub id: SpellId,
    /// 0 (safe) to MAX_FAIL_SEVERITY (hopeless)
    pub fail_severity: u8,
    /// Casting it now would achieve nothing
    pub useless: bool,
}

impl MemorisedSpell {
    pub fn new(id: SpellId) -> Self {
        Self {
            id,
            fail_severity: 0,
            useless: false,
        }
    }
}

/// Memorised spells by letter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spellbook {
    letters: Vec<Option<MemorisedSpell>>,
}

impl Default for Spellbook {
    fn default() -> Self {
        Self {
            letters: vec![None; SPELL_LETTERS],
        }
    }
}

impl Spellbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memorise a spell under the first free letter. Returns the letter,
    /// or `None` if the spell is unknown, already memorised, or every
    /// letter is taken.
    pub fn memorise(&mut self, id: SpellId) -> Option<char> {
        if !is_valid_spell(id) || self.has_spell(id) {
            return None;
        }
        let index = self.letters.iter().position(Option::is_none)?;
        self.letters[index] = Some(MemorisedSpell::new(id));
        Some(index_to_letter(index))
    }

    /// Memorise a spell under a specific letter, replacing what was there
    pub fn memorise_at(&mut self, letter: char, id: SpellId) -> bool {
        let Some(index) = letter_to_index(letter) else {
            return false;
        };
        if !is_valid_spell(id) {
            return false;
        }
        self.forget(id);
        self.letters[index] = Some(MemorisedSpell::new(id));
        true
    }

    pub fn forget(&mut self, id: SpellId) {
        for entry in self.letters.iter_mut() {
            if entry.is_some_and(|s| s.id == id) {
                *entry = None;
            }
        }
    }

    pub fn has_spell(&self, id: SpellId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: SpellId) -> Option<&MemorisedSpell> {
        self.letters.iter().flatten().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: SpellId) -> Option<&mut MemorisedSpell> {
        self.letters.iter_mut().flatten().find(|s| s.id == id)
    }

    /// Spell under a letter index; `SpellId::NONE` if the letter is empty
    pub fn spell_by_index(&self, index: usize) -> SpellId {
        self.letters
            .get(index)
            .copied()
            .flatten()
            .map_or(SpellId::NONE, |s| s.id)
    }

    /// Letter index a spell is memorised under
    pub fn index_of(&self, id: SpellId) -> Option<usize> {
        self.letters
            .iter()
            .position(|entry| entry.is_some_and(|s| s.id == id))
    }

    /// Predicted fail severity; unknown spells are hopeless
    pub fn fail_severity(&self, id: SpellId) -> u8 {
        self.get(id).map_or(MAX_FAIL_SEVERITY, |s| s.fail_severity)
    }

    pub fn is_useless(&self, id: SpellId) -> bool {
        self.get(id).is_none_or(|s| s.useless)
    }
}

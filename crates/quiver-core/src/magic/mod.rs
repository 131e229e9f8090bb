//! Magic system
//!
//! Only what the quiver needs: which spells exist and which the player
//! has memorised.

pub mod spell;

pub use spell::{
    MAX_FAIL_SEVERITY, MemorisedSpell, SPELL_LETTERS, SpellDef, SpellFlags, SpellId, Spellbook,
    is_valid_spell, spell_def, spell_flags, spell_title,
};

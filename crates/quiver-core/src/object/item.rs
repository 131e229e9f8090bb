//! Item instances

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};

/// Hand weapons and launchers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum WeaponType {
    Club = 0,
    Dagger = 1,
    ShortSword = 2,
    LongSword = 3,
    HandAxe = 4,
    Spear = 5,
    Trident = 6,
    Quarterstaff = 7,
    HuntingSling = 8,
    Fustibalus = 9,
    Shortbow = 10,
    Longbow = 11,
    HandCrossbow = 12,
    Arbalest = 13,
    TripleCrossbow = 14,
}

impl WeaponType {
    /// Ammunition this weapon fires, if it is a launcher
    pub const fn fires(&self) -> Option<MissileType> {
        match self {
            WeaponType::HuntingSling | WeaponType::Fustibalus => Some(MissileType::Stone),
            WeaponType::Shortbow | WeaponType::Longbow => Some(MissileType::Arrow),
            WeaponType::HandCrossbow | WeaponType::Arbalest | WeaponType::TripleCrossbow => {
                Some(MissileType::Bolt)
            }
            _ => None,
        }
    }

    pub const fn is_launcher(&self) -> bool {
        self.fires().is_some()
    }

    pub const fn name(&self) -> &'static str {
        match self {
            WeaponType::Club => "club",
            WeaponType::Dagger => "dagger",
            WeaponType::ShortSword => "short sword",
            WeaponType::LongSword => "long sword",
            WeaponType::HandAxe => "hand axe",
            WeaponType::Spear => "spear",
            WeaponType::Trident => "trident",
            WeaponType::Quarterstaff => "quarterstaff",
            WeaponType::HuntingSling => "hunting sling",
            WeaponType::Fustibalus => "fustibalus",
            WeaponType::Shortbow => "shortbow",
            WeaponType::Longbow => "longbow",
            WeaponType::HandCrossbow => "hand crossbow",
            WeaponType::Arbalest => "arbalest",
            WeaponType::TripleCrossbow => "triple crossbow",
        }
    }
}

/// Missiles: launcher ammunition and thrown weapons
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum MissileType {
    Stone = 0,
    SlingBullet = 1,
    Arrow = 2,
    Bolt = 3,
    Javelin = 4,
    LargeRock = 5,
    ThrowingNet = 6,
    Boomerang = 7,
    Dart = 8,
}

impl MissileType {
    /// Whether this missile can be thrown by hand at all.
    ///
    /// Launcher-only ammunition is never hand-thrown.
    pub const fn hand_throwable(&self) -> bool {
        !matches!(
            self,
            MissileType::SlingBullet | MissileType::Arrow | MissileType::Bolt
        )
    }

    pub const fn name(&self) -> &'static str {
        match self {
            MissileType::Stone => "stone",
            MissileType::SlingBullet => "sling bullet",
            MissileType::Arrow => "arrow",
            MissileType::Bolt => "bolt",
            MissileType::Javelin => "javelin",
            MissileType::LargeRock => "large rock",
            MissileType::ThrowingNet => "throwing net",
            MissileType::Boomerang => "boomerang",
            MissileType::Dart => "dart",
        }
    }
}

/// Wand kinds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum WandType {
    Flame = 0,
    Paralysis = 1,
    Digging = 2,
    Iceblast = 3,
    Acid = 4,
    Charming = 5,
    Polymorph = 6,
    Light = 7,
}

impl WandType {
    pub const fn name(&self) -> &'static str {
        match self {
            WandType::Flame => "flame",
            WandType::Paralysis => "paralysis",
            WandType::Digging => "digging",
            WandType::Iceblast => "iceblast",
            WandType::Acid => "acid",
            WandType::Charming => "charming",
            WandType::Polymorph => "polymorph",
            WandType::Light => "light",
        }
    }
}

/// What an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemKind {
    /// Empty placeholder, never a real item
    #[default]
    Unassigned,
    Weapon(WeaponType),
    Missile(MissileType),
    Wand(WandType),
    Armour,
    Other,
}

impl ItemKind {
    /// Stable tag used by the binary save layout
    pub const fn tag(&self) -> u8 {
        match self {
            ItemKind::Unassigned => 0,
            ItemKind::Weapon(_) => 1,
            ItemKind::Missile(_) => 2,
            ItemKind::Wand(_) => 3,
            ItemKind::Armour => 4,
            ItemKind::Other => 5,
        }
    }

    /// Subtype within the tag; zero for kinds without one
    pub const fn sub_type(&self) -> u8 {
        match self {
            ItemKind::Weapon(w) => *w as u8,
            ItemKind::Missile(m) => *m as u8,
            ItemKind::Wand(w) => *w as u8,
            ItemKind::Unassigned | ItemKind::Armour | ItemKind::Other => 0,
        }
    }

    /// Rebuild a kind from its save tag and subtype
    pub fn from_tag(tag: u8, sub_type: u8) -> Option<Self> {
        match tag {
            0 => Some(ItemKind::Unassigned),
            1 => WeaponType::from_repr(sub_type).map(ItemKind::Weapon),
            2 => MissileType::from_repr(sub_type).map(ItemKind::Missile),
            3 => WandType::from_repr(sub_type).map(ItemKind::Wand),
            4 => Some(ItemKind::Armour),
            5 => Some(ItemKind::Other),
            _ => None,
        }
    }

    fn base_name(&self) -> String {
        match self {
            ItemKind::Unassigned => "buggy item".to_string(),
            ItemKind::Weapon(w) => w.name().to_string(),
            ItemKind::Missile(m) => m.name().to_string(),
            ItemKind::Wand(w) => format!("wand of {}", w.name()),
            ItemKind::Armour => "armour".to_string(),
            ItemKind::Other => "thing".to_string(),
        }
    }
}

/// Missile and weapon brands
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, FromRepr,
)]
#[repr(u8)]
pub enum Brand {
    #[default]
    Normal = 0,
    Flaming = 1,
    Freezing = 2,
    Poisoned = 3,
    Silver = 4,
    Dispersal = 5,
}

impl Brand {
    const fn adjective(&self) -> Option<&'static str> {
        match self {
            Brand::Normal => None,
            Brand::Flaming => Some("flaming"),
            Brand::Freezing => Some("freezing"),
            Brand::Poisoned => Some("poisoned"),
            Brand::Silver => Some("silver"),
            Brand::Dispersal => Some("dispersal"),
        }
    }
}

bitflags! {
    /// Per-instance item knowledge and state
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ItemFlags: u32 {
        const IDENTIFIED = 0x0001;
        const CURSED = 0x0002;
        const THROWN = 0x0004;
    }
}

/// Inscription that excludes an item from the automatic fire order
pub const SKIP_FIRE_AUTO: &str = "=f";
/// Inscription that excludes an item from the manual fire order
pub const SKIP_FIRE_MANUAL: &str = "=F";
/// Inscription that forces an item into the automatic fire order
pub const INCLUDE_FIRE_AUTO: &str = "+f";
/// Inscription that forces an item into the manual fire order
pub const INCLUDE_FIRE_MANUAL: &str = "+F";
/// Inscriptions that ask for confirmation before firing
const WARN_FIRE: [&str; 2] = ["!f", "!*"];

/// Item instance
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,

    /// Stack size; zero marks an empty item
    pub quantity: i32,

    /// Enchantment
    pub plus: i8,

    pub brand: Brand,

    pub flags: ItemFlags,

    /// Player-written inscription, e.g. "=f" or "!f"
    pub inscription: String,

    /// Inventory letter ('\0' when not assigned)
    pub inv_letter: char,

    /// Inventory slot the item occupies, when carried
    pub link: Option<usize>,
}

impl Item {
    /// Create a new stack of the given kind
    pub fn new(kind: ItemKind, quantity: i32) -> Self {
        Self {
            kind,
            quantity,
            ..Default::default()
        }
    }

    pub fn missile(missile: MissileType, quantity: i32) -> Self {
        Self::new(ItemKind::Missile(missile), quantity)
    }

    pub fn weapon(weapon: WeaponType) -> Self {
        Self::new(ItemKind::Weapon(weapon), 1)
    }

    pub fn wand(wand: WandType) -> Self {
        Self::new(ItemKind::Wand(wand), 1)
    }

    pub fn with_inscription(mut self, inscription: impl Into<String>) -> Self {
        self.inscription = inscription.into();
        self
    }

    pub fn with_plus(mut self, plus: i8) -> Self {
        self.plus = plus;
        self
    }

    pub fn with_brand(mut self, brand: Brand) -> Self {
        self.brand = brand;
        self
    }

    pub fn identified(mut self) -> Self {
        self.flags.insert(ItemFlags::IDENTIFIED);
        self
    }

    /// A real item with a non-empty stack
    pub fn is_defined(&self) -> bool {
        self.kind != ItemKind::Unassigned && self.quantity > 0
    }

    pub const fn is_wand(&self) -> bool {
        matches!(self.kind, ItemKind::Wand(_))
    }

    pub const fn is_missile(&self) -> bool {
        matches!(self.kind, ItemKind::Missile(_))
    }

    pub fn has_inscription(&self, marker: &str) -> bool {
        self.inscription.contains(marker)
    }

    /// Inscribed "!f" or "!*"
    pub fn warns_on_fire(&self) -> bool {
        WARN_FIRE.iter().any(|marker| self.has_inscription(marker))
    }

    /// Whether `launcher` fires this item as ammunition
    pub fn launched_by(&self, launcher: &Item) -> bool {
        let (ItemKind::Missile(missile), ItemKind::Weapon(weapon)) = (self.kind, launcher.kind)
        else {
            return false;
        };
        match weapon.fires() {
            Some(MissileType::Stone) => {
                matches!(missile, MissileType::Stone | MissileType::SlingBullet)
            }
            Some(ammo) => missile == ammo,
            None => false,
        }
    }

    /// Whether two items would stack: same kind, enchantment, brand and
    /// identification state. Quantity and inscription are ignored.
    pub fn similar_to(&self, other: &Item) -> bool {
        self.kind == other.kind
            && self.plus == other.plus
            && self.brand == other.brand
            && self.flags.contains(ItemFlags::IDENTIFIED)
                == other.flags.contains(ItemFlags::IDENTIFIED)
    }

    /// Plain display name, e.g. "3 darts" or "a +2 javelin {=f}"
    pub fn name(&self) -> String {
        let plus = if self.flags.contains(ItemFlags::IDENTIFIED)
            && matches!(self.kind, ItemKind::Weapon(_) | ItemKind::Missile(_))
        {
            format!("{:+} ", self.plus)
        } else {
            String::new()
        };
        let brand = self.brand.adjective().map_or_else(String::new, |adj| format!("{adj} "));
        let core = format!("{plus}{brand}{}", self.kind.base_name());

        let name = if self.quantity == 1 {
            format!("{} {}", article(&core), core)
        } else {
            format!("{} {}", self.quantity, pluralise(&core))
        };
        if self.inscription.is_empty() {
            name
        } else {
            format!("{name} {{{}}}", self.inscription)
        }
    }
}

fn article(noun: &str) -> &'static str {
    match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

fn pluralise(noun: &str) -> String {
    match noun.split_once(" of ") {
        Some((head, tail)) => format!("{}s of {}", head, tail),
        None => format!("{}s", noun),
    }
}

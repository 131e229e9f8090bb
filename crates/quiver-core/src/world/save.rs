//! Binary save records
//!
//! Fixed big-endian layouts written with `bytes`. Readers check the
//! remaining length before every field so a short record is an error,
//! never a panic.

use bytes::{Buf, BufMut};
use thiserror::Error;

use crate::object::{Brand, Item, ItemFlags, ItemKind, letter_to_index};

/// Save/restore errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("Bad record cookie: expected {expected:#06x}, found {found:#06x}")]
    BadCookie { expected: u16, found: u16 },

    #[error("Ammo category out of range: {0}")]
    CategoryOutOfRange(i32),

    #[error("Too many history entries: {count} (at most {max})")]
    CountTooLarge { count: i32, max: usize },

    #[error("Record truncated: needed {needed} bytes, {remaining} left")]
    Truncated { needed: usize, remaining: usize },

    #[error("Unknown item kind {tag}/{sub_type}")]
    UnknownItemKind { tag: u8, sub_type: u8 },

    #[error("Unknown brand {0}")]
    UnknownBrand(u8),

    #[error("Inscription is not valid UTF-8")]
    BadInscription,
}

/// Fail unless `n` more bytes can be read
pub fn ensure_remaining(buf: &impl Buf, n: usize) -> Result<(), SaveError> {
    if buf.remaining() < n {
        return Err(SaveError::Truncated {
            needed: n,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

pub fn read_i32(buf: &mut impl Buf) -> Result<i32, SaveError> {
    ensure_remaining(buf, 4)?;
    Ok(buf.get_i32())
}

/// Write an item snapshot.
///
/// Layout: u8 kind tag, u8 subtype, i8 plus, u8 brand, u32 flags,
/// i32 quantity, u8 letter, i16 link (-1 for none), u16 inscription
/// length, inscription bytes.
pub fn marshall_item(out: &mut impl BufMut, item: &Item) {
    out.put_u8(item.kind.tag());
    out.put_u8(item.kind.sub_type());
    out.put_i8(item.plus);
    out.put_u8(item.brand as u8);
    out.put_u32(item.flags.bits());
    out.put_i32(item.quantity);
    out.put_u8(if item.inv_letter.is_ascii() {
        item.inv_letter as u8
    } else {
        0
    });
    out.put_i16(item.link.map_or(-1, |slot| slot as i16));
    let inscription = item.inscription.as_bytes();
    let len = inscription.len().min(u16::MAX as usize);
    out.put_u16(len as u16);
    out.put_slice(&inscription[..len]);
}

/// Read an item snapshot written by [`marshall_item`]
pub fn unmarshall_item(inp: &mut impl Buf) -> Result<Item, SaveError> {
    ensure_remaining(inp, 17)?;
    let tag = inp.get_u8();
    let sub_type = inp.get_u8();
    let kind =
        ItemKind::from_tag(tag, sub_type).ok_or(SaveError::UnknownItemKind { tag, sub_type })?;
    let plus = inp.get_i8();
    let raw_brand = inp.get_u8();
    let brand = Brand::from_repr(raw_brand).ok_or(SaveError::UnknownBrand(raw_brand))?;
    let flags = ItemFlags::from_bits_truncate(inp.get_u32());
    let quantity = inp.get_i32();
    let letter = inp.get_u8() as char;
    let link = usize::try_from(inp.get_i16()).ok();
    let len = inp.get_u16() as usize;

    ensure_remaining(inp, len)?;
    let mut bytes = vec![0u8; len];
    inp.copy_to_slice(&mut bytes);
    let inscription = String::from_utf8(bytes).map_err(|_| SaveError::BadInscription)?;

    Ok(Item {
        kind,
        quantity,
        plus,
        brand,
        flags,
        inscription,
        inv_letter: if letter_to_index(letter).is_some() {
            letter
        } else {
            '\0'
        },
        link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Inventory, MissileType};

    #[test]
    fn test_item_record() {
        let mut inv = Inventory::new();
        inv.put(
            4,
            Item::missile(MissileType::Javelin, 3)
                .with_plus(-1)
                .with_brand(Brand::Silver)
                .with_inscription("+f")
                .identified(),
        );
        let original = inv.get(4).unwrap().clone();

        let mut out = Vec::new();
        marshall_item(&mut out, &original);
        let mut inp = out.as_slice();
        assert_eq!(unmarshall_item(&mut inp).unwrap(), original);
        assert!(inp.is_empty());
    }

    #[test]
    fn test_empty_item_record() {
        let mut out = Vec::new();
        marshall_item(&mut out, &Item::default());
        let item = unmarshall_item(&mut out.as_slice()).unwrap();
        assert_eq!(item, Item::default());
    }

    #[test]
    fn test_truncated_record() {
        let mut out = Vec::new();
        marshall_item(&mut out, &Item::missile(MissileType::Dart, 1).with_inscription("=f"));
        out.pop();
        assert!(matches!(
            unmarshall_item(&mut out.as_slice()),
            Err(SaveError::Truncated { .. })
        ));
        assert!(matches!(
            unmarshall_item(&mut &out[..3]),
            Err(SaveError::Truncated { .. })
        ));
    }

    #[test]
    fn test_unknown_kind() {
        let mut out = Vec::new();
        marshall_item(&mut out, &Item::missile(MissileType::Dart, 1));
        out[0] = 42;
        assert_eq!(
            unmarshall_item(&mut out.as_slice()),
            Err(SaveError::UnknownItemKind {
                tag: 42,
                sub_type: MissileType::Dart as u8
            })
        );
    }
}

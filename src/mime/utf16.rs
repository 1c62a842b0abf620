//! Wire codec for raw typed strings.
//!
//! Strings written under a non-privileged type identifier are stored as
//! UTF-16 code units, two bytes each, in the platform's native byte
//! order. Readers honour a leading byte-order mark if one is present
//! and otherwise assume native order, so payloads produced by this
//! codec only round-trip between hosts of the same endianness.
//!
//! Text that itself starts with U+FEFF or U+FFFE is written behind a
//! native mark, so the reader strips the mark and keeps the character.

const BOM: u16 = 0xFEFF;
const SWAPPED_BOM: u16 = 0xFFFE;

/// Encode `text` as native-endian UTF-16 bytes.
///
/// No BOM is written unless the first code unit would be read as one.
pub fn encode(text: &str) -> Vec<u8> {
    let mut units = text.encode_utf16().peekable();
    let marked = matches!(units.peek(), Some(&(BOM | SWAPPED_BOM)));
    let mut bytes = Vec::with_capacity((text.len() + usize::from(marked)) * 2);
    if marked {
        bytes.extend(BOM.to_ne_bytes());
    }
    bytes.extend(units.flat_map(u16::to_ne_bytes));
    bytes
}

/// Decode UTF-16 bytes into a string.
///
/// A trailing odd byte is ignored. Unpaired surrogates are replaced
/// with U+FFFD.
pub fn decode(bytes: &[u8]) -> String {
    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
        .collect();

    match units.first().copied() {
        Some(BOM) => {
            units.remove(0);
        }
        Some(SWAPPED_BOM) => {
            units.remove(0);
            for unit in &mut units {
                *unit = unit.swap_bytes();
            }
        }
        _ => {}
    }

    String::from_utf16_lossy(&units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_bytes_per_code_unit() {
        assert_eq!(encode("ab").len(), 4);
        // U+1F600 is a surrogate pair.
        assert_eq!(encode("\u{1F600}").len(), 4);
    }

    #[test]
    fn native_byte_order() {
        let expected: Vec<u8> = 0x0041u16.to_ne_bytes().to_vec();
        assert_eq!(encode("A"), expected);
    }

    #[test]
    fn decodes_what_it_encodes() {
        let text = "caf\u{e9} \u{1F600} \u{00A0}end";
        assert_eq!(decode(&encode(text)), text);
    }

    #[test]
    fn leading_mark_characters_survive() {
        for text in ["\u{FEFF}abc", "\u{FFFE}abc", "\u{FEFF}", "\u{FEFF}\u{FEFF}x"] {
            let bytes = encode(text);
            assert_eq!(&bytes[..2], &BOM.to_ne_bytes());
            assert_eq!(decode(&bytes), text);
        }
    }

    #[test]
    fn mark_only_added_when_needed() {
        let expected: Vec<u8> = [0x0061u16, 0xFEFF]
            .iter()
            .flat_map(|u| u.to_ne_bytes())
            .collect();
        assert_eq!(encode("a\u{FEFF}"), expected);
    }

    #[test]
    fn swapped_bom_flips_order() {
        let mut bytes = SWAPPED_BOM.to_ne_bytes().to_vec();
        bytes.extend(0x4100u16.to_ne_bytes());
        assert_eq!(decode(&bytes), "A");
    }

    #[test]
    fn native_bom_is_stripped() {
        let mut bytes = BOM.to_ne_bytes().to_vec();
        bytes.extend(encode("hi"));
        assert_eq!(decode(&bytes), "hi");
    }

    #[test]
    fn odd_trailing_byte_ignored() {
        let mut bytes = encode("ok");
        bytes.push(0x7F);
        assert_eq!(decode(&bytes), "ok");
    }

    #[test]
    fn empty_input() {
        assert_eq!(decode(&[]), "");
        assert!(encode("").is_empty());
    }
}

//! Operand encoding shared by the compiler (encode) and the VM (decode).
//!
//! Offsets are stored as big-endian `u16`; `PUT` operands are the raw UTF-8
//! bytes of one character.

use crate::error::CodecError;

/// Encode an offset as two big-endian bytes.
pub fn encode_short(num: usize) -> Result<[u8; 2], CodecError> {
    let num = u16::try_from(num).map_err(|_| CodecError::TooLarge(num))?;
    Ok(num.to_be_bytes())
}

/// Decode the two bytes at `offset`; `None` if they run past the buffer.
pub fn decode_short(memory: &[u8], offset: usize) -> Option<u16> {
    let bytes = memory.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

/// UTF-8 bytes of a string holding exactly one character.
pub fn encode_utf8(s: &str) -> Result<Vec<u8>, CodecError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(CodecError::EmptyString),
        (Some(_), Some(_)) => Err(CodecError::NotOneChar),
        (Some(_), None) => Ok(s.as_bytes().to_vec()),
    }
}

/// Sequence length implied by a leading byte. Continuation bytes are not
/// checked.
pub fn utf8_len(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0x80..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}

/// Decode the character starting at `offset`, returning it together with the
/// number of bytes it spans. Malformed spans decode lossily.
pub fn decode_utf8(memory: &[u8], offset: usize) -> Option<(String, usize)> {
    let len = utf8_len(*memory.get(offset)?);
    let bytes = memory.get(offset..offset.checked_add(len)?)?;
    Some((String::from_utf8_lossy(bytes).into_owned(), len))
}

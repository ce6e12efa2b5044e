//! Fixed-width string and data fields
//!
//! Strings travel in fixed slots, NUL terminated and NUL padded. Text that
//! does not fit is truncated silently; callers that care must check the
//! length themselves.

use bytes::{BufMut, BytesMut};

/// Longest prefix of `text` that fits in `max` bytes
///
/// Stops at an embedded NUL and never splits a UTF-8 character.
pub fn truncate(text: &str, max: usize) -> &str {
    let text = text.split('\0').next().unwrap_or_default();
    if text.len() <= max {
        return text;
    }

    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Write `text` into a `slot`-byte field, keeping one byte for the terminator
pub fn put_str(buf: &mut BytesMut, text: &str, slot: usize) {
    let text = truncate(text, slot.saturating_sub(1));
    buf.put_slice(text.as_bytes());
    buf.put_bytes(0, slot - text.len());
}

/// Write raw `data` into a `slot`-byte field, zero padded
pub fn put_data(buf: &mut BytesMut, data: &[u8], slot: usize) {
    let len = data.len().min(slot);
    buf.put_slice(&data[..len]);
    buf.put_bytes(0, slot - len);
}

/// Read a NUL-terminated string out of a fixed field
pub fn get_str(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

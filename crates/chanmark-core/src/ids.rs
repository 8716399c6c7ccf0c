//! Record identifiers and the millisecond clock.
//!
//! Identifiers are 26-character strings over `[a-z0-9]`. A fresh identifier
//! is a UUIDv7 rendered in unpadded base32 with a lowercase alphabet, so the
//! 128 random/time bits always fit in exactly 26 characters.
//!
//! ```text
//!  16 bytes (UUIDv7)  ──base32──▶  26 chars
//!  0190f3a2-...                     x1f9q8c3...
//! ```
//!
//! Validation only checks the shape (length and alphabet). Identifiers minted
//! elsewhere with the same shape are accepted.

use chrono::Utc;
use uuid::Uuid;

/// Length of every identifier in characters.
pub const ID_LEN: usize = 26;

/// Base32 alphabet used to render identifiers.
const ID_ALPHABET: &[u8; 32] = b"ybndrfg8ejkmcpqxot1uwisza345h769";

/// Generate a new identifier.
///
/// # Example
///
/// ```
/// use chanmark_core::ids::{is_valid_id, new_id};
///
/// let id = new_id();
/// assert!(is_valid_id(&id));
/// ```
#[inline]
pub fn new_id() -> String {
    id_from_uuid(&Uuid::now_v7())
}

/// Render a UUID as an identifier.
pub fn id_from_uuid(uuid: &Uuid) -> String {
    let mut out = String::with_capacity(ID_LEN);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for &byte in uuid.as_bytes() {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ID_ALPHABET[((buffer >> bits) & 0x1F) as usize] as char);
        }
    }

    // 128 bits leave 3 trailing bits, left-aligned into one last symbol
    if bits > 0 {
        out.push(ID_ALPHABET[((buffer << (5 - bits)) & 0x1F) as usize] as char);
    }

    out
}

/// Check whether a string has the identifier shape.
pub fn is_valid_id(value: &str) -> bool {
    value.len() == ID_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

/// Current time as milliseconds since the Unix epoch.
#[inline]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_id_shape() {
        let id = new_id();
        assert_eq!(id.len(), ID_LEN);
        assert!(is_valid_id(&id));
    }

    #[test]
    fn test_new_id_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_nil_uuid_renders_first_symbol() {
        let id = id_from_uuid(&Uuid::nil());
        assert_eq!(id, "y".repeat(ID_LEN));
        assert!(is_valid_id(&id));
    }

    #[test]
    fn test_max_uuid_renders_valid_id() {
        let id = id_from_uuid(&Uuid::max());
        assert_eq!(id.len(), ID_LEN);
        // 125 set bits fill 25 symbols, last symbol carries 0b11100
        assert!(id[..25].chars().all(|c| c == '9'));
        assert_eq!(&id[25..], "h");
    }

    #[test]
    fn test_is_valid_id_rejects_bad_shapes() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("invalid"));
        assert!(!is_valid_id(&"a".repeat(25)));
        assert!(!is_valid_id(&"a".repeat(27)));
        assert!(!is_valid_id(&"A".repeat(26)));
        assert!(!is_valid_id(&format!("{}-", "a".repeat(25))));
        assert!(!is_valid_id(&format!("{}é", "a".repeat(24))));
    }

    #[test]
    fn test_is_valid_id_accepts_foreign_ids() {
        assert!(is_valid_id("abcdefghijklmnopqrstuvwxyz"));
        assert!(is_valid_id("0123456789abcdef0123456789"));
    }

    #[test]
    fn test_now_millis_is_recent() {
        let before = Utc::now().timestamp_millis();
        let now = now_millis();
        assert!(now >= before);
        assert!(now > 1_700_000_000_000);
    }
}

//! Hex helpers for the `0x`-prefixed wire format.

use hex::FromHexError;

/// Format bytes as a lowercase hex string with "0x" prefix.
///
/// An empty payload is `"0x"`, never an empty string.
pub fn to_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Strip an optional `0x`/`0X` prefix.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Parse hex with or without prefix, case-insensitively.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, FromHexError> {
    hex::decode(strip_hex_prefix(s.trim()))
}

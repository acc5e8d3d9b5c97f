// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chain address decoding and SS58 display.

use crate::hex_utils::parse_hex;
use sp_core::crypto::{AccountId32, Ss58AddressFormat, Ss58Codec};

/// Decode a chain address to its 32 account bytes.
///
/// Accepts an SS58 address with any network prefix, or a `0x` hex string of
/// exactly 32 bytes. Returns `None` for anything else, including SS58 strings
/// with a bad checksum.
pub fn decode_address(text: &str) -> Option<[u8; 32]> {
    let text = text.trim();

    if text.starts_with("0x") {
        let bytes = parse_hex(text).ok()?;
        return <[u8; 32]>::try_from(bytes.as_slice()).ok();
    }

    match AccountId32::from_ss58check_with_version(text) {
        Ok((account_id, _format)) => {
            let bytes: &[u8; 32] = account_id.as_ref();
            Some(*bytes)
        }
        Err(e) => {
            tracing::trace!(address = %text, error = ?e, "Not an SS58 address");
            None
        }
    }
}

/// SS58 form of 32 account bytes for the given network prefix.
pub fn encode_address(bytes: &[u8; 32], ss58_prefix: u16) -> String {
    AccountId32::from(*bytes).to_ss58check_with_version(Ss58AddressFormat::custom(ss58_prefix))
}

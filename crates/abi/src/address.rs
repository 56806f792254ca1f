//! Textual account identifiers.

use alloy_primitives::Address;

use crate::errors::AbiError;

/// Number of hex digits in a textual address.
const ADDRESS_HEX_LEN: usize = 40;

/// Parses a textual address.
///
/// Accepts 40 hex digits with an optional `0x` prefix. All-lowercase and all-uppercase forms are
/// taken as-is; mixed case must be a valid EIP-55 checksum.
pub fn parse_address(raw: &str) -> Result<Address, AbiError> {
    let invalid = || AbiError::InvalidAddress(raw.to_owned());
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    if digits.len() != ADDRESS_HEX_LEN || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes).map_err(|_| invalid())?;
    let address = Address::from(bytes);

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper && address.to_checksum(None)[2..] != *digits {
        return Err(invalid());
    }

    Ok(address)
}

/// Parses every address in `raw`, failing on the first invalid one.
pub fn parse_addresses<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Address>, AbiError> {
    raw.iter().map(|item| parse_address(item.as_ref())).collect()
}

/// Renders an address as `0x`-prefixed lowercase hex.
pub fn format_address(address: &Address) -> String {
    format!("{address:#x}")
}

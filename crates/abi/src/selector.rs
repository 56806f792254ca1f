use alloy_primitives::{keccak256, Selector};

use crate::types::Param;

/// Builds the canonical signature `name(type,type,...)`: no spaces, no parameter names.
pub fn canonical_signature(name: &str, inputs: &[Param]) -> String {
    let args = inputs
        .iter()
        .map(|param| param.kind.canonical())
        .collect::<Vec<_>>()
        .join(",");
    format!("{name}({args})")
}

/// First 4 bytes of the keccak-256 hash of a canonical signature.
pub fn selector_for(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    Selector::from_slice(&hash[..4])
}

/// Renders a selector as `0x`-prefixed lowercase hex.
pub fn selector_hex(selector: Selector) -> String {
    format!("0x{}", hex::encode(selector))
}

//! Identification of arbitrary calldata against a set of known descriptors.

use serde::Serialize;
use tracing::*;

use crate::{selector::selector_hex, types::FunctionDescriptor};

/// Which known function a payload invokes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedInterface {
    /// Canonical signature, e.g. `addAddresses(address[])`.
    pub function_id: String,
    pub function_name: String,
    /// `0x`-prefixed lowercase selector.
    pub selector_hex: String,
}

impl ResolvedInterface {
    fn from_descriptor(descriptor: &FunctionDescriptor) -> Self {
        Self {
            function_id: descriptor.canonical_signature(),
            function_name: descriptor.name.to_owned(),
            selector_hex: selector_hex(descriptor.selector()),
        }
    }
}

/// Finds the first candidate whose selector equals the leading 4 bytes of `payload`.
///
/// Payloads shorter than a selector never match.
pub fn resolve_descriptor<'c>(
    payload: &[u8],
    candidates: &'c [FunctionDescriptor],
) -> Option<&'c FunctionDescriptor> {
    let prefix = payload.get(..4)?;
    let found = candidates
        .iter()
        .find(|candidate| candidate.selector().as_slice() == prefix);
    if found.is_none() {
        trace!(prefix = %hex::encode(prefix), "no candidate matches selector");
    }
    found
}

/// Identifies which of `candidates` the payload calls, if any.
pub fn resolve(payload: &[u8], candidates: &[FunctionDescriptor]) -> Option<ResolvedInterface> {
    resolve_descriptor(payload, candidates).map(ResolvedInterface::from_descriptor)
}

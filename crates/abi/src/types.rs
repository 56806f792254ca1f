//! Parameter type tags, declared parameters and decoded values.

use std::fmt;

use alloy_primitives::{Address, Selector, U256};

use crate::selector::{canonical_signature, selector_for};

/// Size in bytes of one ABI head slot.
pub(crate) const WORD_SIZE: usize = 32;

/// Semantic type tag of a single parameter.
///
/// Covers the types used by the plugin's entry points and installation schema. All variants are
/// `const`-constructible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// 20-byte account identifier.
    Address,
    /// Boolean flag.
    Bool,
    /// Unsigned integer of the given bit width (multiple of 8, at most 256).
    Uint(usize),
    /// Variable-length list of the inner type.
    Array(&'static ParamType),
    /// Fixed tuple of named components.
    Tuple(&'static [Param]),
}

impl ParamType {
    /// Whether the type is encoded in the tail region behind an offset word.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Address | Self::Bool | Self::Uint(_) => false,
            Self::Array(_) => true,
            Self::Tuple(components) => components.iter().any(|c| c.kind.is_dynamic()),
        }
    }

    /// Number of 32-byte words the type occupies in the head of an enclosing tuple.
    pub fn head_words(&self) -> usize {
        match self {
            Self::Tuple(components) if !self.is_dynamic() => {
                components.iter().map(|c| c.kind.head_words()).sum()
            }
            _ => 1,
        }
    }

    /// Canonical textual form used in signatures, e.g. `address[]` or `(bool,uint16)`.
    pub fn canonical(&self) -> String {
        match self {
            Self::Address => "address".to_owned(),
            Self::Bool => "bool".to_owned(),
            Self::Uint(bits) => format!("uint{bits}"),
            Self::Array(inner) => format!("{}[]", inner.canonical()),
            Self::Tuple(components) => {
                let inner = components
                    .iter()
                    .map(|c| c.kind.canonical())
                    .collect::<Vec<_>>()
                    .join(",");
                format!("({inner})")
            }
        }
    }

    /// Types of the nested values for a container holding `len` items.
    ///
    /// Scalars have no children.
    pub(crate) fn children(&self, len: usize) -> Vec<ParamType> {
        match self {
            Self::Array(inner) => vec![**inner; len],
            Self::Tuple(components) => components.iter().map(|c| c.kind).collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// A declared parameter: its name (diagnostics only) and its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamType,
}

/// Static metadata for one governance entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub name: &'static str,
    pub inputs: &'static [Param],
}

impl FunctionDescriptor {
    /// Canonical signature, e.g. `addAddresses(address[])`.
    pub fn canonical_signature(&self) -> String {
        canonical_signature(self.name, self.inputs)
    }

    /// The 4-byte selector derived from the canonical signature.
    pub fn selector(&self) -> Selector {
        selector_for(&self.canonical_signature())
    }
}

/// A decoded (or to-be-encoded) ABI value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Address(Address),
    Bool(bool),
    Uint(U256),
    Array(Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
}

impl AbiValue {
    /// Builds an address list value.
    pub fn address_list(addresses: impl IntoIterator<Item = Address>) -> Self {
        Self::Array(addresses.into_iter().map(Self::Address).collect())
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(address) => Some(*address),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[AbiValue]> {
        match self {
            Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Interprets the value as a list of addresses.
    ///
    /// Returns `None` if the value is not an array or any element is not an address.
    pub fn to_address_list(&self) -> Option<Vec<Address>> {
        match self {
            Self::Array(items) => items.iter().map(Self::as_address).collect(),
            _ => None,
        }
    }
}

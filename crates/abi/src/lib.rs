//! ABI catalog, codec and interface resolution for the multisig governance plugin.
//!
//! The crate is organised leaf-first:
//!
//! - [`types`] holds the parameter type tags and the dynamic [`AbiValue`] tree.
//! - [`catalog`] is the static, versioned table of plugin entry points.
//! - [`selector`] derives canonical signatures and 4-byte selectors.
//! - [`codec`] implements the head/tail tuple encoding in both directions.
//! - [`resolver`] maps arbitrary calldata back to a catalog entry.
//!
//! Everything here is pure and allocation-local, so it can be shared freely across threads.

pub mod address;
pub mod catalog;
pub mod codec;
pub mod errors;
pub mod resolver;
pub mod selector;
pub mod types;

pub use address::{format_address, parse_address, parse_addresses};
pub use catalog::{AbiCatalog, MultisigFunction, MULTISIG_V1_2};
pub use codec::{decode_call, decode_params, encode_call, encode_params, EncodedAction};
pub use errors::AbiError;
pub use resolver::{resolve, resolve_descriptor, ResolvedInterface};
pub use selector::{canonical_signature, selector_for, selector_hex};
pub use types::{AbiValue, FunctionDescriptor, Param, ParamType};

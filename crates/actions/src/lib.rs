//! Governance actions for the multisig plugin.
//!
//! Builds and interprets the [`DaoAction`]s that change plugin membership and quorum settings,
//! predicts whether an ordered batch would be rejected on-chain, and encodes the plugin's
//! installation parameters.

pub mod config;
pub mod decoding;
pub mod encoding;
pub mod errors;
pub mod install;
pub mod ordering;
pub mod proposal;
pub mod types;

pub use config::{NetworkEntry, NetworkRegistry};
pub use decoding::{
    decode_add_addresses, decode_multisig_call, decode_remove_addresses,
    decode_update_multisig_settings, find_interface, MultisigCall,
};
pub use encoding::{add_addresses_action, remove_addresses_action, update_multisig_settings_action};
pub use errors::{ActionError, ConfigError};
pub use install::{
    decode_installation, encode_installation, plugin_install_item, MultisigPluginInstallParams,
    MultisigPluginSettings, PluginInstallItem,
};
pub use ordering::{
    analyze_ordering, is_failing_proposal, OrderingReport, OrderingRule, OrderingViolation,
};
pub use proposal::{to_dao_actions, SubgraphAction};
pub use types::{DaoAction, MultisigSettings};

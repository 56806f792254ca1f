//! Builders for the plugin's governance actions.

use multisig_abi::{encode_call, parse_address, parse_addresses, AbiValue, MultisigFunction};
use tracing::*;

use crate::{
    errors::ActionError,
    types::{DaoAction, MultisigSettings},
};

/// Builds an action adding `members` to the plugin at `plugin`.
///
/// Every address, the plugin's included, is validated before anything is encoded.
pub fn add_addresses_action<S: AsRef<str>>(
    plugin: &str,
    members: &[S],
) -> Result<DaoAction, ActionError> {
    membership_action(MultisigFunction::AddAddresses, plugin, members)
}

/// Builds an action removing `members` from the plugin at `plugin`.
pub fn remove_addresses_action<S: AsRef<str>>(
    plugin: &str,
    members: &[S],
) -> Result<DaoAction, ActionError> {
    membership_action(MultisigFunction::RemoveAddresses, plugin, members)
}

/// Builds an action replacing the plugin's quorum settings.
pub fn update_multisig_settings_action(
    plugin: &str,
    settings: &MultisigSettings,
) -> Result<DaoAction, ActionError> {
    let to = parse_address(plugin)?;
    let function = MultisigFunction::UpdateMultisigSettings;
    let encoded = encode_call(function.descriptor(), &[settings.to_abi_value()])?;
    debug!(%function, %to, ?settings, "built settings action");
    Ok(DaoAction::call(to, encoded.to_calldata()))
}

fn membership_action<S: AsRef<str>>(
    function: MultisigFunction,
    plugin: &str,
    members: &[S],
) -> Result<DaoAction, ActionError> {
    let to = parse_address(plugin)?;
    let members = parse_addresses(members)?;
    let count = members.len();
    let encoded = encode_call(function.descriptor(), &[AbiValue::address_list(members)])?;
    debug!(%function, %to, %count, "built membership action");
    Ok(DaoAction::call(to, encoded.to_calldata()))
}

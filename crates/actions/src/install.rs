//! Installation parameters of the multisig plugin.

use alloy_primitives::{Address, Bytes};
use multisig_abi::{decode_params, encode_params, parse_addresses, AbiValue, MULTISIG_V1_2};
use serde::{Deserialize, Serialize};
use tracing::*;

use crate::{config::NetworkRegistry, errors::ActionError, types::MultisigSettings};

/// Installation request, with members as supplied by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigPluginInstallParams {
    pub members: Vec<String>,
    pub voting_settings: MultisigSettings,
}

/// Decoded installation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigPluginSettings {
    pub members: Vec<Address>,
    pub voting_settings: MultisigSettings,
}

/// What the DAO factory needs to install the plugin: the plugin repository and its setup data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInstallItem {
    pub id: Address,
    pub data: Bytes,
}

/// Encodes the plugin's initialization tuple `(address[] members, (bool, uint16) settings)`.
pub fn encode_installation<S: AsRef<str>>(
    members: &[S],
    settings: &MultisigSettings,
) -> Result<Bytes, ActionError> {
    let members = parse_addresses(members)?;
    let args = [AbiValue::address_list(members), settings.to_abi_value()];
    Ok(encode_params(MULTISIG_V1_2.installation_schema(), &args)?.into())
}

/// Decodes a payload produced by [`encode_installation`].
pub fn decode_installation(data: &[u8]) -> Result<MultisigPluginSettings, ActionError> {
    let args = decode_params(MULTISIG_V1_2.installation_schema(), data)?;
    let [members, settings] = args.as_slice() else {
        return Err(ActionError::UnexpectedValue("installation parameters"));
    };
    Ok(MultisigPluginSettings {
        members: members
            .to_address_list()
            .ok_or(ActionError::UnexpectedValue("member list"))?,
        voting_settings: MultisigSettings::from_abi_value(settings)?,
    })
}

/// Builds the install item for `network`.
///
/// The network is checked against `registry` before anything is encoded.
pub fn plugin_install_item(
    params: &MultisigPluginInstallParams,
    network: &str,
    registry: &NetworkRegistry,
) -> Result<PluginInstallItem, ActionError> {
    let (name, entry) = registry
        .resolve(network)
        .ok_or_else(|| ActionError::UnsupportedNetwork(network.to_owned()))?;
    let data = encode_installation(&params.members, &params.voting_settings)?;
    debug!(
        network = name,
        repo = %entry.multisig_repo,
        len = data.len(),
        "built plugin install item"
    );
    Ok(PluginInstallItem {
        id: entry.multisig_repo,
        data,
    })
}

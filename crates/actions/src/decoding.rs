//! Typed decoders for the plugin's governance actions.

use alloy_primitives::Address;
use multisig_abi::{
    decode_call, resolve, resolve_descriptor, AbiValue, MultisigFunction, ResolvedInterface,
    MULTISIG_V1_2,
};
use serde::Serialize;

use crate::{errors::ActionError, types::MultisigSettings};

/// A decoded call to one of the plugin's entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "function", content = "args", rename_all = "camelCase")]
pub enum MultisigCall {
    AddAddresses(Vec<Address>),
    RemoveAddresses(Vec<Address>),
    UpdateMultisigSettings(MultisigSettings),
}

impl MultisigCall {
    pub fn function(&self) -> MultisigFunction {
        match self {
            Self::AddAddresses(_) => MultisigFunction::AddAddresses,
            Self::RemoveAddresses(_) => MultisigFunction::RemoveAddresses,
            Self::UpdateMultisigSettings(_) => MultisigFunction::UpdateMultisigSettings,
        }
    }
}

/// Decodes the member list of an `addAddresses` call.
pub fn decode_add_addresses(data: &[u8]) -> Result<Vec<Address>, ActionError> {
    decode_members(MultisigFunction::AddAddresses, data)
}

/// Decodes the member list of a `removeAddresses` call.
pub fn decode_remove_addresses(data: &[u8]) -> Result<Vec<Address>, ActionError> {
    decode_members(MultisigFunction::RemoveAddresses, data)
}

/// Decodes the settings of an `updateMultisigSettings` call.
pub fn decode_update_multisig_settings(data: &[u8]) -> Result<MultisigSettings, ActionError> {
    let args = decode_call(MultisigFunction::UpdateMultisigSettings.descriptor(), data)?;
    let [settings] = args.as_slice() else {
        return Err(ActionError::UnexpectedValue("multisig settings"));
    };
    MultisigSettings::from_abi_value(settings)
}

/// Identifies which plugin function `data` calls and decodes its arguments.
pub fn decode_multisig_call(data: &[u8]) -> Result<MultisigCall, ActionError> {
    let function = resolve_descriptor(data, MULTISIG_V1_2.functions())
        .and_then(|descriptor| MultisigFunction::from_name(descriptor.name))
        .ok_or_else(|| ActionError::UnrecognizedCall(format!("0x{}", hex::encode(data))))?;

    Ok(match function {
        MultisigFunction::AddAddresses => MultisigCall::AddAddresses(decode_add_addresses(data)?),
        MultisigFunction::RemoveAddresses => {
            MultisigCall::RemoveAddresses(decode_remove_addresses(data)?)
        }
        MultisigFunction::UpdateMultisigSettings => {
            MultisigCall::UpdateMultisigSettings(decode_update_multisig_settings(data)?)
        }
    })
}

/// Returns which plugin function `data` calls, or `None` if it calls none of them.
pub fn find_interface(data: &[u8]) -> Option<ResolvedInterface> {
    resolve(data, MULTISIG_V1_2.functions())
}

fn decode_members(function: MultisigFunction, data: &[u8]) -> Result<Vec<Address>, ActionError> {
    let args = decode_call(function.descriptor(), data)?;
    args.first()
        .and_then(AbiValue::to_address_list)
        .ok_or(ActionError::UnexpectedValue("member list"))
}

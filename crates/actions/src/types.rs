use alloy_primitives::{Address, Bytes, U256};
use multisig_abi::AbiValue;
use serde::{Deserialize, Serialize};

use crate::errors::ActionError;

/// A single instruction executed by the DAO: call `to` with `value` wei and calldata `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoAction {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

impl DaoAction {
    /// A call transferring no value.
    pub fn call(to: Address, data: Bytes) -> Self {
        Self {
            to,
            value: U256::ZERO,
            data,
        }
    }
}

/// Quorum settings of the multisig plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigSettings {
    /// Whether only listed members may create proposals.
    pub only_listed: bool,
    /// Approvals required for a proposal to pass.
    pub min_approvals: u16,
}

impl MultisigSettings {
    pub(crate) fn to_abi_value(self) -> AbiValue {
        AbiValue::Tuple(vec![
            AbiValue::Bool(self.only_listed),
            AbiValue::Uint(U256::from(self.min_approvals)),
        ])
    }

    pub(crate) fn from_abi_value(value: &AbiValue) -> Result<Self, ActionError> {
        let bad = || ActionError::UnexpectedValue("multisig settings");
        let [only_listed, min_approvals] = value.as_tuple().ok_or_else(bad)? else {
            return Err(bad());
        };
        let min_approvals = min_approvals.as_uint().ok_or_else(bad)?;
        Ok(Self {
            only_listed: only_listed.as_bool().ok_or_else(bad)?,
            min_approvals: u16::try_from(min_approvals).map_err(|_| bad())?,
        })
    }
}

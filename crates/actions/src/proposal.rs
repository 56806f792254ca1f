//! Actions as reported by the indexer for stored proposals.

use alloy_primitives::{Bytes, U256};
use multisig_abi::parse_address;
use serde::{Deserialize, Serialize};

use crate::{errors::ActionError, types::DaoAction};

/// A proposal action in the indexer's textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgraphAction {
    pub to: String,
    /// Decimal wei amount.
    pub value: String,
    /// `0x`-prefixed hex calldata.
    pub data: String,
}

impl TryFrom<&SubgraphAction> for DaoAction {
    type Error = ActionError;

    fn try_from(action: &SubgraphAction) -> Result<Self, Self::Error> {
        let to = parse_address(&action.to)?;
        let value = U256::from_str_radix(&action.value, 10)
            .map_err(|_| ActionError::InvalidValue(action.value.clone()))?;
        let digits = action.data.strip_prefix("0x").unwrap_or(&action.data);
        let data =
            hex::decode(digits).map_err(|_| ActionError::InvalidData(action.data.clone()))?;
        Ok(Self {
            to,
            value,
            data: Bytes::from(data),
        })
    }
}

/// Converts every indexer action of a proposal, failing on the first malformed one.
pub fn to_dao_actions(actions: &[SubgraphAction]) -> Result<Vec<DaoAction>, ActionError> {
    actions.iter().map(DaoAction::try_from).collect()
}

//! Prediction of on-chain rejections caused by the ordering of a batch.
//!
//! The plugin re-checks its quorum settings against the member count whenever either changes.
//! Growing the member list is only safe if the settings are updated afterwards; shrinking it is
//! only safe once the settings have already been lowered. Actions that do not call the plugin
//! have no bearing on either rule and are skipped.

use std::fmt;

use multisig_abi::{resolve_descriptor, MultisigFunction, MULTISIG_V1_2};
use serde::Serialize;
use tracing::*;

use crate::types::DaoAction;

/// The ordering rule a batch breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderingRule {
    /// Members are added and no settings update follows.
    MissingTrailingSettingsUpdate,
    /// Members are removed before any settings update.
    MissingPriorSettingsUpdate,
}

impl fmt::Display for OrderingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTrailingSettingsUpdate => {
                f.write_str("addAddresses without a later updateMultisigSettings")
            }
            Self::MissingPriorSettingsUpdate => {
                f.write_str("removeAddresses without an earlier updateMultisigSettings")
            }
        }
    }
}

/// The first offending action of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderingViolation {
    /// Position of the offending action in the analyzed batch.
    pub index: usize,
    pub rule: OrderingRule,
}

/// Outcome of [`analyze_ordering`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderingReport {
    violation: Option<OrderingViolation>,
}

impl OrderingReport {
    /// Whether the batch is predicted to be rejected on-chain.
    pub fn would_fail(&self) -> bool {
        self.violation.is_some()
    }

    pub fn violation(&self) -> Option<OrderingViolation> {
        self.violation
    }
}

/// Scans the calldata of a batch, in submission order, for ordering violations.
///
/// Reports the violation at the lowest index. The scan never rejects anything; acting on the
/// report is up to the caller.
pub fn analyze_ordering<A: AsRef<[u8]>>(actions: &[A]) -> OrderingReport {
    let mut seen_update = false;
    // first add since the most recent update
    let mut pending_add = None;
    let mut early_remove = None;

    for (index, data) in actions.iter().enumerate() {
        let Some(function) = classify(data.as_ref()) else {
            continue;
        };
        match function {
            MultisigFunction::UpdateMultisigSettings => {
                seen_update = true;
                pending_add = None;
            }
            MultisigFunction::AddAddresses => {
                pending_add.get_or_insert(index);
            }
            MultisigFunction::RemoveAddresses => {
                if !seen_update {
                    early_remove.get_or_insert(index);
                }
            }
        }
    }

    let trailing = pending_add.map(|index| OrderingViolation {
        index,
        rule: OrderingRule::MissingTrailingSettingsUpdate,
    });
    let prior = early_remove.map(|index| OrderingViolation {
        index,
        rule: OrderingRule::MissingPriorSettingsUpdate,
    });
    let violation = match (trailing, prior) {
        (Some(a), Some(b)) => Some(if a.index < b.index { a } else { b }),
        (a, b) => a.or(b),
    };

    if let Some(violation) = violation {
        debug!(
            index = violation.index,
            rule = %violation.rule,
            "batch ordering would fail on-chain"
        );
    }
    OrderingReport { violation }
}

/// Whether executing `actions` in order would be rejected by the plugin.
pub fn is_failing_proposal(actions: &[DaoAction]) -> bool {
    let payloads = actions.iter().map(|a| &a.data).collect::<Vec<_>>();
    analyze_ordering(&payloads).would_fail()
}

fn classify(data: &[u8]) -> Option<MultisigFunction> {
    resolve_descriptor(data, MULTISIG_V1_2.functions())
        .and_then(|descriptor| MultisigFunction::from_name(descriptor.name))
}

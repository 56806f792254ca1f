//! Subcommand execution for the `multisig-tool` binary.

use std::path::{Path, PathBuf};

use alloy_primitives::Bytes;
use anyhow::Context;
use multisig_actions::{
    add_addresses_action, analyze_ordering, decode_multisig_call, find_interface,
    plugin_install_item, remove_addresses_action, update_multisig_settings_action,
    MultisigPluginInstallParams, MultisigSettings, NetworkRegistry, OrderingViolation,
};
use serde::Serialize;
use tracing::*;

use crate::args::{
    SubcAnalyze, SubcDecode, SubcEncodeAdd, SubcEncodeRemove, SubcEncodeSettings, SubcInstall,
    SubcResolve, Subcommand,
};

/// Registry path used when `install` is not given one.
const DEFAULT_REGISTRY_PATH: &str = "networks.toml";

/// JSON shape of the `analyze` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeOutput {
    would_fail: bool,
    violation: Option<OrderingViolation>,
}

/// Executes a subcommand.
pub(super) fn exec_subc(cmd: Subcommand) -> anyhow::Result<()> {
    match cmd {
        Subcommand::EncodeAdd(subc) => exec_encode_add(subc),
        Subcommand::EncodeRemove(subc) => exec_encode_remove(subc),
        Subcommand::EncodeSettings(subc) => exec_encode_settings(subc),
        Subcommand::Decode(subc) => exec_decode(subc),
        Subcommand::Resolve(subc) => exec_resolve(subc),
        Subcommand::Analyze(subc) => exec_analyze(subc),
        Subcommand::Install(subc) => exec_install(subc),
    }
}

fn exec_encode_add(cmd: SubcEncodeAdd) -> anyhow::Result<()> {
    let action = add_addresses_action(&cmd.plugin, &cmd.members)?;
    print_json(&action)
}

fn exec_encode_remove(cmd: SubcEncodeRemove) -> anyhow::Result<()> {
    let action = remove_addresses_action(&cmd.plugin, &cmd.members)?;
    print_json(&action)
}

fn exec_encode_settings(cmd: SubcEncodeSettings) -> anyhow::Result<()> {
    let settings = MultisigSettings {
        only_listed: cmd.only_listed,
        min_approvals: cmd.min_approvals,
    };
    let action = update_multisig_settings_action(&cmd.plugin, &settings)?;
    print_json(&action)
}

fn exec_decode(cmd: SubcDecode) -> anyhow::Result<()> {
    let data = parse_hex(&cmd.data)?;
    let call = decode_multisig_call(&data)?;
    print_json(&call)
}

fn exec_resolve(cmd: SubcResolve) -> anyhow::Result<()> {
    let data = parse_hex(&cmd.data)?;
    // a miss prints `null`
    print_json(&find_interface(&data))
}

fn exec_analyze(cmd: SubcAnalyze) -> anyhow::Result<()> {
    let payloads = cmd
        .actions
        .iter()
        .enumerate()
        .map(|(i, raw)| parse_hex(raw).with_context(|| format!("action {i}")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let report = analyze_ordering(&payloads);
    info!(actions = payloads.len(), would_fail = report.would_fail(), "analyzed batch");
    print_json(&AnalyzeOutput {
        would_fail: report.would_fail(),
        violation: report.violation(),
    })
}

fn exec_install(cmd: SubcInstall) -> anyhow::Result<()> {
    let path = cmd
        .registry
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REGISTRY_PATH));
    let registry = load_registry(&path)?;
    let params = MultisigPluginInstallParams {
        members: cmd.members,
        voting_settings: MultisigSettings {
            only_listed: cmd.only_listed,
            min_approvals: cmd.min_approvals,
        },
    };
    let item = plugin_install_item(&params, &cmd.network, &registry)?;
    print_json(&item)
}

fn load_registry(path: &Path) -> anyhow::Result<NetworkRegistry> {
    NetworkRegistry::load(path)
        .with_context(|| format!("failed to load network registry from {}", path.display()))
}

/// Parses hex calldata, with or without a `0x` prefix.
fn parse_hex(raw: &str) -> anyhow::Result<Bytes> {
    let digits = raw.trim();
    let digits = digits.strip_prefix("0x").unwrap_or(digits);
    let bytes = hex::decode(digits).with_context(|| format!("invalid hex data: {raw}"))?;
    Ok(bytes.into())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let buf = serde_json::to_string_pretty(value)?;
    println!("{buf}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("0x7E47").unwrap()[..], [0x7e, 0x47]);
        assert_eq!(parse_hex(" 3628731c ").unwrap()[..], [0x36, 0x28, 0x73, 0x1c]);
        assert!(parse_hex("0x").unwrap().is_empty());
        assert!(parse_hex("0x7E4").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn test_analyze_output_shape() {
        let payloads = [parse_hex("0xa84eb999").unwrap()];
        let report = analyze_ordering(&payloads);
        let json = serde_json::to_value(AnalyzeOutput {
            would_fail: report.would_fail(),
            violation: report.violation(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "wouldFail": true,
                "violation": { "index": 0, "rule": "missingPriorSettingsUpdate" }
            })
        );
    }

    #[test]
    fn test_missing_registry_is_reported() {
        let err = load_registry(Path::new("/nonexistent/networks.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to load network registry"));
    }
}

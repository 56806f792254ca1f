//! Command line arguments for the `multisig-tool` binary.

use std::path::PathBuf;

use argh::FromArgs;

/// Args.
#[derive(FromArgs)]
pub(crate) struct Args {
    #[argh(switch, description = "emit logs as JSON")]
    pub(crate) log_json: bool,

    #[argh(subcommand)]
    pub(crate) subc: Subcommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Subcommand {
    EncodeAdd(SubcEncodeAdd),
    EncodeRemove(SubcEncodeRemove),
    EncodeSettings(SubcEncodeSettings),
    Decode(SubcDecode),
    Resolve(SubcResolve),
    Analyze(SubcAnalyze),
    Install(SubcInstall),
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "encode-add",
    description = "builds an action adding members to the plugin"
)]
pub(crate) struct SubcEncodeAdd {
    #[argh(option, description = "plugin address", short = 'p')]
    pub(crate) plugin: String,

    #[argh(positional, description = "member addresses")]
    pub(crate) members: Vec<String>,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "encode-remove",
    description = "builds an action removing members from the plugin"
)]
pub(crate) struct SubcEncodeRemove {
    #[argh(option, description = "plugin address", short = 'p')]
    pub(crate) plugin: String,

    #[argh(positional, description = "member addresses")]
    pub(crate) members: Vec<String>,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "encode-settings",
    description = "builds an action updating the quorum settings"
)]
pub(crate) struct SubcEncodeSettings {
    #[argh(option, description = "plugin address", short = 'p')]
    pub(crate) plugin: String,

    #[argh(option, description = "approvals required for a proposal to pass", short = 'm')]
    pub(crate) min_approvals: u16,

    #[argh(switch, description = "only listed members may create proposals")]
    pub(crate) only_listed: bool,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "decode",
    description = "decodes the arguments of a plugin call"
)]
pub(crate) struct SubcDecode {
    #[argh(positional, description = "hex calldata")]
    pub(crate) data: String,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "resolve",
    description = "identifies which plugin function a payload calls"
)]
pub(crate) struct SubcResolve {
    #[argh(positional, description = "hex calldata")]
    pub(crate) data: String,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "analyze",
    description = "predicts whether a batch of actions fails on ordering"
)]
pub(crate) struct SubcAnalyze {
    #[argh(positional, description = "hex calldata of each action, in submission order")]
    pub(crate) actions: Vec<String>,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "install",
    description = "builds the plugin install item for a network"
)]
pub(crate) struct SubcInstall {
    #[argh(option, description = "network name or chain id", short = 'n')]
    pub(crate) network: String,

    #[argh(
        option,
        description = "path to the network registry .toml (default networks.toml)",
        short = 'r'
    )]
    pub(crate) registry: Option<PathBuf>,

    #[argh(option, description = "approvals required for a proposal to pass", short = 'm')]
    pub(crate) min_approvals: u16,

    #[argh(switch, description = "only listed members may create proposals")]
    pub(crate) only_listed: bool,

    #[argh(positional, description = "initial member addresses")]
    pub(crate) members: Vec<String>,
}

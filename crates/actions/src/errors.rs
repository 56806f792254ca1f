use std::io;

use multisig_abi::AbiError;
use thiserror::Error;

/// Errors raised while building or interpreting governance actions.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Address validation, encoding or decoding failed.
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// The network is not present in the supported-network registry.
    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),

    /// The payload does not call any known multisig function.
    #[error("unrecognized multisig call: {0}")]
    UnrecognizedCall(String),

    /// A decoded argument does not have the shape the typed decoder expects.
    #[error("unexpected decoded value for {0}")]
    UnexpectedValue(&'static str),

    /// A textual action value is not a decimal integer.
    #[error("invalid action value: {0}")]
    InvalidValue(String),

    /// A textual action payload is not hex.
    #[error("invalid action data: {0}")]
    InvalidData(String),

    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while loading the network registry.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("unparsable network registry: {0}")]
    Parse(#[from] toml::de::Error),
}

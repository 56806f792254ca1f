use thiserror::Error;

/// Errors produced while validating, encoding or decoding ABI payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AbiError {
    /// An account identifier is not a 20-byte hex address (or fails its checksum).
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The number of supplied arguments differs from the declared parameter list.
    #[error("argument count mismatch for {context}: expected {expected}, got {actual}")]
    ArgumentCount {
        /// Function or schema the arguments were supplied for.
        context: String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        actual: usize,
    },

    /// A supplied value does not have the shape of its declared type.
    #[error("argument {argument} does not match declared type {expected}")]
    TypeMismatch {
        /// Path of the offending argument, e.g. `_multisigSettings.minApprovals`.
        argument: String,
        /// Canonical form of the declared type.
        expected: String,
    },

    /// An integer value is wider than its declared type.
    #[error("value of argument {argument} does not fit in {expected}")]
    ValueOutOfRange {
        /// Path of the offending argument.
        argument: String,
        /// Canonical form of the declared type.
        expected: String,
    },

    /// The leading 4 bytes of the payload are not the selector of the expected function.
    #[error(
        "data signature does not match function {function}. (argument=\"data\", value=\"{data}\")"
    )]
    SelectorMismatch {
        /// Name of the function the payload was decoded against.
        function: String,
        /// Selector of that function, as `0x`-prefixed hex.
        expected: String,
        /// The whole observed payload, as `0x`-prefixed hex.
        data: String,
    },

    /// The argument region of a payload is not a valid encoding of the declared types.
    #[error("{reason} (argument=\"{argument}\", value=\"{data}\")")]
    MalformedPayload {
        /// Declared name (or path) of the argument being decoded when parsing failed.
        argument: String,
        /// Decoder diagnostic.
        reason: String,
        /// The whole offending payload, as `0x`-prefixed hex.
        data: String,
    },
}

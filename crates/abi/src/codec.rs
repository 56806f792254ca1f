//! ABI tuple encoding and decoding.
//!
//! The layout is the standard head/tail scheme: every parameter reserves a fixed number of
//! 32-byte words in the head; dynamic parameters (lists, tuples containing lists) store an
//! offset there instead and append their data to the tail. Offsets are relative to the start of
//! the enclosing tuple.

use alloy_primitives::{Address, Bytes, Selector, U256};
use tracing::*;

use crate::{
    errors::AbiError,
    selector::selector_hex,
    types::{AbiValue, FunctionDescriptor, Param, ParamType, WORD_SIZE},
};

/// Length of a function selector prefix.
const SELECTOR_LEN: usize = 4;

/// A function call ready to be put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAction {
    selector: Selector,
    payload: Vec<u8>,
}

impl EncodedAction {
    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// The encoded argument tuple, without the selector.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Full calldata: selector followed by the encoded arguments.
    pub fn to_calldata(&self) -> Bytes {
        let mut out = Vec::with_capacity(SELECTOR_LEN + self.payload.len());
        out.extend_from_slice(self.selector.as_slice());
        out.extend_from_slice(&self.payload);
        out.into()
    }
}

/// Encodes a call to `descriptor` with `args`.
///
/// # Errors
///
/// Fails with `ArgumentCount`, `TypeMismatch` or `ValueOutOfRange` if `args` does not match the
/// declared parameters. Validation runs over every argument before any bytes are produced.
pub fn encode_call(
    descriptor: &FunctionDescriptor,
    args: &[AbiValue],
) -> Result<EncodedAction, AbiError> {
    let payload = encode_params_in(descriptor.name, descriptor.inputs, args)?;
    Ok(EncodedAction {
        selector: descriptor.selector(),
        payload,
    })
}

/// Encodes `args` as a bare tuple of `params` (no selector).
pub fn encode_params(params: &[Param], args: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    encode_params_in("parameters", params, args)
}

fn encode_params_in(
    context: &str,
    params: &[Param],
    args: &[AbiValue],
) -> Result<Vec<u8>, AbiError> {
    if params.len() != args.len() {
        return Err(AbiError::ArgumentCount {
            context: context.to_owned(),
            expected: params.len(),
            actual: args.len(),
        });
    }
    for (param, value) in params.iter().zip(args) {
        check_value(&param.kind, value, param.name)?;
    }

    let kinds = params.iter().map(|p| p.kind).collect::<Vec<_>>();
    let mut out = Vec::new();
    encode_sequence(&kinds, args, &mut out);
    Ok(out)
}

/// Checks that `value` has the shape of `kind` and that integers fit their width.
fn check_value(kind: &ParamType, value: &AbiValue, path: &str) -> Result<(), AbiError> {
    let mismatch = || AbiError::TypeMismatch {
        argument: path.to_owned(),
        expected: kind.canonical(),
    };
    match (kind, value) {
        (ParamType::Address, AbiValue::Address(_)) | (ParamType::Bool, AbiValue::Bool(_)) => Ok(()),
        (ParamType::Uint(bits), AbiValue::Uint(number)) => {
            if number.bit_len() > *bits {
                return Err(AbiError::ValueOutOfRange {
                    argument: path.to_owned(),
                    expected: kind.canonical(),
                });
            }
            Ok(())
        }
        (ParamType::Array(inner), AbiValue::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                check_value(inner, item, &format!("{path}[{i}]"))?;
            }
            Ok(())
        }
        (ParamType::Tuple(components), AbiValue::Tuple(items)) => {
            if components.len() != items.len() {
                return Err(mismatch());
            }
            for (component, item) in components.iter().zip(items) {
                check_value(&component.kind, item, &format!("{path}.{}", component.name))?;
            }
            Ok(())
        }
        _ => Err(mismatch()),
    }
}

/// Appends the head/tail encoding of `values` to `out`. Shapes must already be checked.
fn encode_sequence(kinds: &[ParamType], values: &[AbiValue], out: &mut Vec<u8>) {
    let head_len = kinds.iter().map(ParamType::head_words).sum::<usize>() * WORD_SIZE;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for (kind, value) in kinds.iter().zip(values) {
        if kind.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len + tail.len()));
            encode_value(kind, value, &mut tail);
        } else {
            encode_value(kind, value, &mut head);
        }
    }

    out.extend_from_slice(&head);
    out.extend_from_slice(&tail);
}

fn encode_value(kind: &ParamType, value: &AbiValue, out: &mut Vec<u8>) {
    match value {
        AbiValue::Address(address) => out.extend_from_slice(address.into_word().as_slice()),
        AbiValue::Bool(flag) => out.extend_from_slice(&usize_word(usize::from(*flag))),
        AbiValue::Uint(number) => out.extend_from_slice(&number.to_be_bytes::<32>()),
        AbiValue::Array(items) => {
            out.extend_from_slice(&usize_word(items.len()));
            encode_sequence(&kind.children(items.len()), items, out);
        }
        AbiValue::Tuple(items) => encode_sequence(&kind.children(items.len()), items, out),
    }
}

fn usize_word(value: usize) -> [u8; WORD_SIZE] {
    U256::from(value).to_be_bytes::<32>()
}

/// Decodes calldata produced for `descriptor` back into its arguments.
///
/// # Errors
///
/// - `SelectorMismatch` if the payload does not start with the descriptor's selector (this
///   includes payloads shorter than 4 bytes).
/// - `MalformedPayload` if the argument region is not a valid encoding of the declared types.
pub fn decode_call(
    descriptor: &FunctionDescriptor,
    calldata: &[u8],
) -> Result<Vec<AbiValue>, AbiError> {
    let expected = descriptor.selector();
    if calldata.get(..SELECTOR_LEN) != Some(expected.as_slice()) {
        return Err(AbiError::SelectorMismatch {
            function: descriptor.name.to_owned(),
            expected: selector_hex(expected),
            data: hex_payload(calldata),
        });
    }

    decode_tuple(descriptor.inputs, &calldata[SELECTOR_LEN..]).map_err(|fault| {
        trace!(
            function = descriptor.name,
            argument = %fault.argument,
            "failed to decode calldata"
        );
        fault.into_error(calldata)
    })
}

/// Decodes a bare tuple of `params` (no selector).
pub fn decode_params(params: &[Param], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
    decode_tuple(params, data).map_err(|fault| fault.into_error(data))
}

/// Decoder diagnostic before the offending payload is attached.
#[derive(Debug)]
struct DecodeFault {
    argument: String,
    reason: String,
}

impl DecodeFault {
    fn new(argument: &str, reason: impl Into<String>) -> Self {
        Self {
            argument: argument.to_owned(),
            reason: reason.into(),
        }
    }

    fn into_error(self, payload: &[u8]) -> AbiError {
        AbiError::MalformedPayload {
            argument: self.argument,
            reason: self.reason,
            data: hex_payload(payload),
        }
    }
}

fn decode_tuple(params: &[Param], data: &[u8]) -> Result<Vec<AbiValue>, DecodeFault> {
    if data.len() % WORD_SIZE != 0 {
        return Err(DecodeFault::new(
            "data",
            format!("data length {} is not a multiple of {WORD_SIZE}", data.len()),
        ));
    }
    let fields = params
        .iter()
        .map(|p| (p.name.to_owned(), p.kind))
        .collect::<Vec<_>>();
    decode_sequence(&fields, data)
}

/// Decodes a head/tail sequence starting at the beginning of `buf`.
fn decode_sequence(
    fields: &[(String, ParamType)],
    buf: &[u8],
) -> Result<Vec<AbiValue>, DecodeFault> {
    let mut values = Vec::with_capacity(fields.len());
    let mut head = 0usize;

    for (path, kind) in fields {
        let value = if kind.is_dynamic() {
            let offset = read_usize(buf, head, path)?;
            if offset > buf.len() {
                return Err(DecodeFault::new(path, "offset points past the end of data"));
            }
            decode_value(kind, &buf[offset..], path)?
        } else {
            decode_value(kind, &buf[head.min(buf.len())..], path)?
        };
        values.push(value);
        head += kind.head_words() * WORD_SIZE;
    }

    Ok(values)
}

fn decode_value(kind: &ParamType, buf: &[u8], path: &str) -> Result<AbiValue, DecodeFault> {
    match kind {
        ParamType::Address => {
            let word = read_word(buf, 0, path)?;
            if word[..12].iter().any(|b| *b != 0) {
                return Err(DecodeFault::new(path, "address word has non-zero padding"));
            }
            Ok(AbiValue::Address(Address::from_slice(&word[12..])))
        }
        ParamType::Bool => match U256::from_be_slice(read_word(buf, 0, path)?) {
            value if value.is_zero() => Ok(AbiValue::Bool(false)),
            value if value == U256::from(1u8) => Ok(AbiValue::Bool(true)),
            _ => Err(DecodeFault::new(path, "invalid boolean value")),
        },
        ParamType::Uint(bits) => {
            let value = U256::from_be_slice(read_word(buf, 0, path)?);
            if value.bit_len() > *bits {
                return Err(DecodeFault::new(
                    path,
                    format!("value out-of-bounds for uint{bits}"),
                ));
            }
            Ok(AbiValue::Uint(value))
        }
        ParamType::Array(inner) => {
            let len = read_usize(buf, 0, path)?;
            let body = &buf[WORD_SIZE..];
            let needed = len.checked_mul(inner.head_words() * WORD_SIZE);
            if needed.is_none_or(|needed| needed > body.len()) {
                return Err(DecodeFault::new(
                    path,
                    format!("array length {len} exceeds available data"),
                ));
            }
            let fields = (0..len)
                .map(|i| (format!("{path}[{i}]"), **inner))
                .collect::<Vec<_>>();
            decode_sequence(&fields, body).map(AbiValue::Array)
        }
        ParamType::Tuple(components) => {
            let fields = components
                .iter()
                .map(|c| (format!("{path}.{}", c.name), c.kind))
                .collect::<Vec<_>>();
            decode_sequence(&fields, buf).map(AbiValue::Tuple)
        }
    }
}

fn read_word<'b>(buf: &'b [u8], at: usize, path: &str) -> Result<&'b [u8], DecodeFault> {
    at.checked_add(WORD_SIZE)
        .and_then(|end| buf.get(at..end))
        .ok_or_else(|| DecodeFault::new(path, "data out-of-bounds"))
}

/// Reads a word holding an offset or a length. Values that cannot index into memory are faults.
fn read_usize(buf: &[u8], at: usize, path: &str) -> Result<usize, DecodeFault> {
    let value = U256::from_be_slice(read_word(buf, at, path)?);
    usize::try_from(value).map_err(|_| DecodeFault::new(path, "offset or length out-of-range"))
}

fn hex_payload(payload: &[u8]) -> String {
    format!("0x{}", hex::encode(payload))
}

#[cfg(test)]
mod tests {
    use alloy_sol_types::{sol, SolCall};
    use proptest::prelude::*;

    use super::*;
    use crate::{
        address::parse_addresses,
        catalog::{ADD_ADDRESSES, MULTISIG_V1_2, REMOVE_ADDRESSES, UPDATE_MULTISIG_SETTINGS},
    };

    sol! {
        struct MultisigSettings {
            bool onlyListed;
            uint16 minApprovals;
        }

        function addAddresses(address[] _members);
        function removeAddresses(address[] _members);
        function updateMultisigSettings(MultisigSettings _multisigSettings);
    }

    const MEMBERS: [&str; 3] = [
        "0x1357924680135792468013579246801357924680",
        "0x2468013579246801357924680135792468013579",
        "0x0987654321098765432109876543210987654321",
    ];

    const ADD_GOLDEN: &str = "0x3628731c\
        0000000000000000000000000000000000000000000000000000000000000020\
        0000000000000000000000000000000000000000000000000000000000000003\
        0000000000000000000000001357924680135792468013579246801357924680\
        0000000000000000000000002468013579246801357924680135792468013579\
        0000000000000000000000000987654321098765432109876543210987654321";

    fn members() -> Vec<Address> {
        parse_addresses(&MEMBERS).unwrap()
    }

    fn settings_value(only_listed: bool, min_approvals: u16) -> AbiValue {
        AbiValue::Tuple(vec![
            AbiValue::Bool(only_listed),
            AbiValue::Uint(U256::from(min_approvals)),
        ])
    }

    #[test]
    fn test_add_addresses_golden_payload() {
        let encoded = encode_call(&ADD_ADDRESSES, &[AbiValue::address_list(members())]).unwrap();
        assert_eq!(hex_payload(&encoded.to_calldata()), ADD_GOLDEN);
    }

    #[test]
    fn test_remove_addresses_golden_payload() {
        let encoded =
            encode_call(&REMOVE_ADDRESSES, &[AbiValue::address_list(members())]).unwrap();
        let expected = ADD_GOLDEN.replacen("3628731c", "a84eb999", 1);
        assert_eq!(hex_payload(&encoded.to_calldata()), expected);
    }

    #[test]
    fn test_matches_sol_types_encoder() {
        let add = encode_call(&ADD_ADDRESSES, &[AbiValue::address_list(members())]).unwrap();
        let reference = addAddressesCall { _members: members() }.abi_encode();
        assert_eq!(add.to_calldata().to_vec(), reference);
        assert_eq!(add.selector().0, addAddressesCall::SELECTOR);

        let remove = encode_call(&REMOVE_ADDRESSES, &[AbiValue::address_list(vec![])]).unwrap();
        let reference = removeAddressesCall { _members: vec![] }.abi_encode();
        assert_eq!(remove.to_calldata().to_vec(), reference);

        let update = encode_call(&UPDATE_MULTISIG_SETTINGS, &[settings_value(true, 3)]).unwrap();
        let reference = updateMultisigSettingsCall {
            _multisigSettings: MultisigSettings {
                onlyListed: true,
                minApprovals: 3,
            },
        }
        .abi_encode();
        assert_eq!(update.to_calldata().to_vec(), reference);
    }

    #[test]
    fn test_empty_list_encodes_zero_length() {
        let encoded = encode_call(&ADD_ADDRESSES, &[AbiValue::Array(vec![])]).unwrap();
        let payload = encoded.payload();
        assert_eq!(payload.len(), 2 * WORD_SIZE);
        assert_eq!(payload[..WORD_SIZE], usize_word(WORD_SIZE));
        assert!(payload[WORD_SIZE..].iter().all(|b| *b == 0));

        let decoded = decode_call(&ADD_ADDRESSES, &encoded.to_calldata()).unwrap();
        assert_eq!(decoded, vec![AbiValue::Array(vec![])]);
    }

    #[test]
    fn test_settings_are_inlined_in_head() {
        let encoded =
            encode_call(&UPDATE_MULTISIG_SETTINGS, &[settings_value(false, 513)]).unwrap();
        let payload = encoded.payload();
        assert_eq!(payload.len(), 2 * WORD_SIZE);
        assert_eq!(payload[WORD_SIZE - 1], 0);
        assert_eq!(payload[2 * WORD_SIZE - 2..], [0x02, 0x01]);
    }

    #[test]
    fn test_argument_count_mismatch() {
        let err = encode_call(&ADD_ADDRESSES, &[]).unwrap_err();
        assert_eq!(
            err,
            AbiError::ArgumentCount {
                context: "addAddresses".to_owned(),
                expected: 1,
                actual: 0,
            }
        );
    }

    #[test]
    fn test_type_mismatch_names_nested_argument() {
        let bad = AbiValue::Tuple(vec![AbiValue::Bool(true), AbiValue::Bool(false)]);
        let err = encode_call(&UPDATE_MULTISIG_SETTINGS, &[bad]).unwrap_err();
        assert_eq!(
            err,
            AbiError::TypeMismatch {
                argument: "_multisigSettings.minApprovals".to_owned(),
                expected: "uint16".to_owned(),
            }
        );

        let bad_list = AbiValue::Array(vec![
            AbiValue::Address(Address::ZERO),
            AbiValue::Bool(true),
        ]);
        let err = encode_call(&ADD_ADDRESSES, &[bad_list]).unwrap_err();
        assert_eq!(
            err,
            AbiError::TypeMismatch {
                argument: "_members[1]".to_owned(),
                expected: "address".to_owned(),
            }
        );
    }

    #[test]
    fn test_uint_out_of_range() {
        let too_wide = AbiValue::Tuple(vec![
            AbiValue::Bool(true),
            AbiValue::Uint(U256::from(u32::from(u16::MAX) + 1)),
        ]);
        let err = encode_call(&UPDATE_MULTISIG_SETTINGS, &[too_wide]).unwrap_err();
        assert!(matches!(err, AbiError::ValueOutOfRange { .. }), "{err}");
    }

    #[test]
    fn test_selector_mismatch_message() {
        let data = [11u8, 22, 22, 33, 33, 33];
        let err = decode_call(&ADD_ADDRESSES, &data).unwrap_err();
        assert_eq!(
            err.to_string(),
            "data signature does not match function addAddresses. (argument=\"data\", value=\"0x0b1616212121\")"
        );
    }

    #[test]
    fn test_wrong_descriptor_is_selector_mismatch() {
        let encoded = encode_call(&ADD_ADDRESSES, &[AbiValue::address_list(members())]).unwrap();
        let err = decode_call(&REMOVE_ADDRESSES, &encoded.to_calldata()).unwrap_err();
        match err {
            AbiError::SelectorMismatch {
                function, expected, ..
            } => {
                assert_eq!(function, "removeAddresses");
                assert_eq!(expected, "0xa84eb999");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_short_payload_is_selector_mismatch() {
        let err = decode_call(&ADD_ADDRESSES, &[0x36, 0x28]).unwrap_err();
        assert!(matches!(err, AbiError::SelectorMismatch { .. }));
    }

    #[test]
    fn test_unaligned_garbage_is_malformed() {
        let mut data = ADD_ADDRESSES.selector().to_vec();
        data.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef, 0x01]);
        let err = decode_call(&ADD_ADDRESSES, &data).unwrap_err();
        assert_eq!(
            err,
            AbiError::MalformedPayload {
                argument: "data".to_owned(),
                reason: "data length 5 is not a multiple of 32".to_owned(),
                data: "0x3628731cdeadbeef01".to_owned(),
            }
        );
    }

    #[test]
    fn test_truncated_payload_is_malformed() {
        let encoded = encode_call(&ADD_ADDRESSES, &[AbiValue::address_list(members())]).unwrap();
        let calldata = encoded.to_calldata();
        let truncated = &calldata[..calldata.len() - WORD_SIZE];
        let err = decode_call(&ADD_ADDRESSES, truncated).unwrap_err();
        match err {
            AbiError::MalformedPayload { argument, data, .. } => {
                assert_eq!(argument, "_members");
                assert_eq!(data, hex_payload(truncated));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_huge_length_is_malformed() {
        let mut data = ADD_ADDRESSES.selector().to_vec();
        data.extend_from_slice(&usize_word(WORD_SIZE));
        data.extend_from_slice(&[0xff; WORD_SIZE]);
        let err = decode_call(&ADD_ADDRESSES, &data).unwrap_err();
        assert!(
            err.to_string().contains("offset or length out-of-range"),
            "{err}"
        );

        let mut data = ADD_ADDRESSES.selector().to_vec();
        data.extend_from_slice(&usize_word(WORD_SIZE));
        data.extend_from_slice(&usize_word(1_000));
        let err = decode_call(&ADD_ADDRESSES, &data).unwrap_err();
        assert!(err.to_string().contains("exceeds available data"), "{err}");
    }

    #[test]
    fn test_offset_past_end_is_malformed() {
        let mut data = ADD_ADDRESSES.selector().to_vec();
        data.extend_from_slice(&usize_word(4 * WORD_SIZE));
        let err = decode_call(&ADD_ADDRESSES, &data).unwrap_err();
        assert!(err.to_string().contains("past the end"), "{err}");
    }

    #[test]
    fn test_dirty_words_are_malformed() {
        let mut data = UPDATE_MULTISIG_SETTINGS.selector().to_vec();
        data.extend_from_slice(&usize_word(2));
        data.extend_from_slice(&usize_word(3));
        let err = decode_call(&UPDATE_MULTISIG_SETTINGS, &data).unwrap_err();
        assert!(
            matches!(&err, AbiError::MalformedPayload { argument, .. } if argument == "_multisigSettings.onlyListed"),
            "{err:?}"
        );

        let mut data = UPDATE_MULTISIG_SETTINGS.selector().to_vec();
        data.extend_from_slice(&usize_word(1));
        data.extend_from_slice(&usize_word(70_000));
        let err = decode_call(&UPDATE_MULTISIG_SETTINGS, &data).unwrap_err();
        assert!(err.to_string().contains("uint16"), "{err}");

        let mut data = ADD_ADDRESSES.selector().to_vec();
        data.extend_from_slice(&usize_word(WORD_SIZE));
        data.extend_from_slice(&usize_word(1));
        data.extend_from_slice(&[0xff; WORD_SIZE]);
        let err = decode_call(&ADD_ADDRESSES, &data).unwrap_err();
        assert!(
            matches!(&err, AbiError::MalformedPayload { argument, .. } if argument == "_members[0]"),
            "{err:?}"
        );
    }

    #[test]
    fn test_installation_schema_matches_sol_types() {
        use alloy_sol_types::SolValue;

        let schema = MULTISIG_V1_2.installation_schema();
        let args = [AbiValue::address_list(members()), settings_value(true, 2)];
        let encoded = encode_params(schema, &args).unwrap();
        let reference = (
            members(),
            MultisigSettings {
                onlyListed: true,
                minApprovals: 2,
            },
        )
            .abi_encode_params();
        assert_eq!(encoded, reference);
        assert_eq!(decode_params(schema, &encoded).unwrap(), args);
    }

    fn arb_address() -> impl Strategy<Value = Address> {
        any::<[u8; 20]>().prop_map(Address::from)
    }

    proptest! {
        #[test]
        fn proptest_membership_round_trip(
            list in prop::collection::vec(arb_address(), 0..16),
            remove in any::<bool>(),
        ) {
            let descriptor = if remove { &REMOVE_ADDRESSES } else { &ADD_ADDRESSES };
            let args = vec![AbiValue::address_list(list.clone())];
            let encoded = encode_call(descriptor, &args).unwrap();
            prop_assert_eq!(encoded.selector(), descriptor.selector());
            prop_assert_eq!(decode_call(descriptor, &encoded.to_calldata()).unwrap(), args);

            let reference = if remove {
                removeAddressesCall { _members: list }.abi_encode()
            } else {
                addAddressesCall { _members: list }.abi_encode()
            };
            prop_assert_eq!(encoded.to_calldata().to_vec(), reference);
        }

        #[test]
        fn proptest_settings_round_trip(only_listed in any::<bool>(), min_approvals in any::<u16>()) {
            let args = vec![settings_value(only_listed, min_approvals)];
            let encoded = encode_call(&UPDATE_MULTISIG_SETTINGS, &args).unwrap();
            prop_assert_eq!(
                decode_call(&UPDATE_MULTISIG_SETTINGS, &encoded.to_calldata()).unwrap(),
                args
            );
        }

        #[test]
        fn proptest_decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
            for descriptor in MULTISIG_V1_2.functions() {
                let mut calldata = descriptor.selector().to_vec();
                calldata.extend_from_slice(&data);
                let _ = decode_call(descriptor, &calldata);
            }
        }
    }
}

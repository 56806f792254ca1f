//! Static, versioned catalog of the multisig plugin's mutating entry points.
//!
//! Each plugin build gets its own catalog constant.

use std::fmt;

use crate::types::{FunctionDescriptor, Param, ParamType};

const ADDRESS_LIST: ParamType = ParamType::Array(&ParamType::Address);

/// Components of the plugin's `MultisigSettings` struct.
const MULTISIG_SETTINGS: ParamType = ParamType::Tuple(&[
    Param {
        name: "onlyListed",
        kind: ParamType::Bool,
    },
    Param {
        name: "minApprovals",
        kind: ParamType::Uint(16),
    },
]);

/// `addAddresses(address[] _members)`
pub const ADD_ADDRESSES: FunctionDescriptor = FunctionDescriptor {
    name: "addAddresses",
    inputs: &[Param {
        name: "_members",
        kind: ADDRESS_LIST,
    }],
};

/// `removeAddresses(address[] _members)`
pub const REMOVE_ADDRESSES: FunctionDescriptor = FunctionDescriptor {
    name: "removeAddresses",
    inputs: &[Param {
        name: "_members",
        kind: ADDRESS_LIST,
    }],
};

/// `updateMultisigSettings(MultisigSettings _multisigSettings)`
pub const UPDATE_MULTISIG_SETTINGS: FunctionDescriptor = FunctionDescriptor {
    name: "updateMultisigSettings",
    inputs: &[Param {
        name: "_multisigSettings",
        kind: MULTISIG_SETTINGS,
    }],
};

/// Initialization tuple handed to the plugin setup: `(address[] members, MultisigSettings)`.
const INSTALLATION_SCHEMA: &[Param] = &[
    Param {
        name: "members",
        kind: ADDRESS_LIST,
    },
    Param {
        name: "multisigSettings",
        kind: MULTISIG_SETTINGS,
    },
];

/// Catalog for plugin release 1, build 2.
pub const MULTISIG_V1_2: AbiCatalog = AbiCatalog {
    release: 1,
    build: 2,
    functions: &[ADD_ADDRESSES, REMOVE_ADDRESSES, UPDATE_MULTISIG_SETTINGS],
    installation: INSTALLATION_SCHEMA,
};

/// A closed table of function descriptors plus the installation schema for one plugin version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbiCatalog {
    release: u8,
    build: u16,
    functions: &'static [FunctionDescriptor],
    installation: &'static [Param],
}

impl AbiCatalog {
    /// `(release, build)` of the plugin this catalog describes.
    pub fn version(&self) -> (u8, u16) {
        (self.release, self.build)
    }

    /// All descriptors, in catalog order.
    pub fn functions(&self) -> &'static [FunctionDescriptor] {
        self.functions
    }

    pub fn lookup(&self, name: &str) -> Option<&'static FunctionDescriptor> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// The installation tuple layout (not a function call, no selector).
    pub fn installation_schema(&self) -> &'static [Param] {
        self.installation
    }
}

/// The plugin entry points known to the client, keyed by function name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultisigFunction {
    AddAddresses,
    RemoveAddresses,
    UpdateMultisigSettings,
}

impl MultisigFunction {
    pub const ALL: [MultisigFunction; 3] = [
        Self::AddAddresses,
        Self::RemoveAddresses,
        Self::UpdateMultisigSettings,
    ];

    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    pub fn descriptor(&self) -> &'static FunctionDescriptor {
        match self {
            Self::AddAddresses => &ADD_ADDRESSES,
            Self::RemoveAddresses => &REMOVE_ADDRESSES,
            Self::UpdateMultisigSettings => &UPDATE_MULTISIG_SETTINGS,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for MultisigFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! # Standards Capability Registry
//!
//! Conformance is declared as a registry of named standards, each mapping to
//! the operation names it covers. Callers check `supports_standard`
//! before relying on an operation family.

/// One declared standard and the operations it covers.
#[derive(Debug, Clone, Copy)]
pub struct StandardCapability {
    pub name: &'static str,
    pub operations: &'static [&'static str],
}

/// Every standard this engine implements.
pub const STANDARDS: &[StandardCapability] = &[
    StandardCapability {
        name: "did-registry",
        operations: &[
            "DidMethod",
            "IsValidDid",
            "AddDidDocument",
            "GetDidDocument",
            "UpdateDidDocument",
            "GetDidByPubkey",
            "GetDidByAddress",
        ],
    },
    StandardCapability {
        name: "vc-trust",
        operations: &[
            "VerifyVc",
            "VerifyVp",
            "RevokeVc",
            "GetRevokedVcList",
            "SetTrustRootList",
            "GetTrustRootList",
            "AddTrustIssuer",
            "DeleteTrustIssuer",
            "GetTrustIssuer",
            "SetVcTemplate",
            "GetVcTemplate",
        ],
    },
    StandardCapability {
        name: "delegation",
        operations: &["Delegate", "RevokeDelegate", "GetDelegateList"],
    },
    StandardCapability {
        name: "vc-issue-log",
        operations: &["LogVcIssuance", "GetVcIssueLogs", "GetVcIssuers"],
    },
];

/// Names of all declared standards.
pub fn standards() -> Vec<&'static str> {
    STANDARDS.iter().map(|s| s.name).collect()
}

/// Whether `name` is a declared standard.
pub fn supports_standard(name: &str) -> bool {
    STANDARDS.iter().any(|s| s.name == name)
}

/// The operation names a standard covers, if declared.
pub fn operations_for(name: &str) -> Option<&'static [&'static str]> {
    STANDARDS
        .iter()
        .find(|s| s.name == name)
        .map(|s| s.operations)
}

use crate::adapters::dss::mapper;

use super::core::DigestAlgorithm;

/// Certificate validation model applied by the validation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum ValidationModel {
    Shell,
    Chain,
}

impl ValidationModel {
    pub fn label(self) -> &'static str {
        match self {
            ValidationModel::Shell => "Shell",
            ValidationModel::Chain => "Chain",
        }
    }
}

/// Minimum digest strength a validation policy accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum DigestAlgorithmRequirement {
    Any,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithmRequirement {
    pub fn label(self) -> &'static str {
        match self {
            DigestAlgorithmRequirement::Any => "Any",
            DigestAlgorithmRequirement::Sha256 => "SHA-256",
            DigestAlgorithmRequirement::Sha384 => "SHA-384",
            DigestAlgorithmRequirement::Sha512 => "SHA-512",
        }
    }

    /// Whether `alg` meets the floor.
    pub fn admits(self, alg: DigestAlgorithm) -> bool {
        match self {
            DigestAlgorithmRequirement::Any => true,
            DigestAlgorithmRequirement::Sha256 => alg >= DigestAlgorithm::Sha256,
            DigestAlgorithmRequirement::Sha384 => alg >= DigestAlgorithm::Sha384,
            DigestAlgorithmRequirement::Sha512 => alg == DigestAlgorithm::Sha512,
        }
    }
}

option_enum_plumbing!(ValidationModel, mapper::parse_validation_model);
option_enum_plumbing!(DigestAlgorithmRequirement, mapper::parse_digest_requirement);

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::core::{Container, DigestAlgorithm, Packaging, SignatureFormat, SignatureLevel};
use super::trust::{DigestAlgorithmRequirement, ValidationModel};

/// Centralized defaults for the engine.
/// All opinionated defaults should be defined here for consistency.
pub struct EngineDefaults;

impl EngineDefaults {
    // Signature configuration defaults
    pub const CONTAINER: Container = Container::None;
    pub const SIGNATURE_FORMAT: SignatureFormat = SignatureFormat::XAdES;
    pub const PACKAGING: Packaging = Packaging::Enveloped;
    pub const LEVEL: SignatureLevel = SignatureLevel::BaselineB;
    pub const DIGEST_ALGORITHM: DigestAlgorithm = DigestAlgorithm::Sha256;
    pub const ALLOW_EXPIRED_CERTIFICATE: bool = false;
    pub const ADD_CONTENT_TIMESTAMP: bool = false;

    // Validation policy defaults
    pub const TRUST_ANCHOR: &'static str = "European Union Trusted List (Simulated)";
    pub const VALIDATION_MODEL: Option<ValidationModel> = Some(ValidationModel::Shell);
    pub const DIGEST_REQUIREMENT: Option<DigestAlgorithmRequirement> =
        Some(DigestAlgorithmRequirement::Sha256);

    // Service defaults
    pub const SERVICE_BASE_URL: &'static str = "http://localhost:8080";
    pub const SERVICE_BASE_URL_ENV: &'static str = "KR_DSS_BASE_URL";
}

/// Configurable per-call limits on the documents that cross the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Max size of a document embedded in a request.
    pub max_document_size: usize,
    /// Max size of a signature artifact embedded in a request.
    pub max_signature_size: usize,
}

impl LimitsConfig {
    /// Opinionated production defaults.
    pub fn defaults() -> Self {
        Self {
            max_document_size: 128 * 1024 * 1024,  // 128 MB
            max_signature_size: 128 * 1024 * 1024, // 128 MB
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

/// User-editable options of a signing request. One live instance per signing
/// workflow; keep it consistent with `domain::constraints::resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureConfiguration {
    pub container: Container,
    pub signature_format: SignatureFormat,
    pub packaging: Packaging,
    pub level: SignatureLevel,
    pub digest_algorithm: DigestAlgorithm,
    pub allow_expired_certificate: bool,
    pub add_content_timestamp: bool,
}

impl SignatureConfiguration {
    /// Workflow-start values.
    pub fn secure_default() -> Self {
        Self {
            container: EngineDefaults::CONTAINER,
            signature_format: EngineDefaults::SIGNATURE_FORMAT,
            packaging: EngineDefaults::PACKAGING,
            level: EngineDefaults::LEVEL,
            digest_algorithm: EngineDefaults::DIGEST_ALGORITHM,
            allow_expired_certificate: EngineDefaults::ALLOW_EXPIRED_CERTIFICATE,
            add_content_timestamp: EngineDefaults::ADD_CONTENT_TIMESTAMP,
        }
    }
}

impl Default for SignatureConfiguration {
    fn default() -> Self {
        Self::secure_default()
    }
}

/// Constraints the validator applies when checking a signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationPolicy {
    pub container: Container,
    pub signature_format: SignatureFormat,
    #[serde(alias = "level")]
    pub signature_level: SignatureLevel,
    #[serde(with = "minute_precision")]
    pub validation_time: NaiveDateTime,
    pub trust_anchor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest_algorithm_requirement: Option<DigestAlgorithmRequirement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_model: Option<ValidationModel>,
}

impl ValidationPolicy {
    /// Workflow-start values, validating "now" in local civil time.
    pub fn secure_default() -> Self {
        Self::at(chrono::Local::now().naive_local())
    }

    /// Defaults with an explicit validation time (truncated to the minute).
    pub fn at(validation_time: NaiveDateTime) -> Self {
        Self {
            container: EngineDefaults::CONTAINER,
            signature_format: EngineDefaults::SIGNATURE_FORMAT,
            signature_level: EngineDefaults::LEVEL,
            validation_time: truncate_to_minute(validation_time),
            trust_anchor: EngineDefaults::TRUST_ANCHOR.to_string(),
            digest_algorithm_requirement: EngineDefaults::DIGEST_REQUIREMENT,
            validation_model: EngineDefaults::VALIDATION_MODEL,
        }
    }

    /// Moves the validation time to "now".
    pub fn set_validation_time_now(&mut self) {
        self.validation_time = truncate_to_minute(chrono::Local::now().naive_local());
    }

    /// Whether a signature digested with `alg` meets this policy's floor.
    pub fn admits_digest(&self, alg: DigestAlgorithm) -> bool {
        self.digest_algorithm_requirement
            .map_or(true, |floor| floor.admits(alg))
    }
}

pub(crate) fn truncate_to_minute(t: NaiveDateTime) -> NaiveDateTime {
    t.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

/// `YYYY-MM-DDTHH:MM`, the shape of a datetime-local form value.
pub mod minute_precision {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M";

    pub fn format(t: &NaiveDateTime) -> String {
        t.format(FORMAT).to_string()
    }

    pub fn parse(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        // Accept a trailing seconds field, then drop it.
        NaiveDateTime::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
            .map(super::truncate_to_minute)
    }

    pub fn serialize<S: Serializer>(t: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format(t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}

//! Translation of human-oriented option values into the enumerants the
//! signing/validation backend expects.
//!
//! Every `parse_*` function accepts the spellings a user or a form is likely
//! to produce and returns the typed option; every `map_*` function returns the
//! exact wire identifier. Unknown input is rejected with `UnsupportedValue`,
//! never defaulted. The one exception is the signature form, which keeps the
//! backend's legacy `PKCS7` fallback.

use serde::Serialize;

use crate::domain::error::UnsupportedValue;
use crate::domain::types::{
  Container, DigestAlgorithm, DigestAlgorithmRequirement, Packaging, SignatureConfiguration,
  SignatureFormat, SignatureLevel, ValidationModel, ValidationPolicy,
};

use super::constants::LEGACY_SIGNATURE_FORM;

/// Uppercased, trimmed, with spaces and hyphens folded to underscores.
fn key(raw: &str) -> String {
  raw
    .trim()
    .chars()
    .map(|c| match c {
      ' ' | '-' => '_',
      c => c.to_ascii_uppercase(),
    })
    .collect()
}

/// Like `key`, with separators removed entirely.
fn compact_key(raw: &str) -> String {
  raw
    .trim()
    .chars()
    .filter(|c| !matches!(c, ' ' | '-' | '_'))
    .map(|c| c.to_ascii_uppercase())
    .collect()
}

// ===== Container =====

pub fn parse_container(raw: &str) -> Result<Container, UnsupportedValue> {
  match key(raw).as_str() {
    "NONE" | "NO" => Ok(Container::None),
    "ASIC_S" => Ok(Container::AsicS),
    "ASIC_E" => Ok(Container::AsicE),
    _ => Err(UnsupportedValue::new("container", raw)),
  }
}

/// `None` means the request carries no container.
pub fn container_wire(container: Container) -> Option<&'static str> {
  match container {
    Container::None => None,
    Container::AsicS => Some("ASiC_S"),
    Container::AsicE => Some("ASiC_E"),
  }
}

pub fn map_container(raw: &str) -> Result<Option<&'static str>, UnsupportedValue> {
  parse_container(raw).map(container_wire)
}

// ===== Signature format =====

pub fn parse_signature_format(raw: &str) -> Result<SignatureFormat, UnsupportedValue> {
  match key(raw).as_str() {
    "XADES" => Ok(SignatureFormat::XAdES),
    "CADES" => Ok(SignatureFormat::CAdES),
    "PADES" => Ok(SignatureFormat::PAdES),
    "JADES" => Ok(SignatureFormat::JAdES),
    _ => Err(UnsupportedValue::new("signatureFormat", raw)),
  }
}

pub fn signature_format_wire(format: SignatureFormat) -> &'static str {
  format.label()
}

/// Identity for the AdES formats; anything else is the legacy `PKCS7` form.
pub fn map_signature_format(raw: &str) -> &'static str {
  parse_signature_format(raw)
    .map(signature_format_wire)
    .unwrap_or(LEGACY_SIGNATURE_FORM)
}

// ===== Packaging =====

pub fn parse_packaging(raw: &str) -> Result<Packaging, UnsupportedValue> {
  match key(raw).as_str() {
    "ENVELOPED" => Ok(Packaging::Enveloped),
    "ENVELOPING" => Ok(Packaging::Enveloping),
    "DETACHED" => Ok(Packaging::Detached),
    "INTERNALLY_DETACHED" => Ok(Packaging::InternallyDetached),
    _ => Err(UnsupportedValue::new("packaging", raw)),
  }
}

pub fn packaging_wire(packaging: Packaging) -> &'static str {
  packaging.label()
}

pub fn map_packaging(raw: &str) -> Result<&'static str, UnsupportedValue> {
  parse_packaging(raw).map(packaging_wire)
}

// ===== Level =====

pub fn parse_level(raw: &str) -> Result<SignatureLevel, UnsupportedValue> {
  match key(raw).as_str() {
    "B_B" | "B" | "BASELINE_B" => Ok(SignatureLevel::BaselineB),
    "B_T" | "T" | "BASELINE_T" => Ok(SignatureLevel::BaselineT),
    "B_LT" | "LT" | "BASELINE_LT" => Ok(SignatureLevel::BaselineLt),
    "B_LTA" | "LTA" | "BASELINE_LTA" => Ok(SignatureLevel::BaselineLta),
    _ => Err(UnsupportedValue::new("level", raw)),
  }
}

pub fn level_wire(level: SignatureLevel) -> &'static str {
  match level {
    SignatureLevel::BaselineB => "BASELINE_B",
    SignatureLevel::BaselineT => "BASELINE_T",
    SignatureLevel::BaselineLt => "BASELINE_LT",
    SignatureLevel::BaselineLta => "BASELINE_LTA",
  }
}

pub fn map_level(raw: &str) -> Result<&'static str, UnsupportedValue> {
  parse_level(raw).map(level_wire)
}

/// `<Format>_<NormalizedLevel>`, e.g. `PAdES_BASELINE_LTA`. The format is
/// checked first; the legacy form has no baseline levels.
pub fn qualified_signature_level(format: &str, level: &str) -> Result<String, UnsupportedValue> {
  let format = parse_signature_format(format)?;
  let level = parse_level(level)?;
  Ok(qualified_level_wire(format, level))
}

pub fn qualified_level_wire(format: SignatureFormat, level: SignatureLevel) -> String {
  format!("{}_{}", signature_format_wire(format), level_wire(level))
}

// ===== Digest algorithm =====

pub fn parse_digest_algorithm(raw: &str) -> Result<DigestAlgorithm, UnsupportedValue> {
  match compact_key(raw).as_str() {
    "SHA1" => Ok(DigestAlgorithm::Sha1),
    "SHA256" => Ok(DigestAlgorithm::Sha256),
    "SHA384" => Ok(DigestAlgorithm::Sha384),
    "SHA512" => Ok(DigestAlgorithm::Sha512),
    _ => Err(UnsupportedValue::new("digestAlgorithm", raw)),
  }
}

pub fn digest_algorithm_wire(alg: DigestAlgorithm) -> &'static str {
  match alg {
    DigestAlgorithm::Sha1 => "SHA1",
    DigestAlgorithm::Sha256 => "SHA256",
    DigestAlgorithm::Sha384 => "SHA384",
    DigestAlgorithm::Sha512 => "SHA512",
  }
}

pub fn map_digest_algorithm(raw: &str) -> Result<&'static str, UnsupportedValue> {
  parse_digest_algorithm(raw).map(digest_algorithm_wire)
}

// ===== Validation policy extras =====

pub fn parse_validation_model(raw: &str) -> Result<ValidationModel, UnsupportedValue> {
  match key(raw).as_str() {
    "SHELL" => Ok(ValidationModel::Shell),
    "CHAIN" => Ok(ValidationModel::Chain),
    _ => Err(UnsupportedValue::new("validationModel", raw)),
  }
}

pub fn validation_model_wire(model: ValidationModel) -> &'static str {
  match model {
    ValidationModel::Shell => "SHELL",
    ValidationModel::Chain => "CHAIN",
  }
}

pub fn parse_digest_requirement(raw: &str) -> Result<DigestAlgorithmRequirement, UnsupportedValue> {
  if key(raw) == "ANY" {
    return Ok(DigestAlgorithmRequirement::Any);
  }
  match parse_digest_algorithm(raw) {
    Ok(DigestAlgorithm::Sha256) => Ok(DigestAlgorithmRequirement::Sha256),
    Ok(DigestAlgorithm::Sha384) => Ok(DigestAlgorithmRequirement::Sha384),
    Ok(DigestAlgorithm::Sha512) => Ok(DigestAlgorithmRequirement::Sha512),
    _ => Err(UnsupportedValue::new("digestAlgorithmRequirement", raw)),
  }
}

pub fn digest_requirement_wire(req: DigestAlgorithmRequirement) -> &'static str {
  match req {
    DigestAlgorithmRequirement::Any => "ANY",
    DigestAlgorithmRequirement::Sha256 => "SHA256",
    DigestAlgorithmRequirement::Sha384 => "SHA384",
    DigestAlgorithmRequirement::Sha512 => "SHA512",
  }
}

// ===== Whole-configuration mapping =====

/// Canonical option fields shared by the signing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalSignatureFields {
  pub container_type: Option<&'static str>,
  pub signature_form: &'static str,
  pub signature_packaging: &'static str,
  pub signature_level: String,
  pub digest_algorithm: &'static str,
}

/// Maps a configuration given as raw labels. The qualified level (and with
/// it the format) is checked before packaging and digest.
pub fn map_raw_configuration(
  container: &str,
  signature_format: &str,
  packaging: &str,
  level: &str,
  digest_algorithm: &str,
) -> Result<CanonicalSignatureFields, UnsupportedValue> {
  let container_type = map_container(container)?;
  let signature_level = qualified_signature_level(signature_format, level)?;
  let signature_packaging = map_packaging(packaging)?;
  let digest_algorithm = map_digest_algorithm(digest_algorithm)?;
  Ok(CanonicalSignatureFields {
    container_type,
    signature_form: map_signature_format(signature_format),
    signature_packaging,
    signature_level,
    digest_algorithm,
  })
}

pub fn map_configuration(
  config: &SignatureConfiguration,
) -> Result<CanonicalSignatureFields, UnsupportedValue> {
  map_raw_configuration(
    config.container.label(),
    config.signature_format.label(),
    config.packaging.label(),
    config.level.label(),
    config.digest_algorithm.label(),
  )
}

/// Canonical option fields of a verification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPolicyFields {
  pub container: Option<&'static str>,
  pub signature_format: &'static str,
  pub signature_level: String,
  pub validation_time: String,
  pub trust_anchor: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub digest_algorithm_requirement: Option<&'static str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub validation_model: Option<&'static str>,
}

pub fn map_policy(policy: &ValidationPolicy) -> Result<CanonicalPolicyFields, UnsupportedValue> {
  let container = map_container(policy.container.label())?;
  let signature_level =
    qualified_signature_level(policy.signature_format.label(), policy.signature_level.label())?;
  Ok(CanonicalPolicyFields {
    container,
    signature_format: map_signature_format(policy.signature_format.label()),
    signature_level,
    validation_time: crate::domain::types::minute_precision::format(&policy.validation_time),
    trust_anchor: policy.trust_anchor.trim().to_string(),
    digest_algorithm_requirement: policy.digest_algorithm_requirement.map(digest_requirement_wire),
    validation_model: policy.validation_model.map(validation_model_wire),
  })
}

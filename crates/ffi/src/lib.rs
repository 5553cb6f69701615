use kr_dss_engine::adapters::dss::{self as dss, mapper, Document, SignatureArtifact, VerificationInput};
use kr_dss_engine::domain::error::{EngineError, UnsupportedValue};
use kr_dss_engine::domain::types as dt;

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("{message}")]
    Generic { message: String },
}

impl From<EngineError> for FfiError {
    fn from(e: EngineError) -> Self {
        FfiError::Generic {
            message: e.to_string(),
        }
    }
}

impl From<UnsupportedValue> for FfiError {
    fn from(e: UnsupportedValue) -> Self {
        EngineError::from(e).into()
    }
}

// ===== FFI types mirroring the public Rust API (FFI-friendly) =====

#[derive(uniffi::Enum, Debug, Clone, Copy)]
pub enum FfiReportView { Simple, Detailed, Diagnostic, Etsi }

impl From<FfiReportView> for dt::ReportView {
    fn from(v: FfiReportView) -> Self {
        match v { FfiReportView::Simple => dt::ReportView::Simple, FfiReportView::Detailed => dt::ReportView::Detailed, FfiReportView::Diagnostic => dt::ReportView::Diagnostic, FfiReportView::Etsi => dt::ReportView::Etsi }
    }
}

#[derive(uniffi::Record, Debug, Clone, Copy)]
pub struct FfiLimitsConfig {
    pub max_document_size: u64,
    pub max_signature_size: u64,
}

impl TryFrom<FfiLimitsConfig> for dt::LimitsConfig {
    type Error = FfiError;
    fn try_from(v: FfiLimitsConfig) -> Result<Self, Self::Error> {
        Ok(dt::LimitsConfig {
            max_document_size: limit_to_usize("max_document_size", v.max_document_size)?,
            max_signature_size: limit_to_usize("max_signature_size", v.max_signature_size)?,
        })
    }
}

fn limit_to_usize(name: &str, value: u64) -> Result<usize, FfiError> {
    usize::try_from(value).map_err(|_| FfiError::Generic { message: format!("{name} does not fit this platform: {value}") })
}

impl FfiLimitsConfig {
    pub fn defaults() -> Self {
        let d = dt::LimitsConfig::defaults();
        Self {
            max_document_size: d.max_document_size as u64,
            max_signature_size: d.max_signature_size as u64,
        }
    }
}

/// Signing options as the labels a form produces (`ASiC-E`, `PAdES`, `B-LT`, ...).
#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiSignatureOptions {
    pub container: String,
    pub signature_format: String,
    pub packaging: String,
    pub level: String,
    pub digest_algorithm: String,
    pub allow_expired_certificate: bool,
    pub add_content_timestamp: bool,
}

impl TryFrom<FfiSignatureOptions> for dt::SignatureConfiguration {
    type Error = FfiError;
    fn try_from(v: FfiSignatureOptions) -> Result<Self, Self::Error> {
        Ok(dt::SignatureConfiguration {
            container: v.container.parse()?,
            signature_format: v.signature_format.parse()?,
            packaging: v.packaging.parse()?,
            level: v.level.parse()?,
            digest_algorithm: v.digest_algorithm.parse()?,
            allow_expired_certificate: v.allow_expired_certificate,
            add_content_timestamp: v.add_content_timestamp,
        })
    }
}

impl From<dt::SignatureConfiguration> for FfiSignatureOptions {
    fn from(c: dt::SignatureConfiguration) -> Self {
        FfiSignatureOptions {
            container: c.container.label().to_string(),
            signature_format: c.signature_format.label().to_string(),
            packaging: c.packaging.label().to_string(),
            level: c.level.label().to_string(),
            digest_algorithm: c.digest_algorithm.label().to_string(),
            allow_expired_certificate: c.allow_expired_certificate,
            add_content_timestamp: c.add_content_timestamp,
        }
    }
}

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiResolution {
    pub options: FfiSignatureOptions,
    pub disabled_containers: Vec<String>,
    pub disabled_formats: Vec<String>,
    pub disabled_packagings: Vec<String>,
}

impl From<kr_dss_engine::Resolution> for FfiResolution {
    fn from(r: kr_dss_engine::Resolution) -> Self {
        FfiResolution {
            options: r.configuration.into(),
            disabled_containers: r.disabled.container.iter().map(|c| c.label().to_string()).collect(),
            disabled_formats: r.disabled.signature_format.iter().map(|f| f.label().to_string()).collect(),
            disabled_packagings: r.disabled.packaging.iter().map(|p| p.label().to_string()).collect(),
        }
    }
}

/// Wire values of a configuration; `container_type` is `None` without a container.
#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiWireOptions {
    pub container_type: Option<String>,
    pub signature_form: String,
    pub signature_packaging: String,
    pub signature_level: String,
    pub digest_algorithm: String,
}

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiValidationPolicy {
    pub container: String,
    pub signature_format: String,
    pub signature_level: String,
    /// `YYYY-MM-DDTHH:mm`; `None` validates as of now.
    pub validation_time: Option<String>,
    pub trust_anchor: Option<String>,
    /// `None` keeps the default (SHA-256), an empty string sends none.
    pub digest_algorithm_requirement: Option<String>,
    /// `None` keeps the default (Shell), an empty string sends none.
    pub validation_model: Option<String>,
}

/// `None` keeps `default`, a blank label clears the field.
fn optional_label<T: std::str::FromStr<Err = UnsupportedValue>>(
    raw: Option<String>,
    default: Option<T>,
) -> Result<Option<T>, FfiError> {
    match raw {
        None => Ok(default),
        Some(label) if label.trim().is_empty() => Ok(None),
        Some(label) => Ok(Some(label.parse()?)),
    }
}

impl TryFrom<FfiValidationPolicy> for dt::ValidationPolicy {
    type Error = FfiError;
    fn try_from(v: FfiValidationPolicy) -> Result<Self, Self::Error> {
        let mut policy = match v.validation_time {
            Some(t) => {
                let t = dt::minute_precision::parse(&t).map_err(|e| FfiError::Generic { message: format!("Invalid validation time: {e}") })?;
                dt::ValidationPolicy::at(t)
            }
            None => dt::ValidationPolicy::secure_default(),
        };
        policy.container = v.container.parse()?;
        policy.signature_format = v.signature_format.parse()?;
        policy.signature_level = v.signature_level.parse()?;
        if let Some(anchor) = v.trust_anchor.filter(|a| !a.trim().is_empty()) {
            policy.trust_anchor = anchor;
        }
        policy.digest_algorithm_requirement = optional_label(v.digest_algorithm_requirement, policy.digest_algorithm_requirement)?;
        policy.validation_model = optional_label(v.validation_model, policy.validation_model)?;
        Ok(policy)
    }
}

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiVerificationSummary {
    pub is_valid: bool,
    pub indication: Option<String>,
    pub message: Option<String>,
    pub available_views: Vec<String>,
    pub report_json: String,
}

impl TryFrom<kr_dss_engine::VerificationResult> for FfiVerificationSummary {
    type Error = FfiError;
    fn try_from(v: kr_dss_engine::VerificationResult) -> Result<Self, Self::Error> {
        let report_json = v.to_json_pretty()?;
        Ok(FfiVerificationSummary {
            is_valid: v.is_valid,
            indication: v.simple_report.as_ref().map(|r| r.indication.display_label()),
            message: v.simple_report.as_ref().map(|r| r.message.clone()),
            available_views: v.available_views().into_iter().map(|view| view.to_string()).collect(),
            report_json,
        })
    }
}

// ===== High-level API, mirroring Rust surface =====

#[uniffi::export]
pub fn resolve_signature_options_ffi(options: FfiSignatureOptions) -> Result<FfiResolution, FfiError> {
    let cfg: dt::SignatureConfiguration = options.try_into()?;
    Ok(kr_dss_engine::resolve_configuration(&cfg).into())
}

#[uniffi::export]
pub fn map_signature_options_ffi(
    container: String,
    signature_format: String,
    packaging: String,
    level: String,
    digest_algorithm: String,
) -> Result<FfiWireOptions, FfiError> {
    let fields = mapper::map_raw_configuration(&container, &signature_format, &packaging, &level, &digest_algorithm)?;
    Ok(FfiWireOptions {
        container_type: fields.container_type.map(str::to_string),
        signature_form: fields.signature_form.to_string(),
        signature_packaging: fields.signature_packaging.to_string(),
        signature_level: fields.signature_level,
        digest_algorithm: fields.digest_algorithm.to_string(),
    })
}

#[uniffi::export]
pub fn build_signing_request_json_ffi(
    file_name: String,
    content: Vec<u8>,
    options: FfiSignatureOptions,
    limits: FfiLimitsConfig,
) -> Result<String, FfiError> {
    let cfg: dt::SignatureConfiguration = options.try_into()?;
    let document = Document::new(file_name, content);
    let request = kr_dss_engine::build_signing_request_blocking(&document, &cfg, limits.try_into()?)?;
    Ok(request.to_json()?)
}

/// `document` is `None` for an enveloped signature; `signature_block` takes
/// precedence over `signature_bytes` when both are given.
#[uniffi::export]
pub fn build_verification_request_json_ffi(
    document_name: Option<String>,
    document: Option<Vec<u8>>,
    signature_bytes: Option<Vec<u8>>,
    signature_block: Option<String>,
    policy: FfiValidationPolicy,
    limits: FfiLimitsConfig,
) -> Result<String, FfiError> {
    let signature = match (signature_block, signature_bytes) {
        (Some(block), _) => SignatureArtifact::from_block(&block)?,
        (None, Some(bytes)) => SignatureArtifact::from_bytes(None, bytes)?,
        (None, None) => return Err(FfiError::Generic { message: "Missing signature".into() }),
    };
    let input = match document {
        Some(content) => VerificationInput::Detached {
            document: Document::new(document_name.unwrap_or_default(), content),
            signature,
        },
        None => VerificationInput::Enveloped { signed: signature },
    };
    let policy: dt::ValidationPolicy = policy.try_into()?;
    let request = kr_dss_engine::build_verification_request(&input, &policy, limits.try_into()?)?;
    Ok(request.to_json()?)
}

#[uniffi::export]
pub fn interpret_verification_response_ffi(body: Vec<u8>) -> Result<FfiVerificationSummary, FfiError> {
    let result = dss::interpret_verification_response(&body)?;
    result.try_into()
}

#[uniffi::export]
pub fn derive_report_url_ffi(
    base_download_url: Option<String>,
    file_name: Option<String>,
    view: FfiReportView,
) -> Option<String> {
    kr_dss_engine::derive_report_url(base_download_url.as_deref(), file_name.as_deref(), view.into())
}

#[uniffi::export]
pub fn default_limits_ffi() -> FfiLimitsConfig {
    FfiLimitsConfig::defaults()
}

uniffi::setup_scaffolding!();

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> FfiValidationPolicy {
        FfiValidationPolicy {
            container: "NONE".into(),
            signature_format: "XAdES".into(),
            signature_level: "B-B".into(),
            validation_time: Some("2024-05-17T09:30".into()),
            trust_anchor: None,
            digest_algorithm_requirement: None,
            validation_model: None,
        }
    }

    #[test]
    fn limits_convert_when_they_fit() {
        let limits: dt::LimitsConfig = FfiLimitsConfig::defaults().try_into().unwrap();
        assert_eq!(limits, dt::LimitsConfig::defaults());
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn oversized_limits_are_rejected() {
        let res: Result<dt::LimitsConfig, _> = FfiLimitsConfig { max_document_size: u64::MAX, max_signature_size: 1 }.try_into();
        assert!(res.is_err());
    }

    #[test]
    fn policy_extras_default_set_and_clear() {
        let p: dt::ValidationPolicy = policy().try_into().unwrap();
        assert_eq!(p.digest_algorithm_requirement, Some(dt::DigestAlgorithmRequirement::Sha256));
        assert_eq!(p.validation_model, Some(dt::ValidationModel::Shell));

        let mut raw = policy();
        raw.digest_algorithm_requirement = Some("SHA-512".into());
        raw.validation_model = Some("chain".into());
        let p: dt::ValidationPolicy = raw.try_into().unwrap();
        assert_eq!(p.digest_algorithm_requirement, Some(dt::DigestAlgorithmRequirement::Sha512));
        assert_eq!(p.validation_model, Some(dt::ValidationModel::Chain));

        let mut raw = policy();
        raw.digest_algorithm_requirement = Some(String::new());
        raw.validation_model = Some(" ".into());
        let p: dt::ValidationPolicy = raw.try_into().unwrap();
        assert_eq!(p.digest_algorithm_requirement, None);
        assert_eq!(p.validation_model, None);

        let mut raw = policy();
        raw.validation_model = Some("ring".into());
        assert!(dt::ValidationPolicy::try_from(raw).is_err());
    }
}

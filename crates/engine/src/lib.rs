// crates/engine/src/lib.rs

//! Public facade for the KR-DSS engine.
//! Exposes a stable API and re-exports types for consumers (UI shell, FFI).

pub mod adapters;
pub mod crypto;
pub mod domain;

use adapters::dss::{Document, SigningRequest, SigningRequestBuilder, VerificationInput, VerificationRequest};
use domain::error::EngineResult;
use domain::types::{LimitsConfig, ReportView, SignatureConfiguration, ValidationPolicy};

// High-level helpers for the common signing and verification paths.
// None of them performs network I/O.

/// Brings `config` into a valid combination and reports what is disabled.
pub fn resolve_configuration(config: &SignatureConfiguration) -> Resolution {
    domain::constraints::resolve(config)
}

pub async fn build_signing_request(
    document: &Document,
    config: &SignatureConfiguration,
    limits: LimitsConfig,
) -> EngineResult<SigningRequest> {
    SigningRequestBuilder::new(limits).build(document, config).await
}

/// Blocking variant of [`build_signing_request`] for synchronous callers.
pub fn build_signing_request_blocking(
    document: &Document,
    config: &SignatureConfiguration,
    limits: LimitsConfig,
) -> EngineResult<SigningRequest> {
    adapters::dss::run_on_current_thread(build_signing_request(document, config, limits))
}

pub fn build_verification_request(
    input: &VerificationInput,
    policy: &ValidationPolicy,
    limits: LimitsConfig,
) -> EngineResult<VerificationRequest> {
    adapters::dss::build_verification_request(input, policy, &limits)
}

/// Download link for one report view, or `None` without a file name.
pub fn derive_report_url(
    base_download_url: Option<&str>,
    file_name: Option<&str>,
    view: ReportView,
) -> Option<String> {
    adapters::dss::links::derive_report_url(base_download_url, file_name, view)
}

// Re-exports for convenience
pub use adapters::dss::{ServiceEndpoints, SignatureArtifact, SignatureResult};
pub use domain::constraints::{DisabledOptions, Resolution};
pub use domain::error::{EngineError, UnsupportedValue};
pub use domain::service::{RemoteResponse, SignatureService};
pub use domain::session::{SigningWorkflow, VerificationWorkflow};
pub use domain::types::{
    Container, DigestAlgorithm, DigestAlgorithmRequirement, EngineDefaults, Packaging,
    SignatureFormat, SignatureLevel, ValidationModel,
};
pub use domain::verify::VerificationResult;

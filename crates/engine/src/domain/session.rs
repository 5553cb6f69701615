// crates/engine/src/domain/session.rs

//! Live state of the two interactive workflows. Each is owned by a single
//! session; edits are applied one at a time.

use crate::adapters::dss::{
    build_verification_request, Document, SignatureResult, SigningRequestBuilder,
    VerificationInput,
};

use super::constraints::{resolve, DisabledOptions, Resolution};
use super::error::EngineResult;
use super::service::{run_signing, run_verification, SignatureService};
use super::types::{
    Container, DigestAlgorithm, LimitsConfig, Packaging, SignatureConfiguration, SignatureFormat,
    SignatureLevel, ValidationPolicy,
};
use super::verify::VerificationResult;

/// Signing options plus the disabled-option snapshot derived from them.
#[derive(Debug, Clone)]
pub struct SigningWorkflow {
    resolution: Resolution,
    builder: SigningRequestBuilder,
    last_result: Option<SignatureResult>,
}

impl SigningWorkflow {
    pub fn new(limits: LimitsConfig) -> Self {
        Self {
            resolution: resolve(&SignatureConfiguration::secure_default()),
            builder: SigningRequestBuilder::new(limits),
            last_result: None,
        }
    }

    pub fn configuration(&self) -> &SignatureConfiguration {
        &self.resolution.configuration
    }

    pub fn disabled(&self) -> &DisabledOptions {
        &self.resolution.disabled
    }

    pub fn last_result(&self) -> Option<&SignatureResult> {
        self.last_result.as_ref()
    }

    /// Applies one edit and re-resolves. The stored configuration is always
    /// the corrected one.
    pub fn edit(&mut self, change: impl FnOnce(&mut SignatureConfiguration)) -> &Resolution {
        let mut candidate = self.resolution.configuration;
        change(&mut candidate);
        self.resolution = resolve(&candidate);
        &self.resolution
    }

    pub fn set_container(&mut self, container: Container) -> &Resolution {
        self.edit(|c| c.container = container)
    }

    pub fn set_signature_format(&mut self, format: SignatureFormat) -> &Resolution {
        self.edit(|c| c.signature_format = format)
    }

    pub fn set_packaging(&mut self, packaging: Packaging) -> &Resolution {
        self.edit(|c| c.packaging = packaging)
    }

    pub fn set_level(&mut self, level: SignatureLevel) -> &Resolution {
        self.edit(|c| c.level = level)
    }

    pub fn set_digest_algorithm(&mut self, alg: DigestAlgorithm) -> &Resolution {
        self.edit(|c| c.digest_algorithm = alg)
    }

    pub fn set_allow_expired_certificate(&mut self, allow: bool) -> &Resolution {
        self.edit(|c| c.allow_expired_certificate = allow)
    }

    pub fn set_add_content_timestamp(&mut self, add: bool) -> &Resolution {
        self.edit(|c| c.add_content_timestamp = add)
    }

    /// Back to workflow-start values (new document, mode switch).
    pub fn reset(&mut self) {
        self.resolution = resolve(&SignatureConfiguration::secure_default());
        self.last_result = None;
    }

    /// Builds, submits and interprets one signing call. On failure the
    /// previous result is kept.
    pub async fn submit<S: SignatureService + ?Sized>(
        &mut self,
        service: &S,
        document: &Document,
    ) -> EngineResult<&SignatureResult> {
        let request = self.builder.build(document, self.configuration()).await?;
        let result = run_signing(service, &request)?;
        Ok(self.last_result.insert(result))
    }
}

impl Default for SigningWorkflow {
    fn default() -> Self {
        Self::new(LimitsConfig::defaults())
    }
}

/// Validation policy plus the last successful verification result.
#[derive(Debug, Clone)]
pub struct VerificationWorkflow {
    policy: ValidationPolicy,
    limits: LimitsConfig,
    result: Option<VerificationResult>,
}

impl VerificationWorkflow {
    pub fn new(policy: ValidationPolicy, limits: LimitsConfig) -> Self {
        Self {
            policy,
            limits,
            result: None,
        }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut ValidationPolicy {
        &mut self.policy
    }

    pub fn result(&self) -> Option<&VerificationResult> {
        self.result.as_ref()
    }

    /// Replaces the stored result on success only.
    pub fn accept(
        &mut self,
        outcome: EngineResult<VerificationResult>,
    ) -> EngineResult<&VerificationResult> {
        let result = outcome?;
        Ok(self.result.insert(result))
    }

    pub fn submit<S: SignatureService + ?Sized>(
        &mut self,
        service: &S,
        input: &VerificationInput,
    ) -> EngineResult<&VerificationResult> {
        let outcome = build_verification_request(input, &self.policy, &self.limits)
            .and_then(|request| run_verification(service, &request));
        self.accept(outcome)
    }

    /// Clears the result and restores the default policy.
    pub fn reset(&mut self) {
        self.policy = ValidationPolicy::secure_default();
        self.result = None;
    }
}

impl Default for VerificationWorkflow {
    fn default() -> Self {
        Self::new(ValidationPolicy::secure_default(), LimitsConfig::defaults())
    }
}

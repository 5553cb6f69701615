// crates/engine/src/domain/service.rs

use crate::adapters::dss::{
    interpret_signing_response, interpret_verification_response, remote_error,
    SignatureResult, SigningRequest, VerificationRequest,
};
use super::error::EngineResult;
use super::verify::VerificationResult;

/// Raw HTTP-level answer of the external service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

impl RemoteResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            reason: "OK".to_string(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait implemented by the networking glue that talks to the signing and
/// validation backend. Implementations submit once; the engine never retries.
pub trait SignatureService {
    fn sign(&self, request: &SigningRequest) -> EngineResult<RemoteResponse>;
    fn verify(&self, request: &VerificationRequest) -> EngineResult<RemoteResponse>;
}

pub fn run_signing<S: SignatureService + ?Sized>(
    service: &S,
    request: &SigningRequest,
) -> EngineResult<SignatureResult> {
    let response = service.sign(request)?;
    if !response.is_success() {
        return Err(remote_error(response.status, &response.reason, &response.body));
    }
    interpret_signing_response(&response.body)
}

pub fn run_verification<S: SignatureService + ?Sized>(
    service: &S,
    request: &VerificationRequest,
) -> EngineResult<VerificationResult> {
    let response = service.verify(request)?;
    if !response.is_success() {
        return Err(remote_error(response.status, &response.reason, &response.body));
    }
    interpret_verification_response(&response.body)
}

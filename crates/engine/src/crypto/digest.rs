//! Local content hashing for the request integrity field.
//! Backends are compiled in with the `digest` feature.

use std::sync::Arc;

use tracing::trace;

use crate::domain::error::{EngineError, EngineResult};
use crate::domain::types::DigestAlgorithm;

/// Digest of a document's full content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDigest {
    pub algorithm: DigestAlgorithm,
    pub bytes: Vec<u8>,
}

impl ContentDigest {
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

/// Hashes `data` on the calling thread.
pub fn digest_now(algorithm: DigestAlgorithm, data: &[u8]) -> EngineResult<ContentDigest> {
    let bytes = backend::digest(algorithm, data)?;
    trace!(algorithm = algorithm.label(), input_len = data.len(), "content digest computed");
    Ok(ContentDigest { algorithm, bytes })
}

/// Hashes `data` on the runtime's blocking pool and waits for the whole
/// result; there is no partial or streaming read. Outside a Tokio runtime
/// the digest is computed inline.
pub async fn digest_content(
    algorithm: DigestAlgorithm,
    data: Arc<Vec<u8>>,
) -> EngineResult<ContentDigest> {
    if !backend::AVAILABLE {
        return Err(unavailable(algorithm));
    }
    if tokio::runtime::Handle::try_current().is_err() {
        return digest_now(algorithm, &data);
    }
    tokio::task::spawn_blocking(move || digest_now(algorithm, &data))
        .await
        .map_err(|e| EngineError::HashingUnavailable(format!("digest task failed: {e}")))?
}

fn unavailable(algorithm: DigestAlgorithm) -> EngineError {
    EngineError::HashingUnavailable(format!("no {} backend compiled in", algorithm.label()))
}

#[cfg(feature = "digest")]
mod backend {
    use sha1::Sha1;
    use sha2::{Digest, Sha256, Sha384, Sha512};

    use crate::domain::error::EngineResult;
    use crate::domain::types::DigestAlgorithm;

    pub const AVAILABLE: bool = true;

    pub fn digest(algorithm: DigestAlgorithm, data: &[u8]) -> EngineResult<Vec<u8>> {
        Ok(match algorithm {
            DigestAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            DigestAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        })
    }
}

#[cfg(any(test, not(feature = "digest")))]
mod fallback {
    use crate::domain::error::EngineResult;
    use crate::domain::types::DigestAlgorithm;

    pub const AVAILABLE: bool = false;

    pub fn digest(algorithm: DigestAlgorithm, _data: &[u8]) -> EngineResult<Vec<u8>> {
        Err(super::unavailable(algorithm))
    }
}

#[cfg(not(feature = "digest"))]
use fallback as backend;

#[cfg(test)]
mod fallback_tests {
    use super::*;

    #[test]
    fn fallback_backend_reports_unavailable() {
        assert!(!fallback::AVAILABLE);
        let err = fallback::digest(DigestAlgorithm::Sha256, b"abc").unwrap_err();
        assert!(matches!(err, EngineError::HashingUnavailable(_)));
        assert_eq!(err.to_string(), "hashing unavailable: no SHA-256 backend compiled in");
    }
}

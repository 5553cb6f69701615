// adapters/dss/request.rs

use std::path::Path;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;
use tracing::debug;

use crate::crypto::digest::digest_content;
use crate::domain::constraints::resolve;
use crate::domain::error::{EngineError, EngineResult};
use crate::domain::types::{LimitsConfig, SignatureConfiguration, ValidationPolicy};

use super::mapper::{map_configuration, map_policy, CanonicalPolicyFields, CanonicalSignatureFields};
use super::response::SignatureResult;

/// A document selected for signing or verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
  pub file_name: String,
  pub content: Arc<Vec<u8>>,
}

impl Document {
  pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
    Self { file_name: file_name.into(), content: Arc::new(content) }
  }

  /// Reads the whole file; the file name is the path's last component.
  pub async fn from_path(path: impl AsRef<Path>) -> EngineResult<Self> {
    let path = path.as_ref();
    let file_name = path
      .file_name()
      .and_then(|n| n.to_str())
      .ok_or_else(|| EngineError::Config(format!("path has no file name: {}", path.display())))?
      .to_string();
    let content = tokio::fs::read(path).await?;
    Ok(Self::new(file_name, content))
  }

  pub fn len(&self) -> usize {
    self.content.len()
  }

  pub fn is_empty(&self) -> bool {
    self.content.is_empty()
  }
}

/// A signature to verify: uploaded bytes or a pasted signature block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureArtifact {
  pub file_name: Option<String>,
  pub bytes: Vec<u8>,
}

impl SignatureArtifact {
  pub fn from_bytes(file_name: Option<String>, bytes: Vec<u8>) -> EngineResult<Self> {
    if bytes.is_empty() {
      return Err(EngineError::MalformedSignatureBlock("signature artifact is empty".into()));
    }
    Ok(Self { file_name, bytes })
  }

  /// Parses the JSON block a signing call returned.
  pub fn from_block(block: &str) -> EngineResult<Self> {
    if block.trim().is_empty() {
      return Err(EngineError::MalformedSignatureBlock("signature block is empty".into()));
    }
    let result: SignatureResult = serde_json::from_str(block).map_err(|e| {
      EngineError::MalformedSignatureBlock(format!("signature block is not valid JSON: {e}"))
    })?;
    let bytes = result
      .decode_document()
      .map_err(|e| EngineError::MalformedSignatureBlock(e.to_string()))?;
    let file_name = Some(result.file_name).filter(|n| !n.is_empty());
    Self::from_bytes(file_name, bytes)
  }

  pub fn to_base64(&self) -> String {
    BASE64.encode(&self.bytes)
  }
}

/// Outbound signing request, serialized as the backend's JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningRequest {
  pub file_name: String,
  pub document_base64: String,
  /// Content digest of the document, as a byte array.
  pub signature_value: Vec<u8>,
  #[serde(flatten)]
  pub options: CanonicalSignatureFields,
  pub sign_with_expired_certificate: bool,
  pub add_content_timestamp: bool,
}

impl SigningRequest {
  pub fn to_json(&self) -> EngineResult<String> {
    Ok(serde_json::to_string(self)?)
  }
}

/// Builds signing requests. Performs no network I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct SigningRequestBuilder {
  pub limits: LimitsConfig,
}

impl SigningRequestBuilder {
  pub fn new(limits: LimitsConfig) -> Self {
    Self { limits }
  }

  /// Resolves `config`, maps it to wire values and digests the document.
  /// Mapping errors surface before any hashing starts. Inside a Tokio
  /// runtime hashing runs on the blocking pool; otherwise it runs inline.
  pub async fn build(
    &self,
    document: &Document,
    config: &SignatureConfiguration,
  ) -> EngineResult<SigningRequest> {
    let resolved = resolve(config).configuration;
    let options = map_configuration(&resolved)?;

    if document.len() > self.limits.max_document_size {
      return Err(EngineError::Config(format!(
        "document too large: {} bytes (max {})",
        document.len(),
        self.limits.max_document_size
      )));
    }

    let digest = digest_content(resolved.digest_algorithm, document.content.clone()).await?;

    debug!(
      file_name = %document.file_name,
      container = ?options.container_type,
      form = options.signature_form,
      packaging = options.signature_packaging,
      level = %options.signature_level,
      digest = options.digest_algorithm,
      "signing request built"
    );

    Ok(SigningRequest {
      file_name: document.file_name.clone(),
      document_base64: BASE64.encode(document.content.as_slice()),
      signature_value: digest.bytes,
      options,
      sign_with_expired_certificate: resolved.allow_expired_certificate,
      add_content_timestamp: resolved.add_content_timestamp,
    })
  }
}

/// What is sent for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationInput {
  /// Original document plus a detached signature.
  Detached { document: Document, signature: SignatureArtifact },
  /// A signed artifact carrying its own content.
  Enveloped { signed: SignatureArtifact },
}

/// Outbound verification request. `documentBase64` is absent in enveloped mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub document_base64: Option<String>,
  pub signature_base64: String,
  #[serde(flatten)]
  pub policy: CanonicalPolicyFields,
}

impl VerificationRequest {
  pub fn to_json(&self) -> EngineResult<String> {
    Ok(serde_json::to_string(self)?)
  }
}

pub fn build_verification_request(
  input: &VerificationInput,
  policy: &ValidationPolicy,
  limits: &LimitsConfig,
) -> EngineResult<VerificationRequest> {
  let policy = map_policy(policy)?;
  let (document, signature) = match input {
    VerificationInput::Detached { document, signature } => (Some(document), signature),
    VerificationInput::Enveloped { signed } => (None, signed),
  };

  if signature.bytes.len() > limits.max_signature_size {
    return Err(EngineError::Config(format!(
      "signature too large: {} bytes (max {})",
      signature.bytes.len(),
      limits.max_signature_size
    )));
  }
  if let Some(doc) = document {
    if doc.len() > limits.max_document_size {
      return Err(EngineError::Config(format!(
        "document too large: {} bytes (max {})",
        doc.len(),
        limits.max_document_size
      )));
    }
  }

  debug!(
    detached = document.is_some(),
    level = %policy.signature_level,
    validation_time = %policy.validation_time,
    "verification request built"
  );

  Ok(VerificationRequest {
    document_base64: document.map(|d| BASE64.encode(d.content.as_slice())),
    signature_base64: signature.to_base64(),
    policy,
  })
}

// adapters/dss/response.rs

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::error::{EngineError, EngineResult};
use crate::domain::verify::VerificationResult;

use super::constants::UNKNOWN_ERROR_MESSAGE;
use super::content_detection::{download_name, media_type_for_file_name};

/// Inbound signing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureResult {
  #[serde(default)]
  pub result: String,
  #[serde(default)]
  pub file_name: String,
  pub document_base64: String,
}

impl SignatureResult {
  /// The signed artifact's bytes.
  pub fn decode_document(&self) -> EngineResult<Vec<u8>> {
    BASE64
      .decode(self.document_base64.trim())
      .map_err(|e| EngineError::MalformedSignatureBlock(format!("documentBase64 is not valid base64: {e}")))
  }

  pub fn media_type(&self) -> &'static str {
    media_type_for_file_name(&self.file_name)
  }

  /// Name to save the artifact under.
  pub fn download_name(&self, original_file_name: Option<&str>) -> String {
    download_name(Some(self.file_name.as_str()), original_file_name)
  }

  /// The block users paste back for verification.
  pub fn to_block(&self) -> EngineResult<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}

/// Turns a non-success HTTP response into a single readable message.
pub fn remote_error(status: u16, reason: &str, body: &[u8]) -> EngineError {
  let prefix = format!("Server error: {status}");
  let message = match serde_json::from_slice::<Value>(body) {
    Ok(json) => match json.get("message").and_then(Value::as_str) {
      Some(m) if !m.is_empty() => m.to_string(),
      _ => json.to_string(),
    },
    Err(_) => format!("{prefix} {reason}").trim_end().to_string(),
  };
  warn!(status, %message, "remote call failed");
  EngineError::RemoteFailure(message)
}

pub fn interpret_signing_response(body: &[u8]) -> EngineResult<SignatureResult> {
  let result: SignatureResult = serde_json::from_slice(body)
    .map_err(|e| EngineError::RemoteFailure(format!("unexpected signing response: {e}")))?;
  // Reject unusable artifacts now rather than at download time.
  result
    .decode_document()
    .map_err(|e| EngineError::RemoteFailure(e.to_string()))?;
  Ok(result)
}

/// `isValid: false` fails the whole operation; no view is rendered from it.
pub fn interpret_verification_response(body: &[u8]) -> EngineResult<VerificationResult> {
  let result: VerificationResult = serde_json::from_slice(body)
    .map_err(|e| EngineError::RemoteFailure(format!("unexpected verification response: {e}")))?;
  if !result.is_valid {
    let message = result
      .simple_report
      .as_ref()
      .map(|r| r.message.trim())
      .filter(|m| !m.is_empty())
      .unwrap_or(UNKNOWN_ERROR_MESSAGE)
      .to_string();
    warn!(%message, "verification reported an invalid signature");
    return Err(EngineError::RemoteFailure(message));
  }
  Ok(result)
}

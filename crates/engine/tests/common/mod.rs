#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;

use chrono::NaiveDate;
use kr_dss_engine as kd;
use kd::adapters::dss::{SigningRequest, VerificationRequest};
use kd::domain::error::EngineResult;
use tempfile::TempDir;

/// Small PDF-looking payload; content is never parsed.
pub fn sample_document_bytes() -> Vec<u8> {
    b"%PDF-1.7\n1 0 obj << /Type /Catalog >> endobj\n%%EOF\n".to_vec()
}

pub fn sample_document() -> kd::adapters::dss::Document {
    kd::adapters::dss::Document::new("contract.pdf", sample_document_bytes())
}

/// Write the sample document to a temp dir and return (tempdir, path).
pub fn write_sample_document(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(name);
    std::fs::write(&path, sample_document_bytes()).expect("write document");
    (dir, path)
}

/// Fixed policy so serialized requests are stable.
pub fn fixed_policy() -> kd::domain::types::ValidationPolicy {
    let t = NaiveDate::from_ymd_opt(2024, 5, 17)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("valid time");
    kd::domain::types::ValidationPolicy::at(t)
}

/// Signing response block as the backend returns it.
pub fn signature_block() -> String {
    serde_json::json!({
        "result": "OK",
        "fileName": "contract-signed.xml",
        "documentBase64": "PHNpZz5vazwvc2lnPg==",
    })
    .to_string()
}

pub fn passed_verification_json() -> serde_json::Value {
    serde_json::json!({
        "isValid": true,
        "simpleReport": {
            "indication": "TOTAL_PASSED",
            "message": "The signature is valid.",
            "signatureCount": 1
        },
        "detailedReport": [
            { "name": "Format check", "status": "PASSED", "message": "XAdES-BASELINE-B" },
            { "name": "Signing certificate", "status": "WARNING", "message": "Self-signed" }
        ],
        "diagnosticTree": {
            "name": "All signatures",
            "status": "PASSED",
            "message": "1 signature",
            "children": [
                {
                    "name": "Signature S-1",
                    "status": "PASSED",
                    "message": "",
                    "children": [
                        { "name": "Digest match", "status": "PASSED", "message": "SHA-256", "children": null }
                    ]
                }
            ]
        },
        "etsiValidationReport": {
            "available": true,
            "mainIndication": "urn:etsi:019102:mainindication:total-passed",
            "validationTime": "2024-05-17T09:30:00Z",
            "policy": "QES AdESQC TL based"
        },
        "fileName": "contract-signed.xml",
        "downloadUrl": "/api/verify/reports"
    })
}

pub fn failed_verification_json(message: &str) -> serde_json::Value {
    serde_json::json!({
        "isValid": false,
        "simpleReport": { "indication": "TOTAL_FAILED", "message": message }
    })
}

/// Scripted backend: returns the queued responses in order and records what
/// it was asked.
#[derive(Default)]
pub struct ScriptedService {
    pub responses: RefCell<Vec<EngineResult<kd::RemoteResponse>>>,
    pub signed: RefCell<Vec<String>>,
    pub verified: RefCell<Vec<String>>,
}

impl ScriptedService {
    pub fn with(responses: Vec<EngineResult<kd::RemoteResponse>>) -> Self {
        let mut responses = responses;
        responses.reverse();
        Self {
            responses: RefCell::new(responses),
            ..Self::default()
        }
    }

    fn next(&self) -> EngineResult<kd::RemoteResponse> {
        self.responses
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| Err(kd::EngineError::RemoteFailure("no scripted response".into())))
    }
}

impl kd::SignatureService for ScriptedService {
    fn sign(&self, request: &SigningRequest) -> EngineResult<kd::RemoteResponse> {
        self.signed.borrow_mut().push(request.to_json()?);
        self.next()
    }

    fn verify(&self, request: &VerificationRequest) -> EngineResult<kd::RemoteResponse> {
        self.verified.borrow_mut().push(request.to_json()?);
        self.next()
    }
}

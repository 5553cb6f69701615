mod common;

use kr_dss_engine as kd;
use kd::adapters::dss::{Document, SignatureArtifact, VerificationInput};
use kd::domain::types::{LimitsConfig, ValidationPolicy};
use kd::{SignatureFormat, SignatureLevel, ValidationModel};

fn detached() -> VerificationInput {
    VerificationInput::Detached {
        document: common::sample_document(),
        signature: SignatureArtifact::from_block(&common::signature_block()).unwrap(),
    }
}

#[test]
fn detached_request_carries_document_and_policy() {
    let req = kd::build_verification_request(&detached(), &common::fixed_policy(), LimitsConfig::defaults()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();

    assert!(json["documentBase64"].is_string());
    assert_eq!(json["signatureBase64"], "PHNpZz5vazwvc2lnPg==");
    assert_eq!(json["container"], serde_json::Value::Null);
    assert_eq!(json["signatureFormat"], "XAdES");
    assert_eq!(json["signatureLevel"], "XAdES_BASELINE_B");
    assert_eq!(json["validationTime"], "2024-05-17T09:30");
    assert_eq!(json["trustAnchor"], "European Union Trusted List (Simulated)");
    assert_eq!(json["digestAlgorithmRequirement"], "SHA256");
    assert_eq!(json["validationModel"], "SHELL");
}

#[test]
fn enveloped_request_omits_document() {
    let input = VerificationInput::Enveloped {
        signed: SignatureArtifact::from_bytes(Some("signed.pdf".into()), common::sample_document_bytes()).unwrap(),
    };
    let mut policy = common::fixed_policy();
    policy.signature_format = SignatureFormat::PAdES;
    policy.signature_level = SignatureLevel::BaselineLt;
    policy.validation_model = Some(ValidationModel::Chain);
    policy.digest_algorithm_requirement = None;

    let req = kd::build_verification_request(&input, &policy, LimitsConfig::defaults()).unwrap();
    assert!(req.document_base64.is_none());
    let json: serde_json::Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();
    assert!(json.get("documentBase64").is_none());
    assert!(json.get("digestAlgorithmRequirement").is_none());
    assert_eq!(json["signatureLevel"], "PAdES_BASELINE_LT");
    assert_eq!(json["validationModel"], "CHAIN");
}

#[test]
fn malformed_blocks_are_rejected() {
    for block in ["", "   ", "not json", r#"{"documentBase64":"%%%"}"#, r#"{"documentBase64":""}"#] {
        let err = SignatureArtifact::from_block(block).unwrap_err();
        assert!(
            matches!(err, kd::EngineError::MalformedSignatureBlock(_)),
            "{block:?} -> {err}"
        );
    }
}

#[test]
fn block_keeps_server_file_name() {
    let artifact = SignatureArtifact::from_block(&common::signature_block()).unwrap();
    assert_eq!(artifact.file_name.as_deref(), Some("contract-signed.xml"));
    assert_eq!(artifact.bytes, b"<sig>ok</sig>");
}

#[test]
fn signature_over_limit_is_rejected() {
    let limits = LimitsConfig {
        max_signature_size: 3,
        ..LimitsConfig::defaults()
    };
    let err = kd::build_verification_request(&detached(), &common::fixed_policy(), limits).unwrap_err();
    assert!(err.to_string().contains("signature too large"));
}

#[test]
fn policy_round_trips_through_json() {
    let policy = common::fixed_policy();
    let json = serde_json::to_value(&policy).unwrap();
    assert_eq!(json["validationTime"], "2024-05-17T09:30");
    assert_eq!(json["signatureLevel"], "B-B");
    let back: ValidationPolicy = serde_json::from_value(json).unwrap();
    assert_eq!(back, policy);

    let legacy = serde_json::json!({
        "container": "NONE",
        "signatureFormat": "CAdES",
        "level": "B-T",
        "validationTime": "2024-05-17T09:30:45",
        "trustAnchor": "Custom TL"
    });
    let parsed: ValidationPolicy = serde_json::from_value(legacy).unwrap();
    assert_eq!(parsed.signature_level, SignatureLevel::BaselineT);
    assert_eq!(parsed.validation_model, None);
    assert_eq!(kd::domain::types::minute_precision::format(&parsed.validation_time), "2024-05-17T09:30");
}

#[test]
fn document_name_is_not_sent() {
    let input = VerificationInput::Detached {
        document: Document::new("secret-name.pdf", b"abc".to_vec()),
        signature: SignatureArtifact::from_bytes(None, b"sig".to_vec()).unwrap(),
    };
    let json = kd::build_verification_request(&input, &common::fixed_policy(), LimitsConfig::defaults())
        .unwrap()
        .to_json()
        .unwrap();
    assert!(!json.contains("secret-name"));
    assert!(json.contains(r#""documentBase64":"YWJj""#));
}

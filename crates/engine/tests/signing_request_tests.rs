#![cfg(feature = "digest")]

mod common;

use base64::Engine;
use kr_dss_engine as kd;
use kd::adapters::dss::{Document, SigningRequestBuilder};
use kd::crypto::digest::digest_now;
use kd::domain::types::{LimitsConfig, SignatureConfiguration};
use kd::{Container, DigestAlgorithm, Packaging, SignatureFormat, SignatureLevel};

#[tokio::test]
async fn request_carries_wire_fields() {
    let cfg = SignatureConfiguration {
        signature_format: SignatureFormat::PAdES,
        level: SignatureLevel::BaselineLta,
        add_content_timestamp: true,
        ..SignatureConfiguration::secure_default()
    };
    let req = kd::build_signing_request(&common::sample_document(), &cfg, LimitsConfig::defaults())
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();

    assert_eq!(json["fileName"], "contract.pdf");
    assert_eq!(json["containerType"], serde_json::Value::Null);
    assert_eq!(json["signatureForm"], "PAdES");
    assert_eq!(json["signaturePackaging"], "ENVELOPED");
    assert_eq!(json["signatureLevel"], "PAdES_BASELINE_LTA");
    assert_eq!(json["digestAlgorithm"], "SHA256");
    assert_eq!(json["signWithExpiredCertificate"], false);
    assert_eq!(json["addContentTimestamp"], true);
    assert_eq!(json["signatureValue"].as_array().map(Vec::len), Some(32));
    assert!(json.get("options").is_none());
}

#[tokio::test]
async fn document_and_digest_match_content() {
    let doc = common::sample_document();
    let cfg = SignatureConfiguration {
        digest_algorithm: DigestAlgorithm::Sha512,
        ..SignatureConfiguration::secure_default()
    };
    let req = SigningRequestBuilder::default().build(&doc, &cfg).await.unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(&req.document_base64)
        .unwrap();
    assert_eq!(decoded, common::sample_document_bytes());
    let expected = digest_now(DigestAlgorithm::Sha512, &decoded).unwrap();
    assert_eq!(req.signature_value, expected.bytes);
    assert_eq!(req.options.digest_algorithm, "SHA512");
}

#[tokio::test]
async fn same_input_same_request() {
    let doc = common::sample_document();
    let cfg = SignatureConfiguration::secure_default();
    let builder = SigningRequestBuilder::default();
    let a = builder.build(&doc, &cfg).await.unwrap();
    let b = builder.build(&doc, &cfg).await.unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[tokio::test]
async fn inconsistent_options_are_resolved_before_mapping() {
    let cfg = SignatureConfiguration {
        container: Container::AsicE,
        signature_format: SignatureFormat::PAdES,
        packaging: Packaging::Enveloped,
        ..SignatureConfiguration::secure_default()
    };
    let req = SigningRequestBuilder::default()
        .build(&common::sample_document(), &cfg)
        .await
        .unwrap();
    assert_eq!(req.options.container_type, Some("ASiC_E"));
    assert_eq!(req.options.signature_form, "XAdES");
    assert_eq!(req.options.signature_packaging, "DETACHED");
    assert_eq!(req.options.signature_level, "XAdES_BASELINE_B");
}

#[tokio::test]
async fn document_over_limit_is_rejected() {
    let limits = LimitsConfig {
        max_document_size: 4,
        ..LimitsConfig::defaults()
    };
    let err = SigningRequestBuilder::new(limits)
        .build(&common::sample_document(), &SignatureConfiguration::secure_default())
        .await
        .unwrap_err();
    assert!(matches!(err, kd::EngineError::Config(_)));
    assert!(err.to_string().contains("too large"));
}

#[tokio::test]
async fn document_from_path() {
    let (_dir, path) = common::write_sample_document("upload.pdf");
    let doc = Document::from_path(&path).await.unwrap();
    assert_eq!(doc.file_name, "upload.pdf");
    assert_eq!(doc.len(), common::sample_document_bytes().len());

    let missing = Document::from_path(path.with_file_name("missing.pdf")).await;
    assert!(matches!(missing, Err(kd::EngineError::Io(_))));
}

#[test]
fn blocking_variant_outside_runtime() {
    let doc = common::sample_document();
    let req = kd::build_signing_request_blocking(&doc, &SignatureConfiguration::secure_default(), LimitsConfig::defaults())
        .unwrap();
    assert_eq!(req.options.signature_level, "XAdES_BASELINE_B");
    assert_eq!(req.signature_value.len(), DigestAlgorithm::Sha256.output_len());
}

use kr_dss_engine as kd;
use kd::adapters::dss::{remote_error, ServiceEndpoints};
use kd::{EngineError, UnsupportedValue};

#[test]
fn mapping_error_names_field_and_value() {
    let err: EngineError = UnsupportedValue::new("level", "B-X").into();
    assert_eq!(err.to_string(), r#"mapping: unsupported level value: "B-X""#);
    assert!(matches!(err, EngineError::Mapping(ref v) if v.field == "level"));
}

#[test]
fn remote_error_message_preference() {
    let e = remote_error(400, "Bad Request", br#"{"message":"level not supported"}"#);
    assert_eq!(e.to_string(), "remote failure: level not supported");
    let e = remote_error(400, "Bad Request", br#"{"message":""}"#);
    assert_eq!(e.to_string(), r#"remote failure: {"message":""}"#);
    let e = remote_error(503, "", b"");
    assert_eq!(e.to_string(), "remote failure: Server error: 503");
}

#[test]
fn invalid_service_urls_are_config_errors() {
    for bad in ["ftp://dss.example.com", "https://", "https://dss.example.com/#frag"] {
        let err = ServiceEndpoints::new(bad).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)), "{bad}");
    }
}

#[test]
fn env_base_url_overrides_default() {
    std::env::set_var("KR_DSS_BASE_URL", "https://dss.internal.example/");
    let endpoints = ServiceEndpoints::from_env().unwrap();
    assert_eq!(endpoints.verify().unwrap().as_str(), "https://dss.internal.example/kr-dss/api/verify");
    std::env::remove_var("KR_DSS_BASE_URL");
}

#[cfg(not(feature = "digest"))]
#[tokio::test]
async fn hashing_without_backend_is_reported() {
    let err = kd::crypto::digest::digest_content(kd::DigestAlgorithm::Sha256, std::sync::Arc::new(vec![1, 2, 3]))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::HashingUnavailable(_)));
}

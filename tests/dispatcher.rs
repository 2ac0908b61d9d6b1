mod common;

use std::sync::Arc;

use serde_json::json;

use sbi_trust::codec::base64url_encode;
use sbi_trust::config::TrustServiceConfig;
use sbi_trust::trust::HttpTrustServiceClient;
use sbi_trust::{
    FailureKind, ValidationRequest, ValidationStatus, Validator, ValidatorConfig,
};

use crate::common::{
    biometric_sample, extra_info, signed_device_info, unsigned_device_info, validator,
    DeviceSigner, FakeTrustService,
};

#[test_log::test]
fn unsupported_method_makes_no_trust_call() {
    let device = DeviceSigner::rs256("device");
    let trust = FakeTrustService::trusting();
    let response = json!([signed_device_info(&device, &device, "L0")]).to_string();

    for method in ["STREAM", "SETTINGS", "info", ""] {
        let result = validator(&trust).validate(&ValidationRequest::new(method, &response, None));
        assert_eq!(result.status, ValidationStatus::Failure);
        assert_eq!(result.description, "Method not supported");
        assert_eq!(result.failure, Some(FailureKind::Structural));
    }
    assert!(trust.calls().is_empty());
}

#[test_log::test]
fn empty_response() {
    let trust = FakeTrustService::trusting();
    for response in ["", "   ", "\n\t"] {
        let result = validator(&trust).validate(&ValidationRequest::new("INFO", response, None));
        assert_eq!(result.description, "Response is empty");
    }
}

#[test_log::test]
fn descriptive_method_aliases() {
    let trust = FakeTrustService::trusting();
    let discovery = json!([{
        "digitalId": base64url_encode(r#"{"type":"Face","deviceSubType":"Full face"}"#)
    }])
    .to_string();
    let info = json!([unsigned_device_info("Not Registered")]).to_string();

    for (method, response) in [
        ("DEVICE", &discovery),
        ("DISCOVER", &discovery),
        ("INFO", &info),
        ("DEVICE_INFO", &info),
    ] {
        let result = validator(&trust).validate(&ValidationRequest::new(method, response, None));
        assert!(result.is_success(), "{method}: {result:?}");
    }
}

#[test_log::test]
fn malformed_response_is_a_failure() {
    let trust = FakeTrustService::trusting();
    for method in ["DEVICE", "INFO", "CAPTURE", "RCAPTURE"] {
        let result = validator(&trust).validate(&ValidationRequest::new(method, "{not json", None));
        assert!(result.description.starts_with("malformed"), "{result:?}");
        assert_eq!(result.failure, Some(FailureKind::Structural));
    }
}

#[test_log::test]
fn request_from_wire_json() {
    let device = DeviceSigner::rs256("device");
    let trust = FakeTrustService::trusting();
    let request: ValidationRequest = serde_json::from_value(json!({
        "methodName": "CAPTURE",
        "methodResponse": json!({"biometrics": [biometric_sample(&device, &device)]}).to_string(),
        "extraInfoJson": extra_info("L0"),
    }))
    .unwrap();

    let result = validator(&trust).validate(&request);
    assert!(result.is_success(), "{result:?}");
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"status": "SUCCESS", "description": "Trust Root Validation is Successful"})
    );
}

#[test_log::test]
fn disabled_trust_client_fails_with_transport() {
    let device = DeviceSigner::rs256("device");
    let validator = Validator::new(
        ValidatorConfig::default(),
        HttpTrustServiceClient::new((), &TrustServiceConfig::default()),
    );
    let response = json!([signed_device_info(&device, &device, "L0")]).to_string();

    let result = validator.validate(&ValidationRequest::new("INFO", response, None));
    assert_eq!(result.failure, Some(FailureKind::Transport));
    assert!(result.description.contains("trust checking is disabled"), "{result:?}");
}

#[test_log::test]
fn validations_run_in_parallel() {
    let device = DeviceSigner::rs256("device");
    let trust = Arc::new(FakeTrustService::trusting());
    let validator = Validator::new(ValidatorConfig::default(), trust.clone());
    let response = json!([signed_device_info(&device, &device, "L0")]).to_string();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let result = validator.validate(&ValidationRequest::new("INFO", &response, None));
                assert!(result.is_success(), "{result:?}");
            });
        }
    });
    assert_eq!(trust.calls().len(), 8);
}

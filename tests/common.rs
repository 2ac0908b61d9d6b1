use std::sync::{Mutex, OnceLock};
use std::time::{Duration, SystemTime};

use rand::random;
use serde_json::{json, Value};
use sha2::Sha256;
use signature::{Keypair, SignatureEncoding, Signer};
use x509_cert::builder::{Builder, CertificateBuilder, Profile};
use x509_cert::spki::{
    DynSignatureAlgorithmIdentifier, EncodePublicKey, SignatureBitStringEncoding,
    SubjectPublicKeyInfoOwned,
};
use x509_cert::time::{Time, Validity};
use x509_cert::Certificate;

use sbi_trust::codec::base64url_encode;
use sbi_trust::definitions::x509::CertificateWithDer;
use sbi_trust::trust::{
    TrustServiceClient, TrustServiceError, TrustServiceRequest, TrustServiceResponse,
};
use sbi_trust::{Validator, ValidatorConfig};

#[allow(dead_code)]
fn main() {}

/// Validity window of a generated certificate.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub enum Window {
    Current,
    Expired,
    NotYetValid,
}

impl Window {
    fn validity(self) -> Validity {
        const DAY: Duration = Duration::from_secs(24 * 60 * 60);
        let now = SystemTime::now();
        let (not_before, not_after) = match self {
            Window::Current => (now - DAY, now + DAY),
            Window::Expired => (now - 2 * DAY, now - DAY),
            Window::NotYetValid => (now + DAY, now + 2 * DAY),
        };
        Validity {
            not_before: Time::try_from(not_before).unwrap(),
            not_after: Time::try_from(not_after).unwrap(),
        }
    }
}

fn self_signed<S, Sig>(key: &S, subject: &str, window: Window) -> Certificate
where
    S: Keypair + DynSignatureAlgorithmIdentifier + Signer<Sig>,
    S::VerifyingKey: EncodePublicKey,
    Sig: SignatureBitStringEncoding,
{
    let spki = SubjectPublicKeyInfoOwned::from_key(key.verifying_key()).unwrap();
    let mut builder = CertificateBuilder::new(
        Profile::Manual { issuer: None },
        random::<u64>().into(),
        window.validity(),
        format!("CN={subject},O=SBI Test,C=IN").parse().unwrap(),
        spki,
        key,
    )
    .unwrap();
    let signature: Sig = key.sign(&builder.finalize().unwrap());
    builder
        .assemble(signature.to_bitstring().unwrap())
        .unwrap()
}

fn rsa_key() -> rsa::RsaPrivateKey {
    static KEY: OnceLock<rsa::RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| rsa::RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap())
        .clone()
}

enum Key {
    Rs256(rsa::pkcs1v15::SigningKey<Sha256>),
    Es256(p256::ecdsa::SigningKey),
}

/// Signs SBI payloads the way a device does: compact JWS with the device certificate in `x5c`.
pub struct DeviceSigner {
    key: Key,
    pub certificate: Certificate,
}

#[allow(dead_code)]
impl DeviceSigner {
    pub fn rs256(subject: &str) -> Self {
        Self::rs256_with(subject, Window::Current)
    }

    pub fn rs256_with(subject: &str, window: Window) -> Self {
        let key = rsa::pkcs1v15::SigningKey::<Sha256>::new(rsa_key());
        let certificate = self_signed::<_, rsa::pkcs1v15::Signature>(&key, subject, window);
        Self {
            key: Key::Rs256(key),
            certificate,
        }
    }

    pub fn es256(subject: &str) -> Self {
        Self::es256_with(subject, Window::Current)
    }

    pub fn es256_with(subject: &str, window: Window) -> Self {
        let key = p256::ecdsa::SigningKey::random(&mut rand::thread_rng());
        let certificate = self_signed::<_, p256::ecdsa::DerSignature>(&key, subject, window);
        Self {
            key: Key::Es256(key),
            certificate,
        }
    }

    pub fn alg(&self) -> &'static str {
        match self.key {
            Key::Rs256(_) => "RS256",
            Key::Es256(_) => "ES256",
        }
    }

    /// The certificate as it appears in `x5c`.
    pub fn certificate_text(&self) -> String {
        CertificateWithDer::from_cert(self.certificate.clone())
            .unwrap()
            .to_x5c()
    }

    pub fn sign(&self, payload: &str) -> String {
        self.sign_with_header(
            json!({"alg": self.alg(), "typ": "JWT", "x5c": [self.certificate_text()]}),
            payload,
        )
    }

    pub fn sign_with_header(&self, header: Value, payload: &str) -> String {
        let signing_input = format!(
            "{}.{}",
            base64url_encode(header.to_string()),
            base64url_encode(payload)
        );
        let signature = match &self.key {
            Key::Rs256(key) => key.sign(signing_input.as_bytes()).to_vec(),
            Key::Es256(key) => {
                let signature: p256::ecdsa::Signature = key.sign(signing_input.as_bytes());
                signature.to_bytes().to_vec()
            }
        };
        format!("{signing_input}.{}", base64url_encode(signature))
    }
}

/// Replace the payload of `token` with `payload`, keeping header and signature.
#[allow(dead_code)]
pub fn tamper(token: &str, payload: &str) -> String {
    let parts: Vec<&str> = token.split('.').collect();
    format!("{}.{}.{}", parts[0], base64url_encode(payload), parts[2])
}

#[allow(dead_code)]
pub fn digital_id(device_type: Option<&str>, sub_type: Option<&str>) -> String {
    json!({
        "serialNo": "SN-0042",
        "make": "Acme",
        "model": "Slapper 3",
        "type": device_type,
        "deviceSubType": sub_type,
        "deviceProvider": "Acme Biometrics",
        "deviceProviderId": "acme",
        "dateTime": "2024-05-01T10:00:00.000Z"
    })
    .to_string()
}

/// Signed device info record whose digital ID is signed by `id_signer`.
#[allow(dead_code)]
pub fn signed_device_info(
    device_signer: &DeviceSigner,
    id_signer: &DeviceSigner,
    certification: &str,
) -> Value {
    let digital_id = id_signer.sign(&digital_id(Some("Finger"), Some("Slap")));
    let device_info = json!({
        "deviceStatus": "Ready",
        "deviceId": "1",
        "certification": certification,
        "serviceVersion": "0.9.5",
        "digitalId": digital_id,
        "purpose": "Registration"
    });
    json!({ "deviceInfo": device_signer.sign(&device_info.to_string()) })
}

#[allow(dead_code)]
pub fn unsigned_device_info(status: &str) -> Value {
    let device_info = json!({
        "deviceStatus": status,
        "deviceId": "1",
        "certification": "L0",
        "digitalId": base64url_encode(digital_id(Some("Finger"), Some("Slap"))),
    });
    json!({ "deviceInfo": base64url_encode(device_info.to_string()) })
}

/// Capture sample whose biometric data is signed by `data_signer`.
#[allow(dead_code)]
pub fn biometric_sample(data_signer: &DeviceSigner, id_signer: &DeviceSigner) -> Value {
    let data = json!({
        "digitalId": id_signer.sign(&digital_id(Some("Finger"), Some("Slap"))),
        "bioType": "Finger",
        "bioSubType": "Left IndexFinger",
        "purpose": "Auth",
        "bioValue": "<encrypted>",
        "timestamp": "2024-05-01T10:00:00.000Z"
    });
    json!({
        "specVersion": "0.9.5",
        "data": data_signer.sign(&data.to_string()),
        "hash": "abc"
    })
}

#[allow(dead_code)]
pub fn extra_info(certification: &str) -> Option<String> {
    Some(json!({ "certificationType": certification }).to_string())
}

/// One request seen by the [`FakeTrustService`].
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct TrustCall {
    pub partner_domain: String,
    pub certificate_data: String,
}

impl TrustCall {
    #[allow(dead_code)]
    pub fn is_for(&self, signer: &DeviceSigner) -> bool {
        self.certificate_data.contains(&signer.certificate_text())
    }
}

/// Trust Service double that records calls and answers with a fixed policy.
#[derive(Default)]
pub struct FakeTrustService {
    untrusted_domains: Vec<String>,
    untrusted_certificates: Vec<String>,
    unreachable: bool,
    calls: Mutex<Vec<TrustCall>>,
}

#[allow(dead_code)]
impl FakeTrustService {
    pub fn trusting() -> Self {
        Self::default()
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn distrusting_domain(domain: &str) -> Self {
        Self {
            untrusted_domains: vec![domain.to_string()],
            ..Self::default()
        }
    }

    pub fn distrusting(signer: &DeviceSigner) -> Self {
        Self {
            untrusted_certificates: vec![signer.certificate_text()],
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<TrustCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl TrustServiceClient for FakeTrustService {
    fn verify_certificate_trust(
        &self,
        request: &TrustServiceRequest,
    ) -> Result<TrustServiceResponse, TrustServiceError> {
        let call = TrustCall {
            partner_domain: request.request.partner_domain.clone(),
            certificate_data: request.request.certificate_data.clone(),
        };
        assert!(call.certificate_data.starts_with("-----BEGIN CERTIFICATE-----\n"));
        self.calls.lock().unwrap().push(call.clone());

        if self.unreachable {
            return Err(TrustServiceError::Status { status: 503 });
        }
        let trusted = !self.untrusted_domains.contains(&call.partner_domain)
            && !self
                .untrusted_certificates
                .iter()
                .any(|certificate| call.certificate_data.contains(certificate));
        let response = if trusted {
            json!({"response": {"status": "true"}, "errors": []})
        } else {
            json!({"response": {"status": "false"}, "errors": []})
        };
        Ok(serde_json::from_value(response).unwrap())
    }
}

#[allow(dead_code)]
pub fn validator(trust: &FakeTrustService) -> Validator<&FakeTrustService> {
    Validator::new(ValidatorConfig::default(), trust)
}

pub mod certification;
pub mod device;
pub mod helpers;
pub mod method;
pub mod validation_result;
pub mod x509;

pub use certification::{CertificationLevel, PartnerDomain, TrustTarget};
pub use device::{DeviceStatus, DigitalId};
pub use method::MethodName;
pub use validation_result::{FailureKind, ValidationRequest, ValidationResult, ValidationStatus};

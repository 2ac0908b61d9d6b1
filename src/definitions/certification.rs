use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Certification level declared by the device.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum CertificationLevel {
    L0,
    L1,
}

impl CertificationLevel {
    /// The partner domain whose trust root signs digital IDs at this level.
    ///
    /// L0 digital IDs are issued by the device provider itself, L1 digital IDs by the
    /// biometric function module (FTM).
    pub fn partner_domain(self) -> PartnerDomain {
        match self {
            Self::L0 => PartnerDomain::Device,
            Self::L1 => PartnerDomain::Ftm,
        }
    }
}

/// Trust scope a certificate is checked against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PartnerDomain {
    Device,
    Ftm,
}

/// What a trust check is performed for. Only used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
pub enum TrustTarget {
    #[strum(to_string = "Digital Id")]
    DigitalId,
    #[strum(to_string = "Device Info")]
    DeviceInfo,
    #[strum(to_string = "Biometric Data")]
    BiometricData,
}

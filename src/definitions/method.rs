use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// SBI method whose response is being validated.
///
/// Parsing accepts the SBI wire codes (`DEVICE`, `INFO`, `CAPTURE`, `RCAPTURE`) as well as the
/// descriptive aliases `DISCOVER` and `DEVICE_INFO`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
)]
pub enum MethodName {
    #[strum(to_string = "DEVICE", serialize = "DISCOVER")]
    #[serde(rename = "DEVICE", alias = "DISCOVER")]
    Discover,
    #[strum(to_string = "INFO", serialize = "DEVICE_INFO")]
    #[serde(rename = "INFO", alias = "DEVICE_INFO")]
    DeviceInfo,
    #[strum(to_string = "CAPTURE")]
    #[serde(rename = "CAPTURE")]
    Capture,
    #[strum(to_string = "RCAPTURE")]
    #[serde(rename = "RCAPTURE")]
    RCapture,
}

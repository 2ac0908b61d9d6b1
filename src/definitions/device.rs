use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumString};

/// Registration state reported by a device in its device info.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum DeviceStatus {
    Ready,
    Busy,
    #[strum(serialize = "Not Ready")]
    #[serde(rename = "Not Ready")]
    NotReady,
    #[strum(serialize = "Not Registered")]
    #[serde(rename = "Not Registered")]
    NotRegistered,
}

/// Identity assertion describing the physical device.
///
/// Only `type` and `deviceSubType` are interpreted. The remaining attributes (`serialNo`,
/// `make`, `dateTime`, ...) are kept as they appear on the wire, whatever their JSON type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalId {
    #[serde(rename = "type")]
    pub device_type: Option<Value>,
    pub device_sub_type: Option<Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl DigitalId {
    /// Both the device type and the device subtype are present and not `null`.
    pub fn is_typed(&self) -> bool {
        self.device_type.is_some() && self.device_sub_type.is_some()
    }
}

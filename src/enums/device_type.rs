use num_enum::{TryFromPrimitive, IntoPrimitive};
use serde_repr::{Serialize_repr, Deserialize_repr};
use strum_macros::{Display, EnumString};

/// The kind of device a player is registered from. Sent as the numeric `device_type`
/// parameter when creating a player.
#[derive(Serialize_repr, Deserialize_repr, Display, EnumString, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum DeviceType {
    /// iOS.
    #[strum(serialize = "ios")]
    Ios = 0,
    /// Android.
    #[strum(serialize = "android")]
    Android = 1,
    /// Amazon Fire.
    #[strum(serialize = "amazon")]
    Amazon = 2,
    /// Windows Phone.
    #[strum(serialize = "windows_phone")]
    WindowsPhone = 3,
    /// Chrome apps and extensions.
    #[strum(serialize = "chrome_app")]
    ChromeApp = 4,
    /// Chrome web push.
    #[strum(serialize = "chrome_web")]
    ChromeWeb = 5,
    /// Windows.
    #[strum(serialize = "windows")]
    Windows = 6,
    /// Safari.
    #[strum(serialize = "safari")]
    Safari = 7,
    /// Firefox.
    #[strum(serialize = "firefox")]
    Firefox = 8,
    /// macOS.
    #[strum(serialize = "macos")]
    MacOs = 9,
    /// Alexa.
    #[strum(serialize = "alexa")]
    Alexa = 10,
    /// Email.
    #[strum(serialize = "email")]
    Email = 11,
    /// Huawei.
    #[strum(serialize = "huawei")]
    Huawei = 13,
    /// SMS.
    #[strum(serialize = "sms")]
    Sms = 14,
}

impl From<DeviceType> for serde_json::Value {
    fn from(device_type: DeviceType) -> Self {
        serde_json::Value::from(u8::from(device_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&DeviceType::Android).unwrap();

        assert_eq!(json, "1");
        assert_eq!(serde_json::Value::from(DeviceType::Sms), serde_json::json!(14));
    }

    #[test]
    fn converts_from_code() {
        assert_eq!(DeviceType::try_from(9u8).unwrap(), DeviceType::MacOs);
        assert!(DeviceType::try_from(12u8).is_err());
    }

    #[test]
    fn parses_from_name() {
        assert_eq!(DeviceType::from_str("chrome_web").unwrap(), DeviceType::ChromeWeb);
        assert_eq!(DeviceType::Ios.to_string(), "ios");
    }
}

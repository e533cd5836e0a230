//! Shared types for device control. Defines the ECP XML documents, the
//! input-name resolution rule, and the caller-facing response shapes.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::keys::{BLANKED_INPUT, INPUT_WHEN_OFF};

/// `<device-info>` document returned by `query/device-info`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DeviceInfo {
    pub udn: String,
    pub serial_number: String,
    pub device_id: String,
    pub advertising_id: String,
    pub vendor_name: String,
    pub model_name: String,
    pub model_number: String,
    pub model_region: String,
    #[serde(deserialize_with = "lenient")]
    pub is_tv: bool,
    #[serde(deserialize_with = "lenient")]
    pub is_stick: bool,
    #[serde(deserialize_with = "lenient")]
    pub screen_size: i64,
    #[serde(deserialize_with = "lenient")]
    pub panel_id: i64,
    pub tuner_type: String,
    #[serde(deserialize_with = "lenient")]
    pub supports_ethernet: bool,
    pub wifi_mac: String,
    pub wifi_driver: String,
    pub ethernet_mac: String,
    pub network_type: String,
    pub network_name: String,
    pub friendly_device_name: String,
    pub friendly_model_name: String,
    pub default_device_name: String,
    pub user_device_name: String,
    pub software_version: String,
    pub software_build: String,
    #[serde(deserialize_with = "lenient")]
    pub secure_device: bool,
    pub language: String,
    pub country: String,
    pub locale: String,
    #[serde(deserialize_with = "lenient")]
    pub time_zone_auto: bool,
    pub time_zone: String,
    pub time_zone_name: String,
    pub time_zone_tz: String,
    #[serde(deserialize_with = "lenient")]
    pub time_zone_offset: i64,
    pub clock_format: String,
    #[serde(deserialize_with = "lenient")]
    pub uptime: u64,
    pub power_mode: String,
    #[serde(deserialize_with = "lenient")]
    pub supports_suspend: bool,
    #[serde(deserialize_with = "lenient")]
    pub supports_find_remote: bool,
    #[serde(deserialize_with = "lenient")]
    pub supports_audio_guide: bool,
    #[serde(deserialize_with = "lenient")]
    pub supports_rva: bool,
    #[serde(deserialize_with = "lenient")]
    pub developer_enabled: bool,
    pub keyed_developer_id: String,
    #[serde(deserialize_with = "lenient")]
    pub search_enabled: bool,
    #[serde(deserialize_with = "lenient")]
    pub search_channels_enabled: bool,
    #[serde(deserialize_with = "lenient")]
    pub voice_search_enabled: bool,
    #[serde(deserialize_with = "lenient")]
    pub notifications_enabled: bool,
    #[serde(deserialize_with = "lenient")]
    pub notifications_first_use: bool,
    #[serde(deserialize_with = "lenient")]
    pub supports_private_listening: bool,
    #[serde(deserialize_with = "lenient")]
    pub supports_private_listening_dtv: bool,
    #[serde(deserialize_with = "lenient")]
    pub supports_warm_standby: bool,
    #[serde(deserialize_with = "lenient")]
    pub headphones_connected: bool,
    pub expert_pq_enabled: String,
    #[serde(deserialize_with = "lenient")]
    pub supports_ecs_textedit: bool,
    #[serde(deserialize_with = "lenient")]
    pub supports_ecs_microphone: bool,
    #[serde(deserialize_with = "lenient")]
    pub supports_wake_on_wlan: bool,
    #[serde(deserialize_with = "lenient")]
    pub has_play_on_roku: bool,
    #[serde(deserialize_with = "lenient")]
    pub has_mobile_screensaver: bool,
    pub support_url: String,
}

/// Number or flag element that firmware may leave empty; blank text reads
/// as the zero value.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    let text = String::deserialize(deserializer)?;
    match text.trim() {
        "" => Ok(T::default()),
        value => value.parse().map_err(serde::de::Error::custom),
    }
}

/// Value of the `type` attribute on an `<app>` element
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum AppType {
    TvInput,
    Application,
    Menu,
    Other(String),
}

impl Default for AppType {
    fn default() -> Self {
        AppType::Other(String::new())
    }
}

impl From<String> for AppType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "tvin" => AppType::TvInput,
            "appl" => AppType::Application,
            "menu" => AppType::Menu,
            _ => AppType::Other(value),
        }
    }
}

/// One selectable source: an input port, an installed app, or a menu
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct App {
    #[serde(rename = "$text", default)]
    pub text: String,
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "@subtype", default)]
    pub subtype: String,
    #[serde(rename = "@type", default)]
    pub app_type: AppType,
    #[serde(rename = "@version", default)]
    pub version: String,
}

impl App {
    /// Caller-facing name of this source.
    ///
    /// Input ports are named after the second segment of their id
    /// (`tvinput.hdmi2` -> `HDMI2`), the powered-off screen reports as
    /// `blanked`, and every menu is just `Menu`.
    pub fn input_name(&self) -> String {
        match &self.app_type {
            AppType::TvInput => self
                .id
                .split('.')
                .nth(1)
                .unwrap_or(self.id.as_str())
                .to_uppercase(),
            AppType::Application if self.text == INPUT_WHEN_OFF => BLANKED_INPUT.to_string(),
            AppType::Menu => "Menu".to_string(),
            AppType::Application | AppType::Other(_) => self.text.clone(),
        }
    }
}

/// `<apps>` document returned by `query/apps`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppList {
    #[serde(rename = "app", default)]
    pub apps: Vec<App>,
}

/// `<active-app>` document returned by `query/active-app`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActiveApp {
    pub app: App,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub ip_address: String,
    pub mac_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardwareInfo {
    pub hostname: String,
    pub model_name: String,
    pub serial_number: String,
    pub firmware_version: String,
    pub network_information: NetworkInfo,
    pub power_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerStatus {
    pub power: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputStatus {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuteStatus {
    pub muted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveSignal {
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
}
